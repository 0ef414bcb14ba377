use mtrk::prelude::*;
use pretty_assertions::assert_eq;

fn byte(b: u8) -> DataByte {
    DataByte::new(b).unwrap()
}

fn failure(payload: &[u8]) -> (usize, ParseError) {
    let err = decode_track(payload).unwrap_err();
    (err.position(), *err.cause())
}

#[test]
fn note_on_under_running_status() {
    let payload = [0x00, 0x90, 0x40, 0x60, 0x18, 0x41, 0x61];
    let events = decode_track(&payload).unwrap();

    assert_eq!(
        events,
        vec![
            TrackEvent::new(
                0,
                ChannelVoiceMessage::note_on(Channel::One, byte(0x40), byte(0x60))
            ),
            TrackEvent::new(
                0x18,
                ChannelVoiceMessage::note_on(Channel::One, byte(0x41), byte(0x61))
            ),
        ]
    );
}

#[test]
fn every_channel_voice_kind() {
    let payload = [
        0x00, 0x83, 0x3C, 0x40, // note off, channel 4
        0x00, 0x93, 0x3C, 0x40, // note on
        0x00, 0xA3, 0x3C, 0x10, // poly key pressure
        0x00, 0xB3, 0x07, 0x64, // control change
        0x00, 0xC3, 0x05, // program change
        0x00, 0xD3, 0x22, // channel pressure
        0x00, 0xE3, 0x2C, 0x02, // pitch bend 300
    ];
    let events = decode_track(&payload).unwrap();

    let voice: Vec<VoiceEvent> = events
        .iter()
        .map(|e| match e.message() {
            TrackMessage::ChannelVoice(m) => {
                assert_eq!(m.channel(), Channel::Four);
                *m.event()
            }
            other => panic!("expected a channel voice message, got {other:?}"),
        })
        .collect();

    assert_eq!(
        voice,
        vec![
            VoiceEvent::NoteOff {
                key: byte(0x3C),
                velocity: byte(0x40)
            },
            VoiceEvent::NoteOn {
                key: byte(0x3C),
                velocity: byte(0x40)
            },
            VoiceEvent::PolyKeyPressure {
                key: byte(0x3C),
                pressure: byte(0x10)
            },
            VoiceEvent::ControlChange {
                controller: byte(0x07),
                value: byte(0x64)
            },
            VoiceEvent::ProgramChange { program: byte(0x05) },
            VoiceEvent::ChannelPressure {
                pressure: byte(0x22)
            },
            VoiceEvent::PitchBend {
                value: DataWord::new(300).unwrap()
            },
        ]
    );
}

#[test]
fn system_messages() {
    let payload = [
        0x00, 0xF2, 0x10, 0x01, // song position 0x90
        0x00, 0xF3, 0x07, // song select
        0x00, 0xF6, // tune request
        0x00, 0xF8, 0x00, 0xFA, 0x00, 0xFB, 0x00, 0xFC, 0x00, 0xFE,
    ];
    let messages: Vec<TrackMessage> = decode_track(&payload)
        .unwrap()
        .into_iter()
        .map(TrackEvent::into_message)
        .collect();

    let expected: Vec<TrackMessage> = vec![
        SystemCommonMessage::SongPositionPointer(DataWord::new(0x90).unwrap()).into(),
        SystemCommonMessage::SongSelect(byte(7)).into(),
        SystemCommonMessage::TuneRequest.into(),
        SystemRealTimeMessage::TimingClock.into(),
        SystemRealTimeMessage::Start.into(),
        SystemRealTimeMessage::Continue.into(),
        SystemRealTimeMessage::Stop.into(),
        SystemRealTimeMessage::ActiveSensing.into(),
    ];
    assert_eq!(messages, expected);
}

#[test]
fn sysex_and_meta_payloads_borrow_the_buffer() {
    let payload = [
        0x00, 0xF0, 0x03, 0x7E, 0x7F, 0xF7, // sysex
        0x00, 0xF7, 0x00, // empty continuation
        0x00, 0xFF, 0x03, 0x04, b'l', b'e', b'a', b'd', // track name
        0x00, 0xFF, 0x2F, 0x00,
    ];
    let events = decode_track(&payload).unwrap();

    let TrackMessage::SystemExclusive(sysex) = events[0].message() else {
        panic!("expected sysex");
    };
    assert_eq!(sysex.form(), SysExForm::Initial);
    assert_eq!(sysex.data(), [0x7E, 0x7F, 0xF7]);

    let TrackMessage::SystemExclusive(empty) = events[1].message() else {
        panic!("expected sysex");
    };
    assert_eq!(empty.form(), SysExForm::Continuation);
    assert!(empty.data().is_empty());

    let TrackMessage::Meta(name) = events[2].message() else {
        panic!("expected meta");
    };
    assert_eq!(name.meta_type(), MetaType::TrackName);
    assert_eq!(name.text(), Some(b"lead".as_slice()));

    let TrackMessage::Meta(end) = events[3].message() else {
        panic!("expected meta");
    };
    assert!(end.is_end_of_track());
}

#[test]
fn long_delta_times() {
    let payload = [0xBD, 0x84, 0x40, 0xF8, 0xFF, 0xFF, 0xFF, 0x7F, 0xF8];
    let events = decode_track(&payload).unwrap();
    assert_eq!(events[0].delta_time(), 1_000_000);
    assert_eq!(events[1].delta_time(), 0x0FFF_FFFF);
}

#[test]
fn lone_data_byte_fails() {
    assert_eq!(
        failure(&[0x00, 0x3C, 0x40]),
        (1, ParseError::DataByteWithoutRunningStatus(0x3C))
    );
}

#[test]
fn running_status_is_cancelled_by_system_common() {
    let payload = [0x00, 0x90, 0x3C, 0x40, 0x00, 0xF3, 0x01, 0x00, 0x3C, 0x00];
    assert_eq!(
        failure(&payload),
        (8, ParseError::DataByteWithoutRunningStatus(0x3C))
    );
}

#[test]
fn running_status_survives_real_time_and_meta() {
    let payload = [
        0x00, 0x90, 0x3C, 0x40, //
        0x00, 0xFE, //
        0x00, 0xFF, 0x06, 0x01, b'A', //
        0x00, 0x3C, 0x00,
    ];
    let events = decode_track(&payload).unwrap();
    assert_eq!(
        events[3].message(),
        &TrackMessage::ChannelVoice(ChannelVoiceMessage::note_on(
            Channel::One,
            byte(0x3C),
            byte(0x00)
        ))
    );
}

#[test]
fn truncated_messages() {
    assert_eq!(
        failure(&[0x00, 0xC0]),
        (
            2,
            ParseError::TruncatedChannelEvent {
                expected: 1,
                available: 0
            }
        )
    );
    assert_eq!(
        failure(&[0x00, 0xF2, 0x01]),
        (
            2,
            ParseError::TruncatedSystemCommon {
                expected: 2,
                available: 1
            }
        )
    );
    assert_eq!(
        failure(&[0x00, 0xF0, 0x05, 0x01, 0x02]),
        (
            2,
            ParseError::TruncatedSysex {
                expected: 5,
                available: 2
            }
        )
    );
    assert_eq!(
        failure(&[0x00, 0xFF]),
        (
            2,
            ParseError::TruncatedMeta {
                expected: 1,
                available: 0
            }
        )
    );
}

#[test]
fn malformed_input() {
    assert_eq!(failure(&[0xFF, 0xFF]), (0, ParseError::MalformedVlq { read: 2 }));
    assert_eq!(failure(&[0x00]), (1, ParseError::MissingMessage));
    assert_eq!(failure(&[0x00, 0xFD]), (1, ParseError::UnknownStatusByte(0xFD)));
    // a status byte where a data byte belongs
    assert_eq!(
        failure(&[0x00, 0x90, 0x3C, 0x90]),
        (2, ParseError::InvalidDataByte(0x90))
    );
}

#[test]
fn reader_reports_its_progress() {
    let payload = [0x00, 0xB0, 0x07, 0x64, 0x10, 0x0A, 0x40];
    let mut reader = Reader::new(&payload);
    assert_eq!(reader.running_status(), RunningStatus::AwaitingEvent);

    reader.read_event().unwrap();
    assert_eq!(reader.buffer_position(), 4);
    assert_eq!(reader.running_status(), RunningStatus::Active(0xB0));

    reader.read_event().unwrap();
    assert_eq!(reader.buffer_position(), 7);
    assert!(reader.read_event().unwrap().is_none());
}
