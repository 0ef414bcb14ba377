use mtrk::prelude::*;
use pretty_assertions::assert_eq;

fn byte(b: u8) -> DataByte {
    DataByte::new(b).unwrap()
}

/// A track touching every message family, with explicit status bytes throughout.
const EXPLICIT: &[u8] = &[
    0x00, 0xFF, 0x03, 0x05, b'p', b'i', b'a', b'n', b'o', // track name
    0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, // tempo 500000
    0x00, 0xFF, 0x58, 0x04, 0x06, 0x03, 0x24, 0x08, // 6/8
    0x00, 0xFF, 0x59, 0x02, 0xFD, 0x01, // Eb minor
    0x00, 0xFF, 0x60, 0x01, 0x2A, // unknown meta type
    0x00, 0xC0, 0x00, // program change
    0x00, 0x90, 0x3C, 0x64, //
    0x83, 0x60, 0x80, 0x3C, 0x40, // delta 480
    0x00, 0xE0, 0x00, 0x40, // pitch bend centre
    0x00, 0xF0, 0x04, 0x43, 0x10, 0x4C, 0xF7, //
    0x00, 0xF7, 0x01, 0xF7, //
    0x00, 0xF2, 0x00, 0x00, //
    0x00, 0xFA, //
    0x00, 0xFF, 0x2F, 0x00,
];

#[test]
fn explicit_status_round_trips_exactly() {
    let events = decode_track(EXPLICIT).unwrap();
    assert_eq!(encode_track(&events).unwrap(), EXPLICIT);
}

#[test]
fn owned_events_round_trip() {
    let events: Vec<TrackEvent<'static>> = decode_track(EXPLICIT)
        .unwrap()
        .into_iter()
        .map(TrackEvent::into_owned)
        .collect();
    assert_eq!(encode_track(&events).unwrap(), EXPLICIT);
}

#[test]
fn typed_meta_accessors() {
    let events = decode_track(EXPLICIT).unwrap();
    let meta: Vec<&MetaMessage> = events
        .iter()
        .filter_map(|e| match e.message() {
            TrackMessage::Meta(m) => Some(m),
            _ => None,
        })
        .collect();

    assert_eq!(meta[0].text(), Some(b"piano".as_slice()));
    assert_eq!(meta[1].micros_per_quarter_note(), Some(500_000));
    assert_eq!(
        meta[2].as_time_signature(),
        Some(TimeSignature {
            numerator: 6,
            denominator_power: 3,
            clocks_per_click: 36,
            thirty_seconds_per_quarter: 8,
        })
    );
    assert_eq!(
        meta[3].as_key_signature(),
        Some(KeySignature {
            accidentals: -3,
            minor: true
        })
    );
    assert_eq!(meta[4].meta_type(), MetaType::Unknown(0x60));
    assert!(meta[5].is_end_of_track());
}

#[test]
fn running_status_decodes_to_the_same_events() {
    let compressed = [
        0x00, 0x90, 0x3C, 0x64, 0x00, 0x40, 0x64, 0x00, 0x43, 0x64, //
        0x60, 0x3C, 0x00, 0x00, 0x40, 0x00, 0x00, 0x43, 0x00,
    ];
    let events = decode_track(&compressed).unwrap();
    assert_eq!(events.len(), 6);

    let expanded = encode_track(&events).unwrap();
    assert_eq!(expanded.len(), compressed.len() + 5);
    assert_eq!(decode_track(&expanded).unwrap(), events);

    let config = WriterConfig::default().with_running_status(true);
    assert_eq!(encode_track_with(&events, config).unwrap(), compressed);
}

#[test]
fn composed_events_round_trip() {
    let events = vec![
        TrackEvent::new(0, MetaMessage::tempo(400_000).unwrap()),
        TrackEvent::new(
            0,
            ChannelVoiceMessage::new(
                Channel::Ten,
                VoiceEvent::ControlChange {
                    controller: byte(0x40),
                    value: byte(0x7F),
                },
            ),
        ),
        TrackEvent::new(
            96,
            ChannelVoiceMessage::pitch_bend(Channel::Ten, DataWord::new(300).unwrap()),
        ),
        TrackEvent::new(
            0,
            SystemExclusiveMessage::new(vec![0x7E, 0x7F, 0x09, 0x01, 0xF7]),
        ),
        TrackEvent::new(1_000_000, MetaMessage::end_of_track()),
    ];

    let payload = encode_track(&events).unwrap();
    assert_eq!(decode_track(&payload).unwrap(), events);

    let compressed = encode_track_with(&events, WriterConfig::default().with_running_status(true));
    assert_eq!(decode_track(&compressed.unwrap()).unwrap(), events);
}

#[test]
fn pitch_bend_keeps_its_value() {
    let bend = ChannelVoiceMessage::pitch_bend(Channel::One, DataWord::new(300).unwrap());
    let bytes = bend.to_bytes().unwrap();
    assert_eq!(bytes, [0xE0, 0x2C, 0x02]);

    let (decoded, read) = ChannelVoiceMessage::decode(bytes[0], &bytes[1..]).unwrap();
    assert_eq!(read, 2);
    assert_eq!(
        decoded.event(),
        &VoiceEvent::PitchBend {
            value: DataWord::new(300).unwrap()
        }
    );
}

#[test]
fn non_minimal_delta_time_is_rewritten_minimally() {
    let padded = [0x80, 0x00, 0xF8];
    let events = decode_track(&padded).unwrap();
    assert_eq!(events[0].delta_time(), 0);
    assert_eq!(encode_track(&events).unwrap(), [0x00, 0xF8]);
}

#[test]
fn out_of_range_values_fail_to_encode() {
    let events = [TrackEvent::new(0x1000_0000, SystemRealTimeMessage::Stop)];
    assert_eq!(
        encode_track(&events),
        Err(WriteError::VlqOutOfRange(0x1000_0000))
    );
    assert_eq!(
        MetaMessage::tempo(0x0100_0000),
        Err(WriteError::TempoOutOfRange(0x0100_0000))
    );
}

#[test]
fn vlq_vectors() {
    for (bytes, value) in [
        (&[0x00][..], 0),
        (&[0x7F][..], 127),
        (&[0x81, 0x00][..], 128),
        (&[0x87, 0x68][..], 1000),
        (&[0xFF, 0x7F][..], 16383),
        (&[0xBD, 0x84, 0x40][..], 1_000_000),
        (&[0xFF, 0xFF, 0xFF, 0x7F][..], 0x0FFF_FFFF),
    ] {
        assert_eq!(decode_vlq(bytes), Ok((value, bytes.len())));
        assert_eq!(encode_vlq(value).unwrap(), bytes);
    }
    assert!(decode_vlq(&[0xFF, 0xFF]).is_err());
}
