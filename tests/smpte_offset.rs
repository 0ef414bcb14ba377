use mtrk::prelude::*;
use pretty_assertions::assert_eq;

/// A format 0 file with SMPTE timing whose only track starts with an SMPTE offset.
fn file_with_offset(fps: SmpteFps, offset: [u8; 4]) -> Vec<u8> {
    let [minute, second, frame, subframe] = offset;
    let rate_bits = match fps {
        SmpteFps::TwentyFour => 0b00,
        SmpteFps::TwentyFive => 0b01,
        SmpteFps::TwentyNine => 0b10,
        SmpteFps::Thirty => 0b11,
    };
    file_with_offset_bytes(fps, [rate_bits << 5, minute, second, frame, subframe])
}

fn file_with_offset_bytes(fps: SmpteFps, offset: [u8; 5]) -> Vec<u8> {
    let mut track = vec![0x00, 0xFF, 0x54, 0x05];
    track.extend_from_slice(&offset);
    track.extend_from_slice(&[
        0x00, 0x90, 0x3C, 0x64, // middle C
        0x60, 0x80, 0x3C, 0x40, //
        0x00, 0xFF, 0x2F, 0x00,
    ]);

    let mut out = Vec::new();
    Header::new(FormatType::SingleMultiChannel, 1, Timing::new_smpte(fps, 40))
        .to_chunk()
        .write(&mut out)
        .unwrap();
    RawChunk::new(*b"MTrk", track).write(&mut out).unwrap();
    out
}

fn with_hour(mut bytes: Vec<u8>, hour: u8) -> Vec<u8> {
    // header chunk, track prefix, delta-time, FF 54 05
    bytes[14 + 8 + 4] |= hour;
    bytes
}

fn offsets(bytes: &[u8]) -> Vec<SmpteOffset> {
    let file = MidiFile::parse(bytes).unwrap();
    file.tracks()
        .flat_map(|t| t.events())
        .filter_map(|e| match e.message() {
            TrackMessage::Meta(m) => m.as_smpte_offset(),
            _ => None,
        })
        .collect::<Result<_, _>>()
        .unwrap()
}

fn only_offset(bytes: &[u8]) -> SmpteOffset {
    let offsets = offsets(bytes);
    assert_eq!(offsets.len(), 1);
    offsets[0]
}

#[test]
fn offset_at_24_fps() {
    let bytes = with_hour(file_with_offset(SmpteFps::TwentyFour, [30, 15, 18, 50]), 12);
    let file = MidiFile::parse(&bytes).unwrap();
    let Timing::Smpte(smpte) = file.timing() else {
        panic!("expected SMPTE timing");
    };
    assert_eq!(smpte.fps(), SmpteFps::TwentyFour);
    assert_eq!(smpte.ticks_per_frame(), 40);

    let offset = only_offset(&bytes);
    assert_eq!(
        offset,
        SmpteOffset {
            fps: SmpteFps::TwentyFour,
            hour: 12,
            minute: 30,
            second: 15,
            frame: 18,
            subframe: 50,
        }
    );

    let expected = (12. * 3600. + 30. * 60. + 15.) * 1_000_000.
        + (18. / 24.) * 1_000_000.
        + (0.5 / 24.) * 1_000_000.;
    assert!((offset.as_micros() - expected).abs() < 0.01);
}

#[test]
fn offset_at_drop_frame() {
    let bytes = with_hour(file_with_offset(SmpteFps::TwentyNine, [59, 59, 28, 99]), 23);
    let offset = only_offset(&bytes);
    assert_eq!(offset.fps, SmpteFps::TwentyNine);
    assert_eq!(offset.hour, 23);

    let expected = 86_399_000_000. + 28. * 1_001_000. / 30. + 99. * 10_010. / 30.;
    assert!((offset.as_micros() - expected).abs() < 0.01);
}

#[test]
fn offset_at_25_and_30_fps() {
    let pal = only_offset(&file_with_offset(SmpteFps::TwentyFive, [0, 1, 12, 75]));
    assert_eq!(pal.fps, SmpteFps::TwentyFive);
    assert_eq!((pal.second, pal.frame, pal.subframe), (1, 12, 75));

    let ntsc = only_offset(&with_hour(
        file_with_offset(SmpteFps::Thirty, [23, 45, 15, 0]),
        1,
    ));
    assert_eq!(ntsc.fps, SmpteFps::Thirty);
    assert!((ntsc.as_micros() - (5025.5 * 1_000_000.)).abs() < 0.01);
}

#[test]
fn override_with_header_frame_rate() {
    let bytes = with_hour(file_with_offset(SmpteFps::TwentyFour, [20, 30, 12, 50]), 10);
    let file = MidiFile::parse(&bytes).unwrap();
    let Timing::Smpte(smpte) = file.timing() else {
        panic!("expected SMPTE timing");
    };

    let offset = only_offset(&bytes);
    let same = offset.as_micros_with_override(smpte.fps());
    assert!((offset.as_micros() - same).abs() < 0.01);

    let other = offset.as_micros_with_override(SmpteFps::Thirty);
    assert!((offset.as_micros() - other).abs() > 1.0);
}

#[test]
fn offsets_of_several_tracks() {
    let mut bytes = Vec::new();
    Header::new(
        FormatType::Simultaneous,
        2,
        Timing::new_smpte(SmpteFps::TwentyFive, 40),
    )
    .to_chunk()
    .write(&mut bytes)
    .unwrap();

    for minute_second in [[0x00, 0x0A], [0x01, 0x00]] {
        let [minute, second] = minute_second;
        let track: [u8; 13] = [
            0x00, 0xFF, 0x54, 0x05, 0x20, minute, second, 0x00, 0x00, //
            0x00, 0xFF, 0x2F, 0x00,
        ];
        RawChunk::new(*b"MTrk", track.as_slice())
            .write(&mut bytes)
            .unwrap();
    }

    let offsets = offsets(&bytes);
    assert_eq!(offsets.len(), 2);
    assert_eq!((offsets[0].minute, offsets[0].second), (0, 10));
    assert_eq!((offsets[1].minute, offsets[1].second), (1, 0));

    let gap = offsets[1].as_micros() - offsets[0].as_micros();
    assert!((gap - 50_000_000.).abs() < 1.);
}

#[test]
fn malformed_offset_does_not_fail_the_track() {
    // minute 75
    let bytes = file_with_offset_bytes(SmpteFps::TwentyFour, [0x00, 75, 0, 0, 0]);
    let file = MidiFile::parse(&bytes).unwrap();
    let track = file.tracks().next().unwrap();

    let TrackMessage::Meta(meta) = track.events()[0].message() else {
        panic!("expected a meta message");
    };
    assert_eq!(meta.as_smpte_offset(), Some(Err(SmpteError::MinuteOffset(75))));
}

#[test]
fn constructed_offset_round_trips() {
    let offset = SmpteOffset {
        fps: SmpteFps::TwentyFive,
        hour: 2,
        minute: 4,
        second: 6,
        frame: 8,
        subframe: 10,
    };
    let meta = MetaMessage::smpte_offset(offset).unwrap();
    assert_eq!(meta.to_bytes().unwrap(), [0xFF, 0x54, 0x05, 0x22, 4, 6, 8, 10]);
    assert_eq!(meta.as_smpte_offset(), Some(Ok(offset)));
}

#[test]
fn constructed_offset_out_of_range() {
    let offset = SmpteOffset {
        fps: SmpteFps::Thirty,
        hour: 40,
        minute: 0,
        second: 0,
        frame: 0,
        subframe: 0,
    };
    assert_eq!(
        MetaMessage::smpte_offset(offset),
        Err(WriteError::InvalidSmpteOffset(SmpteError::HourOffset(40)))
    );

    for (offset, err) in [
        (SmpteOffset { hour: 24, ..offset }, SmpteError::HourOffset(24)),
        (SmpteOffset { hour: 0, second: 60, ..offset }, SmpteError::SecondOffset(60)),
        (SmpteOffset { hour: 0, subframe: 100, ..offset }, SmpteError::Subframe(100)),
    ] {
        assert_eq!(
            MetaMessage::smpte_offset(offset),
            Err(WriteError::InvalidSmpteOffset(err))
        );
    }
}
