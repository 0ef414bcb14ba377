use mtrk::prelude::*;
use pretty_assertions::assert_eq;

/// `0rrhhhhh mm ss ff sf`
fn offset_bytes(rate: u8, hour: u8, minute: u8, second: u8, frame: u8, subframe: u8) -> [u8; 5] {
    [(rate << 5) | (hour & 0x1F), minute, second, frame, subframe]
}

#[test]
fn wrong_length() {
    for len in [0, 3, 4, 6] {
        let data = vec![0u8; len];
        assert_eq!(SmpteOffset::parse(&data), Err(SmpteError::Length(len)));
    }
}

#[test]
fn high_bit_in_hour_byte() {
    // rate bits 4..=7 need the top bit of the hour byte
    for rate in 4..=7 {
        let data = offset_bytes(rate, 12, 30, 15, 10, 50);
        assert_eq!(SmpteOffset::parse(&data), Err(SmpteError::TrackFrame(rate)));
    }
}

#[test]
fn out_of_range_fields() {
    let cases = [
        (offset_bytes(0, 24, 0, 0, 0, 0), SmpteError::HourOffset(24)),
        (offset_bytes(0, 31, 0, 0, 0, 0), SmpteError::HourOffset(31)),
        (offset_bytes(0, 12, 60, 30, 15, 50), SmpteError::MinuteOffset(60)),
        (offset_bytes(0, 12, 255, 30, 15, 50), SmpteError::MinuteOffset(255)),
        (offset_bytes(1, 12, 30, 60, 15, 50), SmpteError::SecondOffset(60)),
        (offset_bytes(2, 12, 30, 45, 15, 100), SmpteError::Subframe(100)),
        (offset_bytes(2, 12, 30, 45, 15, 255), SmpteError::Subframe(255)),
    ];
    for (data, expected) in cases {
        assert_eq!(SmpteOffset::parse(&data), Err(expected), "parsing {data:?}");
    }
}

#[test]
fn first_bad_field_is_reported() {
    assert_eq!(
        SmpteOffset::parse(&offset_bytes(0, 25, 61, 30, 15, 50)),
        Err(SmpteError::HourOffset(25))
    );
    assert_eq!(
        SmpteOffset::parse(&offset_bytes(1, 23, 60, 60, 15, 50)),
        Err(SmpteError::MinuteOffset(60))
    );
}

#[test]
fn frame_is_not_range_checked() {
    // the frame bound depends on the rate, so 30 frames at 24 fps still parses
    let offset = SmpteOffset::parse(&offset_bytes(0, 0, 0, 0, 30, 0)).unwrap();
    assert_eq!(offset.frame, 30);
}

#[test]
fn every_rate_and_hour() {
    let rates = [
        SmpteFps::TwentyFour,
        SmpteFps::TwentyFive,
        SmpteFps::TwentyNine,
        SmpteFps::Thirty,
    ];
    for (bits, fps) in (0u8..).zip(rates) {
        for hour in 0..=23 {
            let data = offset_bytes(bits, hour, 59, 59, 0, 99);
            let offset = SmpteOffset::parse(&data).unwrap();
            assert_eq!((offset.fps, offset.hour), (fps, hour));
            assert_eq!(offset.to_bytes(), data);
        }
    }
}

#[test]
fn micros_edge_cases() {
    let midnight = SmpteOffset::parse(&offset_bytes(1, 0, 0, 0, 0, 0)).unwrap();
    assert_eq!(midnight.as_micros(), 0.0);

    let one_frame = SmpteOffset::parse(&offset_bytes(2, 0, 0, 0, 1, 0)).unwrap();
    // 1001/30000 of a second
    assert!((one_frame.as_micros() - 1_001_000.0 / 30.0).abs() < 0.001);

    let hour_and_frames = SmpteOffset::parse(&offset_bytes(0, 1, 0, 0, 12, 0)).unwrap();
    for (fps, rate) in [
        (SmpteFps::TwentyFour, 24.0),
        (SmpteFps::TwentyFive, 25.0),
        (SmpteFps::Thirty, 30.0),
    ] {
        let expected = 3_600_000_000.0 + 12.0 / rate * 1_000_000.0;
        assert!((hour_and_frames.as_micros_with_override(fps) - expected).abs() < 1.0);
    }
}
