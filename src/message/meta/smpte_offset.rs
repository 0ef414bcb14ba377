#![doc = r#"
SMPTE offset meta messages (`FF 54 05 hr mn se fr ff`)

The offset names the SMPTE time at which a track is meant to start.
"#]

use crate::{SmpteError, file::SmpteFps};

/// A track's starting position in SMPTE time code.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmpteOffset {
    /// The frame rate, stored in bits 5-6 of the hour byte.
    pub fps: SmpteFps,
    /// `0..=23`
    pub hour: u8,
    /// `0..=59`
    pub minute: u8,
    /// `0..=59`
    pub second: u8,
    /// Frame within the second. Not range checked, since its bound depends on `fps`.
    pub frame: u8,
    /// Hundredths of a frame, `0..=99`
    pub subframe: u8,
}

impl SmpteOffset {
    /// The data length of an SMPTE offset meta message
    pub const LEN: usize = 5;

    /// Microseconds from 00:00:00:00 to this offset.
    pub const fn as_micros(&self) -> f64 {
        self.as_micros_with_override(self.fps)
    }

    /// Microseconds from 00:00:00:00 to this offset, counting frames at `fps`.
    ///
    /// Files with SMPTE timing should use the frame rate of their header division.
    pub const fn as_micros_with_override(&self, fps: SmpteFps) -> f64 {
        let whole_seconds =
            (self.hour as u64 * 3600) + (self.minute as u64 * 60) + self.second as u64;
        (whole_seconds * 1_000_000) as f64
            + (self.frame as u64 * 1_000_000) as f64 / fps.as_f64()
            + (self.subframe as u64 * 10_000) as f64 / fps.as_f64()
    }

    /// Parse the 5 data bytes of the meta message.
    ///
    /// ```text
    /// 0rrhhhhh  rr: 00 = 24fps, 01 = 25fps, 10 = 29.97fps, 11 = 30fps
    /// minute second frame subframe
    /// ```
    pub const fn parse(data: &[u8]) -> Result<Self, SmpteError> {
        if data.len() != Self::LEN {
            return Err(SmpteError::Length(data.len()));
        }

        let fps = match data[0] >> 5 {
            0 => SmpteFps::TwentyFour,
            1 => SmpteFps::TwentyFive,
            2 => SmpteFps::TwentyNine,
            3 => SmpteFps::Thirty,
            v => return Err(SmpteError::TrackFrame(v)),
        };
        let offset = Self {
            fps,
            hour: data[0] & 0b0001_1111,
            minute: data[1],
            second: data[2],
            frame: data[3],
            subframe: data[4],
        };
        match offset.check() {
            Ok(()) => Ok(offset),
            Err(e) => Err(e),
        }
    }

    /// Check the fields against the ranges the meta message can carry.
    ///
    /// # Errors
    /// The first of hour, minute, second and subframe that is out of range.
    pub const fn check(&self) -> Result<(), SmpteError> {
        if self.hour > 23 {
            return Err(SmpteError::HourOffset(self.hour));
        }
        if self.minute > 59 {
            return Err(SmpteError::MinuteOffset(self.minute));
        }
        if self.second > 59 {
            return Err(SmpteError::SecondOffset(self.second));
        }
        if self.subframe > 99 {
            return Err(SmpteError::Subframe(self.subframe));
        }
        Ok(())
    }

    /// The 5 data bytes of the meta message.
    ///
    /// Fields are written as they are; see [`check`](Self::check).
    pub const fn to_bytes(&self) -> [u8; 5] {
        let rate = match self.fps {
            SmpteFps::TwentyFour => 0,
            SmpteFps::TwentyFive => 1,
            SmpteFps::TwentyNine => 2,
            SmpteFps::Thirty => 3,
        };
        [
            (rate << 5) | (self.hour & 0b0001_1111),
            self.minute,
            self.second,
            self.frame,
            self.subframe,
        ]
    }
}

#[test]
fn parse_smpte_offset() {
    use pretty_assertions::assert_eq;
    // the bytes after 00 FF 54 05
    let bytes = [0x41, 0x17, 0x2D, 0x0C, 0x22];
    let offset = SmpteOffset::parse(&bytes).unwrap();

    assert_eq!(offset.fps, SmpteFps::TwentyNine);
    assert_eq!(offset.hour, 1);
    assert_eq!(offset.minute, 23);
    assert_eq!(offset.second, 45);
    assert_eq!(offset.frame, 12);
    assert_eq!(offset.subframe, 34);
    assert_eq!(offset.to_bytes(), bytes);
}

#[test]
fn parse_invalid_smpte_offset() {
    use pretty_assertions::assert_eq;
    let err = SmpteOffset::parse(&[0x7F, 0x17, 0x2D, 0x0C, 0x22]).unwrap_err();
    assert_eq!(err, SmpteError::HourOffset(31));

    let err = SmpteOffset::parse(&[0x41, 0x50, 0x2D, 0x0C, 0x22]).unwrap_err();
    assert_eq!(err, SmpteError::MinuteOffset(80));
}

#[test]
fn check_rejects_what_parse_rejects() {
    use pretty_assertions::assert_eq;
    let offset = SmpteOffset {
        fps: SmpteFps::Thirty,
        hour: 23,
        minute: 59,
        second: 59,
        frame: 29,
        subframe: 99,
    };
    assert_eq!(offset.check(), Ok(()));

    let hour = SmpteOffset { hour: 40, ..offset };
    assert_eq!(hour.check(), Err(SmpteError::HourOffset(40)));
    let second = SmpteOffset { second: 60, subframe: 100, ..offset };
    assert_eq!(second.check(), Err(SmpteError::SecondOffset(60)));
    let subframe = SmpteOffset { subframe: 100, ..offset };
    assert_eq!(subframe.check(), Err(SmpteError::Subframe(100)));
}
