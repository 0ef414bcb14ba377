#![doc = r#"
SMPTE time code frame rates

A file may measure its delta-times in fractions of a video frame rather than
fractions of a quarter note. MIDI admits four frame rates:
- 24 fps: film
- 25 fps: PAL/SECAM video
- 29.97 fps: NTSC colour video, "drop frame"
- 30 fps: NTSC black & white video
"#]

use crate::SmpteError;

/// The possible FPS (Frames Per Second) for MIDI tracks and files
///
/// # Drop-Frame Timecode
///
/// [`SmpteFps::TwentyNine`] is 30000/1001 fps. No frames are dropped; the time
/// code numbering skips values to stay aligned with real time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmpteFps {
    /// 24 frames per second
    TwentyFour,
    /// 25 frames per second
    TwentyFive,
    /// 29.97 frames per second (30000/1001)
    TwentyNine,
    /// 30 frames per second
    Thirty,
}

impl SmpteFps {
    /// Read the negative frame rate stored in the high byte of a header division.
    pub const fn from_header_byte(byte: i8) -> Result<Self, SmpteError> {
        Ok(match byte {
            -24 => Self::TwentyFour,
            -25 => Self::TwentyFive,
            -29 => Self::TwentyNine,
            -30 => Self::Thirty,
            _ => return Err(SmpteError::HeaderFrameTime(byte)),
        })
    }

    /// The frame rate as stored in the high byte of a header division.
    pub const fn header_byte(&self) -> i8 {
        match self {
            Self::TwentyFour => -24,
            Self::TwentyFive => -25,
            Self::TwentyNine => -29,
            Self::Thirty => -30,
        }
    }

    /// The nominal frame rate. Drop frame counts as 30.
    pub const fn as_division(&self) -> u8 {
        match self {
            Self::TwentyFour => 24,
            Self::TwentyFive => 25,
            Self::TwentyNine | Self::Thirty => 30,
        }
    }

    /// The exact frame rate, including the fractional drop frame rate.
    pub const fn as_f64(&self) -> f64 {
        match self {
            Self::TwentyFour => 24.,
            Self::TwentyFive => 25.,
            Self::TwentyNine => DROP_FRAME,
            Self::Thirty => 30.,
        }
    }
}

const DROP_FRAME: f64 = 30_000. / 1001.;

#[test]
fn header_bytes() {
    use pretty_assertions::assert_eq;
    for fps in [
        SmpteFps::TwentyFour,
        SmpteFps::TwentyFive,
        SmpteFps::TwentyNine,
        SmpteFps::Thirty,
    ] {
        assert_eq!(SmpteFps::from_header_byte(fps.header_byte()), Ok(fps));
    }
    assert_eq!(
        SmpteFps::from_header_byte(-26),
        Err(SmpteError::HeaderFrameTime(-26))
    );
}
