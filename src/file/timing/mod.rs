mod smpte;
pub use smpte::*;

use crate::ParseError;

/// How delta-times in the file map to time.
///
/// Stored in the last two bytes of the header chunk. A clear top bit means ticks
/// per quarter note; a set top bit means SMPTE frames and ticks per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Timing {
    /// Delta-times count fractions of a quarter note
    TicksPerQuarterNote(TicksPerQuarterNote),

    /// Delta-times count fractions of an SMPTE frame
    Smpte(SmpteHeader),
}

impl Timing {
    /// The tick rate per quarter note.
    ///
    /// The leading bit of the u16 is disregarded, so 1-32767
    pub const fn new_ticks_per_quarter_note(tpqn: u16) -> Self {
        Self::TicksPerQuarterNote(TicksPerQuarterNote(tpqn & 0x7FFF))
    }

    /// Define the timing in terms of fps and ticks per frame
    pub const fn new_smpte(fps: SmpteFps, ticks_per_frame: u8) -> Self {
        Self::Smpte(SmpteHeader {
            fps,
            ticks_per_frame,
        })
    }

    /// Read the division word of a header chunk
    pub const fn parse(bytes: [u8; 2]) -> Result<Self, ParseError> {
        if bytes[0] & 0x80 == 0 {
            return Ok(Self::TicksPerQuarterNote(TicksPerQuarterNote(
                u16::from_be_bytes(bytes),
            )));
        }
        match SmpteFps::from_header_byte(bytes[0] as i8) {
            Ok(fps) => Ok(Self::new_smpte(fps, bytes[1])),
            Err(e) => Err(ParseError::Smpte(e)),
        }
    }

    /// The division word of a header chunk
    pub const fn to_bytes(&self) -> [u8; 2] {
        match self {
            Self::TicksPerQuarterNote(t) => t.0.to_be_bytes(),
            Self::Smpte(s) => [s.fps.header_byte() as u8, s.ticks_per_frame],
        }
    }

    /// Returns Some if the midi timing is defined
    /// as ticks per quarter note
    pub const fn ticks_per_quarter_note(&self) -> Option<u16> {
        match self {
            Self::TicksPerQuarterNote(t) => Some(t.ticks_per_quarter_note()),
            _ => None,
        }
    }
}

/// A representation of the `tpqn` timing for a MIDI file
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TicksPerQuarterNote(u16);

impl TicksPerQuarterNote {
    /// Returns the ticks per quarter note for the file.
    pub const fn ticks_per_quarter_note(&self) -> u16 {
        self.0
    }
}

/// A representation of the `smpte` timing for a MIDI file
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmpteHeader {
    fps: SmpteFps,
    ticks_per_frame: u8,
}

impl SmpteHeader {
    /// Returns the frames per second
    pub const fn fps(&self) -> SmpteFps {
        self.fps
    }

    /// Returns the ticks per frame
    pub const fn ticks_per_frame(&self) -> u8 {
        self.ticks_per_frame
    }

    /// Ticks per second at the nominal frame rate
    pub const fn ticks_per_second(&self) -> u32 {
        self.fps.as_division() as u32 * self.ticks_per_frame as u32
    }
}

#[test]
fn parse_ticks_per_quarter_note() {
    use pretty_assertions::assert_eq;
    let timing = Timing::parse([0x01, 0xE0]).unwrap();
    assert_eq!(timing.ticks_per_quarter_note(), Some(480));
    assert_eq!(timing.to_bytes(), [0x01, 0xE0]);
}

#[test]
fn parse_smpte_division() {
    use crate::SmpteError;
    use pretty_assertions::assert_eq;
    // -25 fps, 40 ticks per frame
    let timing = Timing::parse([0xE7, 0x28]).unwrap();
    let Timing::Smpte(smpte) = timing else {
        panic!("expected SMPTE timing, got {timing:?}");
    };
    assert_eq!(smpte.fps(), SmpteFps::TwentyFive);
    assert_eq!(smpte.ticks_per_second(), 1000);
    assert_eq!(timing.to_bytes(), [0xE7, 0x28]);

    assert_eq!(
        Timing::parse([0xE6, 0x28]),
        Err(ParseError::Smpte(SmpteError::HeaderFrameTime(-26)))
    );
}
