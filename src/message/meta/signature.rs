/// The payload of a time signature meta message, `FF 58 04 nn dd cc bb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSignature {
    /// Beats per bar
    pub numerator: u8,
    /// The beat unit as a power of two: `2` is a quarter note, `3` an eighth.
    pub denominator_power: u8,
    /// MIDI clocks per metronome click
    pub clocks_per_click: u8,
    /// Notated 32nd notes per MIDI quarter note, usually 8
    pub thirty_seconds_per_quarter: u8,
}

impl TimeSignature {
    /// Parse the 4 data bytes of the meta message.
    pub const fn parse(data: &[u8]) -> Option<Self> {
        match *data {
            [numerator, denominator_power, clocks_per_click, thirty_seconds_per_quarter] => {
                Some(Self {
                    numerator,
                    denominator_power,
                    clocks_per_click,
                    thirty_seconds_per_quarter,
                })
            }
            _ => None,
        }
    }

    /// The 4 data bytes of the meta message.
    pub const fn to_bytes(&self) -> [u8; 4] {
        [
            self.numerator,
            self.denominator_power,
            self.clocks_per_click,
            self.thirty_seconds_per_quarter,
        ]
    }

    /// The beat unit, e.g. `4` for a quarter note. `None` if it does not fit a `u32`.
    pub const fn denominator(&self) -> Option<u32> {
        1u32.checked_shl(self.denominator_power as u32)
    }
}

/// The payload of a key signature meta message, `FF 59 02 sf mi`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeySignature {
    /// Sharps when positive, flats when negative
    pub accidentals: i8,
    /// A minor key
    pub minor: bool,
}

impl KeySignature {
    /// Parse the 2 data bytes of the meta message.
    ///
    /// Any non-zero mode byte is read as minor.
    pub const fn parse(data: &[u8]) -> Option<Self> {
        match *data {
            [accidentals, mode] => Some(Self {
                accidentals: accidentals as i8,
                minor: mode != 0,
            }),
            _ => None,
        }
    }

    /// The 2 data bytes of the meta message.
    pub const fn to_bytes(&self) -> [u8; 2] {
        [self.accidentals as u8, self.minor as u8]
    }
}

#[test]
fn time_signature_six_eight() {
    use pretty_assertions::assert_eq;
    let sig = TimeSignature::parse(&[6, 3, 36, 8]).unwrap();
    assert_eq!(sig.numerator, 6);
    assert_eq!(sig.denominator(), Some(8));
    assert_eq!(sig.to_bytes(), [6, 3, 36, 8]);
    assert_eq!(TimeSignature::parse(&[4, 2, 24]), None);
}

#[test]
fn key_signature_flats() {
    use pretty_assertions::assert_eq;
    let sig = KeySignature::parse(&[0xFD, 0x01]).unwrap();
    assert_eq!(
        sig,
        KeySignature {
            accidentals: -3,
            minor: true
        }
    );
    assert_eq!(sig.to_bytes(), [0xFD, 0x01]);
}
