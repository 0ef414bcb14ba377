use crate::ParseError;

#[doc = r#"
A MIDI data byte.

Data bytes carry 7 bits of information; the leading bit is always `0`,
which is what separates them from status bytes on the wire.

# Example
```rust
# use mtrk::prelude::*;
let byte = DataByte::new(100).unwrap();
assert_eq!(byte.value(), 100);

assert!(DataByte::new(0x90).is_err());
```
"#]
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataByte(pub(crate) u8);

impl DataByte {
    /// Create a new data byte.
    ///
    /// Checks for correctness (leading 0 bit).
    pub const fn new(byte: u8) -> Result<Self, ParseError> {
        if byte > 0x7F {
            return Err(ParseError::InvalidDataByte(byte));
        }
        Ok(Self(byte))
    }

    /// Creates a data byte from the lower 7 bits of `byte`, discarding the leading bit.
    pub const fn new_unchecked(byte: u8) -> Self {
        Self(byte & 0x7F)
    }

    /// Returns the underlying byte
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for DataByte {
    type Error = ParseError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DataByte> for u8 {
    fn from(value: DataByte) -> Self {
        value.0
    }
}

#[doc = r#"
A 14-bit value spread across two data bytes.

Pitch bend and song position pointer messages transmit the least significant
7 bits first. The combined value is `(msb << 7) | lsb`.

# Example
```rust
# use mtrk::prelude::*;
let word = DataWord::new(300).unwrap();
assert_eq!(word.lsb().value(), (300u16 & 0x7F) as u8);
assert_eq!(word.msb().value(), (300u16 >> 7) as u8);

let joined = DataWord::from_bytes(word.lsb(), word.msb());
assert_eq!(joined.value(), 300);
```
"#]
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataWord(u16);

impl DataWord {
    /// The largest representable value, `0x3FFF`
    pub const MAX: Self = Self(0x3FFF);

    /// A pitch bend of this value means no bend at all.
    pub const PITCH_BEND_CENTER: Self = Self(0x2000);

    /// Create a new 14-bit value
    pub const fn new(value: u16) -> Result<Self, ParseError> {
        if value > Self::MAX.0 {
            return Err(ParseError::InvalidDataWord(value));
        }
        Ok(Self(value))
    }

    /// Join two data bytes as they appear on the wire.
    pub const fn from_bytes(lsb: DataByte, msb: DataByte) -> Self {
        Self(((msb.0 as u16) << 7) | lsb.0 as u16)
    }

    /// The least significant 7 bits, sent first.
    pub const fn lsb(&self) -> DataByte {
        DataByte((self.0 & 0x7F) as u8)
    }

    /// The most significant 7 bits, sent second.
    pub const fn msb(&self) -> DataByte {
        DataByte((self.0 >> 7) as u8)
    }

    /// Returns the combined value
    pub const fn value(&self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for DataWord {
    type Error = ParseError;
    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[test]
fn data_byte_rejects_status_bytes() {
    use pretty_assertions::assert_eq;
    assert_eq!(DataByte::new(0x80), Err(ParseError::InvalidDataByte(0x80)));
    assert_eq!(DataByte::new(0x7F).map(|b| b.value()), Ok(0x7F));
    assert_eq!(DataByte::new_unchecked(0xC5).value(), 0x45);
}

#[test]
fn data_word_joins_least_significant_first() {
    use pretty_assertions::assert_eq;
    let word = DataWord::from_bytes(DataByte(0x2C), DataByte(0x02));
    assert_eq!(word.value(), 300);

    let max = DataWord::from_bytes(DataByte(0x7F), DataByte(0x7F));
    assert_eq!(max, DataWord::MAX);

    assert_eq!(DataWord::new(0x4000), Err(ParseError::InvalidDataWord(0x4000)));
}
