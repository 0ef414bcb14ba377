#![doc = r#"
System common messages

```text
F2 0lllllll 0mmmmmmm   song position pointer (lsb, msb)
F3 0sssssss            song select
F6                     tune request
```

System exclusive (`F0`/`F7`) is also a system common message on the wire,
but in a track chunk it is length-prefixed, so it has its own module:
[`sysex`](super::sysex).
"#]

use alloc::vec::Vec;

use crate::{
    DataByte, DataWord, ParseError,
    message::{Decode, Encode},
    writer::WriteResult,
};

const SONG_POSITION_POINTER: u8 = 0xF2;
const SONG_SELECT: u8 = 0xF3;
const TUNE_REQUEST: u8 = 0xF6;

/// A system common message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SystemCommonMessage {
    /// Beats (sixteenth notes) since the start of the song, joined from two data bytes
    SongPositionPointer(DataWord),
    /// Select a song or sequence
    SongSelect(DataByte),
    /// Ask analog synthesizers to tune their oscillators
    TuneRequest,
}

impl SystemCommonMessage {
    /// The status byte of this message
    pub const fn status(&self) -> u8 {
        match self {
            Self::SongPositionPointer(_) => SONG_POSITION_POINTER,
            Self::SongSelect(_) => SONG_SELECT,
            Self::TuneRequest => TUNE_REQUEST,
        }
    }

    const fn data_len(status: u8) -> Option<usize> {
        match status {
            SONG_POSITION_POINTER => Some(2),
            SONG_SELECT => Some(1),
            TUNE_REQUEST => Some(0),
            _ => None,
        }
    }
}

impl<'slc> Decode<'slc> for SystemCommonMessage {
    fn decode(status: u8, data: &'slc [u8]) -> Result<(Self, usize), ParseError> {
        let expected = Self::data_len(status).ok_or(ParseError::UnknownStatusByte(status))?;
        let Some(bytes) = data.get(..expected) else {
            return Err(ParseError::TruncatedSystemCommon {
                expected,
                available: data.len(),
            });
        };

        let message = match status {
            SONG_POSITION_POINTER => Self::SongPositionPointer(DataWord::from_bytes(
                DataByte::new(bytes[0])?,
                DataByte::new(bytes[1])?,
            )),
            SONG_SELECT => Self::SongSelect(DataByte::new(bytes[0])?),
            _ => Self::TuneRequest,
        };
        Ok((message, expected))
    }
}

impl Encode for SystemCommonMessage {
    fn encode(&self, out: &mut Vec<u8>) -> WriteResult<()> {
        out.push(self.status());
        match self {
            Self::SongPositionPointer(position) => {
                out.push(position.lsb().value());
                out.push(position.msb().value());
            }
            Self::SongSelect(song) => out.push(song.value()),
            Self::TuneRequest => {}
        }
        Ok(())
    }
}

#[test]
fn decode_song_position_pointer() {
    use pretty_assertions::assert_eq;
    let (msg, read) = SystemCommonMessage::decode(0xF2, &[0x7F, 0x01, 0x00]).unwrap();
    assert_eq!(read, 2);
    assert_eq!(
        msg,
        SystemCommonMessage::SongPositionPointer(DataWord::new(0xFF).unwrap())
    );
    assert_eq!(msg.to_bytes().unwrap(), [0xF2, 0x7F, 0x01]);
}

#[test]
fn decode_song_select_and_tune_request() {
    use pretty_assertions::assert_eq;
    let (msg, read) = SystemCommonMessage::decode(0xF3, &[0x05]).unwrap();
    assert_eq!((msg, read), (SystemCommonMessage::SongSelect(DataByte(5)), 1));

    let (msg, read) = SystemCommonMessage::decode(0xF6, &[]).unwrap();
    assert_eq!((msg, read), (SystemCommonMessage::TuneRequest, 0));
    assert_eq!(msg.to_bytes().unwrap(), [0xF6]);
}

#[test]
fn decode_truncated_system_common() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        SystemCommonMessage::decode(0xF2, &[0x01]),
        Err(ParseError::TruncatedSystemCommon {
            expected: 2,
            available: 1
        })
    );
    assert_eq!(
        SystemCommonMessage::decode(0xF1, &[0x01]),
        Err(ParseError::UnknownStatusByte(0xF1))
    );
}
