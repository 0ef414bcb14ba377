#![doc = r#"
Meta messages

Meta messages only exist in files. They are the byte `FF`, a type byte, a VLQ
length, and that many bytes of data:

```text
FF 51 03 07 A1 20      set tempo: 500,000 µs per quarter note
FF 2F 00               end of track
```

The payload is kept as opaque bytes so that every meta message, known or not,
is written back exactly as it was read. The typed accessors on [`MetaMessage`]
interpret the payload on demand.
"#]

mod smpte_offset;
pub use smpte_offset::*;

mod signature;
pub use signature::*;

use alloc::{borrow::Cow, vec::Vec};
use num_enum::FromPrimitive;

use crate::{
    ParseError, SmpteError,
    message::{Decode, Encode},
    vlq,
    writer::{WriteError, WriteResult},
};

/// The status byte of every meta message
pub const META_STATUS: u8 = 0xFF;

/// The type byte of a meta message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MetaType {
    /// `00`: the number of a sequence
    SequenceNumber = 0x00,
    /// `01`: any text
    Text = 0x01,
    /// `02`: a copyright notice
    CopyrightNotice = 0x02,
    /// `03`: the sequence or track name
    TrackName = 0x03,
    /// `04`: the instrument of the track
    InstrumentName = 0x04,
    /// `05`: a lyric, usually one syllable
    Lyric = 0x05,
    /// `06`: a rehearsal mark or section name
    Marker = 0x06,
    /// `07`: a description of a cue
    CuePoint = 0x07,
    /// `08`: the program (patch) name
    ProgramName = 0x08,
    /// `09`: the device (port) name
    DeviceName = 0x09,
    /// `20`: the channel that following meta messages apply to
    ChannelPrefix = 0x20,
    /// `21`: the output port
    Port = 0x21,
    /// `2F`: the mandatory last event of a track
    EndOfTrack = 0x2F,
    /// `51`: microseconds per quarter note
    SetTempo = 0x51,
    /// `54`: the track's SMPTE start time
    SmpteOffset = 0x54,
    /// `58`: time signature
    TimeSignature = 0x58,
    /// `59`: key signature
    KeySignature = 0x59,
    /// `7F`: data for a specific sequencer
    SequencerSpecific = 0x7F,
    /// Any other type byte
    #[num_enum(catch_all)]
    Unknown(u8),
}

impl MetaType {
    /// The type byte
    pub const fn byte(&self) -> u8 {
        match *self {
            Self::SequenceNumber => 0x00,
            Self::Text => 0x01,
            Self::CopyrightNotice => 0x02,
            Self::TrackName => 0x03,
            Self::InstrumentName => 0x04,
            Self::Lyric => 0x05,
            Self::Marker => 0x06,
            Self::CuePoint => 0x07,
            Self::ProgramName => 0x08,
            Self::DeviceName => 0x09,
            Self::ChannelPrefix => 0x20,
            Self::Port => 0x21,
            Self::EndOfTrack => 0x2F,
            Self::SetTempo => 0x51,
            Self::SmpteOffset => 0x54,
            Self::TimeSignature => 0x58,
            Self::KeySignature => 0x59,
            Self::SequencerSpecific => 0x7F,
            Self::Unknown(byte) => byte,
        }
    }

    /// The conventional name of the type
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SequenceNumber => "SequenceNumber",
            Self::Text => "Text",
            Self::CopyrightNotice => "CopyrightNotice",
            Self::TrackName => "TrackName",
            Self::InstrumentName => "InstrumentName",
            Self::Lyric => "Lyric",
            Self::Marker => "Marker",
            Self::CuePoint => "CuePoint",
            Self::ProgramName => "ProgramName",
            Self::DeviceName => "DeviceName",
            Self::ChannelPrefix => "ChannelPrefix",
            Self::Port => "Port",
            Self::EndOfTrack => "EndOfTrack",
            Self::SetTempo => "SetTempo",
            Self::SmpteOffset => "SmpteOffset",
            Self::TimeSignature => "TimeSignature",
            Self::KeySignature => "KeySignature",
            Self::SequencerSpecific => "SequencerSpecific",
            Self::Unknown(_) => "Unknown",
        }
    }

    /// Types `01` through `0F` are reserved for text.
    pub const fn is_text(&self) -> bool {
        matches!(self.byte(), 0x01..=0x0F)
    }
}

impl From<MetaType> for u8 {
    fn from(value: MetaType) -> Self {
        value.byte()
    }
}

/// A meta message: a type and its opaque payload
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetaMessage<'a> {
    meta_type: MetaType,
    data: Cow<'a, [u8]>,
}

impl<'a> MetaMessage<'a> {
    /// Create a meta message from its type and payload
    pub fn new<B>(meta_type: MetaType, data: B) -> Self
    where
        B: Into<Cow<'a, [u8]>>,
    {
        Self {
            meta_type,
            data: data.into(),
        }
    }

    /// `FF 2F 00`
    pub const fn end_of_track() -> Self {
        Self {
            meta_type: MetaType::EndOfTrack,
            data: Cow::Borrowed(&[]),
        }
    }

    /// `FF 51 03 tt tt tt`
    ///
    /// # Errors
    /// if `micros_per_quarter_note` does not fit in 24 bits
    pub fn tempo(micros_per_quarter_note: u32) -> WriteResult<Self> {
        if micros_per_quarter_note > 0xFF_FFFF {
            return Err(WriteError::TempoOutOfRange(micros_per_quarter_note));
        }
        let [_, a, b, c] = micros_per_quarter_note.to_be_bytes();
        Ok(Self::new(MetaType::SetTempo, alloc::vec![a, b, c]))
    }

    /// `FF 58 04 nn dd cc bb`
    pub fn time_signature(signature: TimeSignature) -> Self {
        Self::new(MetaType::TimeSignature, signature.to_bytes().to_vec())
    }

    /// `FF 59 02 sf mi`
    pub fn key_signature(signature: KeySignature) -> Self {
        Self::new(MetaType::KeySignature, signature.to_bytes().to_vec())
    }

    /// `FF 54 05 hr mn se fr ff`
    ///
    /// # Errors
    /// if a field of `offset` is out of range (see [`SmpteOffset::check`])
    pub fn smpte_offset(offset: SmpteOffset) -> WriteResult<Self> {
        offset.check()?;
        Ok(Self::new(MetaType::SmpteOffset, offset.to_bytes().to_vec()))
    }

    /// The type of the message
    pub const fn meta_type(&self) -> MetaType {
        self.meta_type
    }

    /// The payload
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// True for `FF 2F`
    pub fn is_end_of_track(&self) -> bool {
        self.meta_type == MetaType::EndOfTrack
    }

    /// The payload of text types (`01..=0F`)
    pub fn text(&self) -> Option<&[u8]> {
        self.meta_type.is_text().then_some(self.data())
    }

    /// The tempo in microseconds per quarter note, if this is a well-formed tempo message
    pub fn micros_per_quarter_note(&self) -> Option<u32> {
        match (self.meta_type, self.data()) {
            (MetaType::SetTempo, &[a, b, c]) => Some(u32::from_be_bytes([0, a, b, c])),
            _ => None,
        }
    }

    /// The time signature, if this is a well-formed time signature message
    pub fn as_time_signature(&self) -> Option<TimeSignature> {
        match self.meta_type {
            MetaType::TimeSignature => TimeSignature::parse(self.data()),
            _ => None,
        }
    }

    /// The key signature, if this is a well-formed key signature message
    pub fn as_key_signature(&self) -> Option<KeySignature> {
        match self.meta_type {
            MetaType::KeySignature => KeySignature::parse(self.data()),
            _ => None,
        }
    }

    /// The SMPTE offset, if this is an SMPTE offset message
    pub fn as_smpte_offset(&self) -> Option<Result<SmpteOffset, SmpteError>> {
        match self.meta_type {
            MetaType::SmpteOffset => Some(SmpteOffset::parse(self.data())),
            _ => None,
        }
    }

    /// Detach the payload from the buffer it was decoded from.
    pub fn into_owned(self) -> MetaMessage<'static> {
        MetaMessage {
            meta_type: self.meta_type,
            data: Cow::Owned(self.data.into_owned()),
        }
    }
}

impl<'slc> Decode<'slc> for MetaMessage<'slc> {
    fn decode(status: u8, data: &'slc [u8]) -> Result<(Self, usize), ParseError> {
        if status != META_STATUS {
            return Err(ParseError::UnknownStatusByte(status));
        }
        let Some((&type_byte, rest)) = data.split_first() else {
            return Err(ParseError::TruncatedMeta {
                expected: 1,
                available: 0,
            });
        };
        let meta_type = MetaType::from_primitive(type_byte);
        let (payload, read) = vlq::read_length_prefixed(rest, |expected, available| {
            ParseError::TruncatedMeta {
                expected,
                available,
            }
        })?;

        #[cfg(feature = "tracing")]
        tracing::trace!(meta_type = meta_type.name(), len = payload.len(), "meta message");

        Ok((Self::new(meta_type, payload), read + 1))
    }
}

impl Encode for MetaMessage<'_> {
    fn encode(&self, out: &mut Vec<u8>) -> WriteResult<()> {
        let start = out.len();
        out.push(META_STATUS);
        out.push(self.meta_type.byte());
        vlq::write_length_prefixed(&self.data, out).inspect_err(|_| out.truncate(start))
    }
}

#[test]
fn decode_tempo() {
    use pretty_assertions::assert_eq;
    let (msg, read) = MetaMessage::decode(0xFF, &[0x51, 0x03, 0x07, 0xA1, 0x20, 0x00]).unwrap();
    assert_eq!(read, 5);
    assert_eq!(msg.meta_type(), MetaType::SetTempo);
    assert_eq!(msg.micros_per_quarter_note(), Some(500_000));
    assert_eq!(msg, MetaMessage::tempo(500_000).unwrap());
}

#[test]
fn decode_end_of_track() {
    use pretty_assertions::assert_eq;
    let (msg, read) = MetaMessage::decode(0xFF, &[0x2F, 0x00]).unwrap();
    assert_eq!(read, 2);
    assert!(msg.is_end_of_track());
    assert_eq!(msg, MetaMessage::end_of_track());
    assert_eq!(msg.to_bytes().unwrap(), [0xFF, 0x2F, 0x00]);
}

#[test]
fn decode_unknown_type_round_trips() {
    use pretty_assertions::assert_eq;
    let (msg, read) = MetaMessage::decode(0xFF, &[0x4B, 0x01, 0x09]).unwrap();
    assert_eq!(read, 3);
    assert_eq!(msg.meta_type(), MetaType::Unknown(0x4B));
    assert_eq!(msg.to_bytes().unwrap(), [0xFF, 0x4B, 0x01, 0x09]);
}

#[test]
fn decode_text() {
    use pretty_assertions::assert_eq;
    let (msg, _) = MetaMessage::decode(0xFF, b"\x03\x05Piano").unwrap();
    assert_eq!(msg.meta_type(), MetaType::TrackName);
    assert_eq!(msg.text(), Some(&b"Piano"[..]));
    assert_eq!(MetaMessage::end_of_track().text(), None);
}

#[test]
fn decode_truncated_meta() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        MetaMessage::decode(0xFF, &[0x01, 0x04, b'a']),
        Err(ParseError::TruncatedMeta {
            expected: 4,
            available: 1
        })
    );
    assert_eq!(
        MetaMessage::decode(0xFF, &[]),
        Err(ParseError::TruncatedMeta {
            expected: 1,
            available: 0
        })
    );
}

#[test]
fn tempo_out_of_range() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        MetaMessage::tempo(0x0100_0000),
        Err(WriteError::TempoOutOfRange(0x0100_0000))
    );
}

#[test]
fn smpte_offset_accessor() {
    use crate::file::SmpteFps;
    use pretty_assertions::assert_eq;
    let offset = SmpteOffset {
        fps: SmpteFps::Thirty,
        hour: 1,
        minute: 2,
        second: 3,
        frame: 4,
        subframe: 5,
    };
    let msg = MetaMessage::smpte_offset(offset).unwrap();
    assert_eq!(msg.as_smpte_offset(), Some(Ok(offset)));
    assert_eq!(MetaMessage::end_of_track().as_smpte_offset(), None);
}

#[test]
fn smpte_offset_out_of_range() {
    use crate::file::SmpteFps;
    use pretty_assertions::assert_eq;
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

    let offset = SmpteOffset { hour: 1, minute: 60, ..offset };
    assert_eq!(
        MetaMessage::smpte_offset(offset),
        Err(WriteError::InvalidSmpteOffset(SmpteError::MinuteOffset(60)))
    );
}
