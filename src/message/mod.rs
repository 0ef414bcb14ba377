#![doc = r#"
The messages that can appear inside a track chunk.

# Hierarchy
```text
                         |---------------|
                         | Track Message |
                         |---------------|
        /            /            |              \            \
|---------|  |--------|  |-----------|  |----------------|  |------|
| Channel |  | System |  | System    |  | System         |  | Meta |
| Voice   |  | Common |  | Real-Time |  | Exclusive      |  |      |
|---------|  |--------|  |-----------|  |----------------|  |------|
 80..=EF      F2 F3 F6    F8 FA-FC FE    F0 F7               FF
```

Each family knows how to read itself from the bytes that follow its status
byte ([`Decode`]) and how to write itself, status byte included ([`Encode`]).
"#]

pub mod channel;
pub mod meta;
pub mod realtime;
pub mod sysex;
pub mod system_common;

use alloc::vec::Vec;

use crate::{ParseError, writer::WriteResult};
use channel::ChannelVoiceMessage;
use meta::MetaMessage;
use realtime::SystemRealTimeMessage;
use sysex::SystemExclusiveMessage;
use system_common::SystemCommonMessage;

/// Reads a message from the bytes following its status byte.
pub trait Decode<'slc>: Sized {
    /// `data` begins at the first byte after the status byte, and runs to the end
    /// of the track. Returns the message and the number of bytes of `data` it used.
    fn decode(status: u8, data: &'slc [u8]) -> Result<(Self, usize), ParseError>;
}

/// Writes a message, status byte first.
pub trait Encode {
    /// Append the message to `out`. Nothing is appended on error.
    fn encode(&self, out: &mut Vec<u8>) -> WriteResult<()>;

    /// Encode the message into a fresh buffer.
    fn to_bytes(&self) -> WriteResult<Vec<u8>> {
        let mut out = Vec::new();
        self.encode(&mut out)?;
        Ok(out)
    }
}

#[doc = r#"
The set of messages a track event may carry
"#]
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackMessage<'a> {
    /// A channel voice or mode message
    ChannelVoice(ChannelVoiceMessage),
    /// Song position, song select, or tune request
    SystemCommon(SystemCommonMessage),
    /// Clock and transport messages
    SystemRealTime(SystemRealTimeMessage),
    /// An opaque, length-prefixed system exclusive payload
    SystemExclusive(SystemExclusiveMessage<'a>),
    /// Information about the file or track that is not sent to devices
    Meta(MetaMessage<'a>),
}

impl<'a> TrackMessage<'a> {
    /// The family of this message.
    pub const fn family(&self) -> MessageFamily {
        match self {
            Self::ChannelVoice(_) => MessageFamily::ChannelVoice,
            Self::SystemCommon(_) => MessageFamily::SystemCommon,
            Self::SystemRealTime(_) => MessageFamily::SystemRealTime,
            Self::SystemExclusive(_) => MessageFamily::SystemExclusive,
            Self::Meta(_) => MessageFamily::Meta,
        }
    }

    /// The status byte that introduces this message on the wire.
    pub fn status(&self) -> u8 {
        match self {
            Self::ChannelVoice(m) => m.status(),
            Self::SystemCommon(m) => m.status(),
            Self::SystemRealTime(m) => (*m).into(),
            Self::SystemExclusive(m) => m.form().into(),
            Self::Meta(_) => meta::META_STATUS,
        }
    }

    /// Reads the message introduced by `status`.
    pub(crate) fn decode_with(
        family: MessageFamily,
        status: u8,
        data: &'a [u8],
    ) -> Result<(Self, usize), ParseError> {
        Ok(match family {
            MessageFamily::ChannelVoice => {
                let (m, read) = ChannelVoiceMessage::decode(status, data)?;
                (Self::ChannelVoice(m), read)
            }
            MessageFamily::SystemCommon => {
                let (m, read) = SystemCommonMessage::decode(status, data)?;
                (Self::SystemCommon(m), read)
            }
            MessageFamily::SystemRealTime => {
                let (m, read) = SystemRealTimeMessage::decode(status, data)?;
                (Self::SystemRealTime(m), read)
            }
            MessageFamily::SystemExclusive => {
                let (m, read) = SystemExclusiveMessage::decode(status, data)?;
                (Self::SystemExclusive(m), read)
            }
            MessageFamily::Meta => {
                let (m, read) = MetaMessage::decode(status, data)?;
                (Self::Meta(m), read)
            }
        })
    }

    /// Detach the message from the buffer it was decoded from.
    pub fn into_owned(self) -> TrackMessage<'static> {
        match self {
            Self::ChannelVoice(m) => TrackMessage::ChannelVoice(m),
            Self::SystemCommon(m) => TrackMessage::SystemCommon(m),
            Self::SystemRealTime(m) => TrackMessage::SystemRealTime(m),
            Self::SystemExclusive(m) => TrackMessage::SystemExclusive(m.into_owned()),
            Self::Meta(m) => TrackMessage::Meta(m.into_owned()),
        }
    }
}

impl Encode for TrackMessage<'_> {
    fn encode(&self, out: &mut Vec<u8>) -> WriteResult<()> {
        match self {
            Self::ChannelVoice(m) => m.encode(out),
            Self::SystemCommon(m) => m.encode(out),
            Self::SystemRealTime(m) => m.encode(out),
            Self::SystemExclusive(m) => m.encode(out),
            Self::Meta(m) => m.encode(out),
        }
    }
}

impl From<ChannelVoiceMessage> for TrackMessage<'_> {
    fn from(value: ChannelVoiceMessage) -> Self {
        Self::ChannelVoice(value)
    }
}

impl From<SystemCommonMessage> for TrackMessage<'_> {
    fn from(value: SystemCommonMessage) -> Self {
        Self::SystemCommon(value)
    }
}

impl From<SystemRealTimeMessage> for TrackMessage<'_> {
    fn from(value: SystemRealTimeMessage) -> Self {
        Self::SystemRealTime(value)
    }
}

impl<'a> From<SystemExclusiveMessage<'a>> for TrackMessage<'a> {
    fn from(value: SystemExclusiveMessage<'a>) -> Self {
        Self::SystemExclusive(value)
    }
}

impl<'a> From<MetaMessage<'a>> for TrackMessage<'a> {
    fn from(value: MetaMessage<'a>) -> Self {
        Self::Meta(value)
    }
}

/// Which decoder a status byte selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageFamily {
    /// `0x80..=0xEF`
    ChannelVoice,
    /// `0xF2`, `0xF3`, `0xF6`
    SystemCommon,
    /// `0xF8`, `0xFA..=0xFC`, `0xFE`
    SystemRealTime,
    /// `0xF0`, `0xF7`
    SystemExclusive,
    /// `0xFF`
    Meta,
}

/// What decoding a message does to the running status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunningStatusEffect {
    /// The status byte becomes the running status.
    Set,
    /// Running status is cancelled.
    Clear,
    /// Running status is left as it was.
    Keep,
}

impl MessageFamily {
    /// Classify a status byte.
    ///
    /// # Errors
    /// [`ParseError::UnknownStatusByte`] for data bytes and the undefined
    /// system bytes `0xF1`, `0xF4`, `0xF5`, `0xF9` and `0xFD`.
    pub const fn from_status(status: u8) -> Result<Self, ParseError> {
        Ok(match status {
            0x80..=0xEF => Self::ChannelVoice,
            0xF0 | 0xF7 => Self::SystemExclusive,
            0xF2 | 0xF3 | 0xF6 => Self::SystemCommon,
            0xF8 | 0xFA | 0xFB | 0xFC | 0xFE => Self::SystemRealTime,
            0xFF => Self::Meta,
            _ => return Err(ParseError::UnknownStatusByte(status)),
        })
    }

    /// Channel messages establish running status, system common and system
    /// exclusive messages cancel it, and real-time and meta messages pass
    /// through without touching it.
    pub const fn running_status_effect(&self) -> RunningStatusEffect {
        match self {
            Self::ChannelVoice => RunningStatusEffect::Set,
            Self::SystemCommon | Self::SystemExclusive => RunningStatusEffect::Clear,
            Self::SystemRealTime | Self::Meta => RunningStatusEffect::Keep,
        }
    }
}

#[test]
fn classify_status_bytes() {
    use pretty_assertions::assert_eq;
    assert_eq!(MessageFamily::from_status(0x80), Ok(MessageFamily::ChannelVoice));
    assert_eq!(MessageFamily::from_status(0xEF), Ok(MessageFamily::ChannelVoice));
    assert_eq!(MessageFamily::from_status(0xF0), Ok(MessageFamily::SystemExclusive));
    assert_eq!(MessageFamily::from_status(0xF7), Ok(MessageFamily::SystemExclusive));
    assert_eq!(MessageFamily::from_status(0xF3), Ok(MessageFamily::SystemCommon));
    assert_eq!(MessageFamily::from_status(0xFE), Ok(MessageFamily::SystemRealTime));
    assert_eq!(MessageFamily::from_status(0xFF), Ok(MessageFamily::Meta));

    for undefined in [0xF1, 0xF4, 0xF5, 0xF9, 0xFD, 0x7F, 0x00] {
        assert_eq!(
            MessageFamily::from_status(undefined),
            Err(ParseError::UnknownStatusByte(undefined))
        );
    }
}

#[test]
fn running_status_effects() {
    use pretty_assertions::assert_eq;
    use MessageFamily::*;
    assert_eq!(ChannelVoice.running_status_effect(), RunningStatusEffect::Set);
    assert_eq!(SystemCommon.running_status_effect(), RunningStatusEffect::Clear);
    assert_eq!(SystemExclusive.running_status_effect(), RunningStatusEffect::Clear);
    assert_eq!(SystemRealTime.running_status_effect(), RunningStatusEffect::Keep);
    assert_eq!(Meta.running_status_effect(), RunningStatusEffect::Keep);
}
