use alloc::vec::Vec;

use super::{VoiceEvent, VoiceKind};
use crate::{
    Channel, DataByte, DataWord, ParseError,
    message::{Decode, Encode},
    writer::WriteResult,
};

#[doc = r#"
A channel voice message: a [`VoiceEvent`] addressed to a [`Channel`]

# Example
```rust
# use mtrk::prelude::*;
let bend = ChannelVoiceMessage::pitch_bend(Channel::Two, DataWord::new(300).unwrap());
assert_eq!(bend.to_bytes().unwrap(), [0xE1, 0x2C, 0x02]);
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelVoiceMessage {
    pub(crate) channel: Channel,
    pub(crate) event: VoiceEvent,
}

impl ChannelVoiceMessage {
    /// Create a new channel voice message
    pub const fn new(channel: Channel, event: VoiceEvent) -> Self {
        Self { channel, event }
    }

    /// A note on message
    pub const fn note_on(channel: Channel, key: DataByte, velocity: DataByte) -> Self {
        Self::new(channel, VoiceEvent::NoteOn { key, velocity })
    }

    /// A note off message
    pub const fn note_off(channel: Channel, key: DataByte, velocity: DataByte) -> Self {
        Self::new(channel, VoiceEvent::NoteOff { key, velocity })
    }

    /// A pitch bend message
    pub const fn pitch_bend(channel: Channel, value: DataWord) -> Self {
        Self::new(channel, VoiceEvent::PitchBend { value })
    }

    /// The channel the message is addressed to
    pub const fn channel(&self) -> Channel {
        self.channel
    }

    /// The content of the message
    pub const fn event(&self) -> &VoiceEvent {
        &self.event
    }

    /// The kind of the message
    pub const fn kind(&self) -> VoiceKind {
        self.event.kind()
    }

    /// The status byte: kind in the high nibble, channel in the low.
    pub fn status(&self) -> u8 {
        (u8::from(self.kind()) << 4) | self.channel.nibble()
    }

    /// True for control changes on controllers `120..=127`.
    pub const fn is_channel_mode(&self) -> bool {
        matches!(self.event, VoiceEvent::ControlChange { controller, .. } if controller.0 >= 120)
    }

    /// Appends only the data bytes, as used under running status.
    pub(crate) fn encode_data(&self, out: &mut Vec<u8>) {
        let (first, second) = self.event.data();
        out.push(first.0);
        if let Some(second) = second {
            out.push(second.0);
        }
    }
}

impl<'slc> Decode<'slc> for ChannelVoiceMessage {
    fn decode(status: u8, data: &'slc [u8]) -> Result<(Self, usize), ParseError> {
        let kind = VoiceKind::from_status(status)?;
        let expected = kind.data_len();
        let Some(bytes) = data.get(..expected) else {
            return Err(ParseError::TruncatedChannelEvent {
                expected,
                available: data.len(),
            });
        };

        let first = DataByte::new(bytes[0])?;
        let second = match bytes.get(1) {
            Some(&byte) => DataByte::new(byte)?,
            None => DataByte::default(),
        };

        let event = VoiceEvent::from_data(kind, first, second);
        Ok((Self::new(Channel::from_status(status), event), expected))
    }
}

impl Encode for ChannelVoiceMessage {
    fn encode(&self, out: &mut Vec<u8>) -> WriteResult<()> {
        out.push(self.status());
        self.encode_data(out);
        Ok(())
    }
}

#[test]
fn decode_two_byte_kinds() {
    use pretty_assertions::assert_eq;
    let (msg, read) = ChannelVoiceMessage::decode(0x93, &[0x40, 0x60, 0x00]).unwrap();
    assert_eq!(read, 2);
    assert_eq!(msg.channel(), Channel::Four);
    assert_eq!(
        msg.event(),
        &VoiceEvent::NoteOn {
            key: DataByte(0x40),
            velocity: DataByte(0x60)
        }
    );

    let (msg, _) = ChannelVoiceMessage::decode(0xB0, &[0x7B, 0x00]).unwrap();
    assert!(msg.is_channel_mode());
}

#[test]
fn decode_one_byte_kinds() {
    use pretty_assertions::assert_eq;
    let (msg, read) = ChannelVoiceMessage::decode(0xC5, &[0x11, 0x22]).unwrap();
    assert_eq!(read, 1);
    assert_eq!(
        msg,
        ChannelVoiceMessage::new(
            Channel::Six,
            VoiceEvent::ProgramChange {
                program: DataByte(0x11)
            }
        )
    );

    let (msg, read) = ChannelVoiceMessage::decode(0xD0, &[0x05]).unwrap();
    assert_eq!(read, 1);
    assert_eq!(msg.kind(), VoiceKind::ChannelPressure);
}

#[test]
fn decode_pitch_bend_joins_bytes() {
    use pretty_assertions::assert_eq;
    let (msg, read) = ChannelVoiceMessage::decode(0xE0, &[0x2C, 0x02]).unwrap();
    assert_eq!(read, 2);
    let VoiceEvent::PitchBend { value } = msg.event() else {
        panic!("expected pitch bend, got {msg:?}");
    };
    assert_eq!(value.value(), 300);
}

#[test]
fn decode_truncated() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        ChannelVoiceMessage::decode(0x80, &[0x40]),
        Err(ParseError::TruncatedChannelEvent {
            expected: 2,
            available: 1
        })
    );
    assert_eq!(
        ChannelVoiceMessage::decode(0xC0, &[]),
        Err(ParseError::TruncatedChannelEvent {
            expected: 1,
            available: 0
        })
    );
}

#[test]
fn decode_rejects_status_as_data() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        ChannelVoiceMessage::decode(0x90, &[0x40, 0x90]),
        Err(ParseError::InvalidDataByte(0x90))
    );
}

#[test]
fn encode_writes_status_then_data() {
    use pretty_assertions::assert_eq;
    let msg = ChannelVoiceMessage::new(
        Channel::Ten,
        VoiceEvent::ChannelPressure {
            pressure: DataByte(0x33),
        },
    );
    assert_eq!(msg.to_bytes().unwrap(), [0xD9, 0x33]);

    let msg = ChannelVoiceMessage::pitch_bend(Channel::One, DataWord::PITCH_BEND_CENTER);
    assert_eq!(msg.to_bytes().unwrap(), [0xE0, 0x00, 0x40]);
}
