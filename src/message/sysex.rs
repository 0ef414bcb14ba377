#![doc = r#"
System exclusive messages

Inside a track chunk, a system exclusive message is its status byte followed by
a VLQ length and exactly that many bytes:

```text
F0 <len> <bytes...>    a complete message, or the first packet of one
F7 <len> <bytes...>    a continuation packet, or an "escape" of arbitrary bytes
```

Both forms are read the same way. The form is remembered so that the message
is written back with the status byte it was read with.
"#]

use alloc::{borrow::Cow, vec::Vec};
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::{
    ParseError,
    message::{Decode, Encode},
    vlq,
    writer::WriteResult,
};

/// The status byte a system exclusive message was introduced with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SysExForm {
    /// `F0`
    #[default]
    Initial = 0xF0,
    /// `F7`
    Continuation = 0xF7,
}

/// A system exclusive message and its opaque payload
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SystemExclusiveMessage<'a> {
    form: SysExForm,
    data: Cow<'a, [u8]>,
}

impl<'a> SystemExclusiveMessage<'a> {
    /// A message introduced by `F0`.
    ///
    /// `data` is everything after the length prefix, usually ending in `F7`.
    pub fn new<B>(data: B) -> Self
    where
        B: Into<Cow<'a, [u8]>>,
    {
        Self::with_form(SysExForm::Initial, data)
    }

    /// A message introduced by `form`.
    pub fn with_form<B>(form: SysExForm, data: B) -> Self
    where
        B: Into<Cow<'a, [u8]>>,
    {
        Self {
            form,
            data: data.into(),
        }
    }

    /// The status byte the message uses
    pub const fn form(&self) -> SysExForm {
        self.form
    }

    /// The payload
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Detach the payload from the buffer it was decoded from.
    pub fn into_owned(self) -> SystemExclusiveMessage<'static> {
        SystemExclusiveMessage {
            form: self.form,
            data: Cow::Owned(self.data.into_owned()),
        }
    }
}

impl<'slc> Decode<'slc> for SystemExclusiveMessage<'slc> {
    fn decode(status: u8, data: &'slc [u8]) -> Result<(Self, usize), ParseError> {
        let form = SysExForm::try_from(status).map_err(|_| ParseError::UnknownStatusByte(status))?;
        let (payload, read) = vlq::read_length_prefixed(data, |expected, available| {
            ParseError::TruncatedSysex {
                expected,
                available,
            }
        })?;
        Ok((Self::with_form(form, payload), read))
    }
}

impl Encode for SystemExclusiveMessage<'_> {
    fn encode(&self, out: &mut Vec<u8>) -> WriteResult<()> {
        let start = out.len();
        out.push(self.form.into());
        vlq::write_length_prefixed(&self.data, out).inspect_err(|_| out.truncate(start))
    }
}

#[test]
fn decode_both_forms() {
    use pretty_assertions::assert_eq;
    let bytes = [0x03, 0x43, 0x12, 0xF7, 0x00];
    let (msg, read) = SystemExclusiveMessage::decode(0xF0, &bytes).unwrap();
    assert_eq!(read, 4);
    assert_eq!(msg.form(), SysExForm::Initial);
    assert_eq!(msg.data(), &[0x43, 0x12, 0xF7]);

    let (msg, read) = SystemExclusiveMessage::decode(0xF7, &bytes).unwrap();
    assert_eq!(read, 4);
    assert_eq!(msg.form(), SysExForm::Continuation);
    assert_eq!(msg.to_bytes().unwrap(), [0xF7, 0x03, 0x43, 0x12, 0xF7]);
}

#[test]
fn decode_empty_payload() {
    use pretty_assertions::assert_eq;
    let (msg, read) = SystemExclusiveMessage::decode(0xF0, &[0x00]).unwrap();
    assert_eq!(read, 1);
    assert!(msg.data().is_empty());
}

#[test]
fn decode_declared_length_too_long() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        SystemExclusiveMessage::decode(0xF0, &[0x05, 0x01, 0x02]),
        Err(ParseError::TruncatedSysex {
            expected: 5,
            available: 2
        })
    );
    assert_eq!(
        SystemExclusiveMessage::decode(0xF0, &[0x81]),
        Err(ParseError::MalformedVlq { read: 1 })
    );
}
