use alloc::vec::Vec;
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::{
    ParseError,
    message::{Decode, Encode},
    writer::WriteResult,
};

#[doc = r#"
System real-time messages

These are a single status byte with no data. They may appear between any
two events without disturbing running status.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SystemRealTimeMessage {
    /// Sent 24 times per quarter note
    TimingClock = 0xF8,
    /// Start playback from the beginning
    Start = 0xFA,
    /// Resume playback
    Continue = 0xFB,
    /// Stop playback
    Stop = 0xFC,
    /// Keep-alive
    ActiveSensing = 0xFE,
}

impl<'slc> Decode<'slc> for SystemRealTimeMessage {
    fn decode(status: u8, _data: &'slc [u8]) -> Result<(Self, usize), ParseError> {
        let message = Self::try_from(status).map_err(|_| ParseError::UnknownStatusByte(status))?;
        Ok((message, 0))
    }
}

impl Encode for SystemRealTimeMessage {
    fn encode(&self, out: &mut Vec<u8>) -> WriteResult<()> {
        out.push((*self).into());
        Ok(())
    }
}

#[test]
fn decode_consumes_nothing() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        SystemRealTimeMessage::decode(0xF8, &[0x40]),
        Ok((SystemRealTimeMessage::TimingClock, 0))
    );
    assert_eq!(
        SystemRealTimeMessage::decode(0xFE, &[]),
        Ok((SystemRealTimeMessage::ActiveSensing, 0))
    );
    assert_eq!(
        SystemRealTimeMessage::decode(0xF9, &[]),
        Err(ParseError::UnknownStatusByte(0xF9))
    );
}

#[test]
fn encode_is_status_only() {
    use pretty_assertions::assert_eq;
    assert_eq!(SystemRealTimeMessage::Stop.to_bytes().unwrap(), [0xFC]);
}
