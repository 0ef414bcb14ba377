#![doc = r#"
Writes track events back to the bytes of a track chunk payload

By default every message is written with its status byte. With
[`WriterConfig::with_running_status`], a channel message whose status equals the
previous channel message's is written as data bytes only.

Compression follows the conservative rule most readers expect: real-time messages
leave the compressed status in place, and any other non-channel message resets it.
"#]

mod error;
pub use error::*;

use alloc::vec::Vec;

use crate::{
    TrackEvent,
    message::{Encode, TrackMessage},
    vlq::write_vlq,
};

/// Options for a [`Writer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WriterConfig {
    /// Omit repeated channel status bytes
    pub running_status: bool,
}

impl WriterConfig {
    /// Enable or disable running status compression
    pub const fn with_running_status(mut self, running_status: bool) -> Self {
        self.running_status = running_status;
        self
    }
}

#[doc = r#"
Encodes events one by one into a track payload.

# Example
```rust
# use mtrk::prelude::*;
let config = WriterConfig::default().with_running_status(true);
let mut writer = Writer::with_config(config);

for key in [60, 64] {
    let note = ChannelVoiceMessage::note_on(
        Channel::One,
        DataByte::new(key).unwrap(),
        DataByte::new(100).unwrap(),
    );
    writer.write_event(&TrackEvent::new(0, note)).unwrap();
}

assert_eq!(writer.finish(), [0x00, 0x90, 60, 100, 0x00, 64, 100]);
```
"#]
#[derive(Debug, Clone, Default)]
pub struct Writer {
    out: Vec<u8>,
    config: WriterConfig,
    running_status: Option<u8>,
}

impl Writer {
    /// A writer that always emits status bytes
    pub fn new() -> Self {
        Self::default()
    }

    /// A writer with the given options
    pub fn with_config(config: WriterConfig) -> Self {
        Self {
            out: Vec::new(),
            config,
            running_status: None,
        }
    }

    /// The bytes written so far
    pub fn as_bytes(&self) -> &[u8] {
        &self.out
    }

    /// Append one event.
    ///
    /// On error nothing is appended and the writer is unchanged.
    pub fn write_event(&mut self, event: &TrackEvent<'_>) -> WriteResult<()> {
        let start = self.out.len();
        self.encode_event(event).inspect_err(|_| self.out.truncate(start))
    }

    fn encode_event(&mut self, event: &TrackEvent<'_>) -> WriteResult<()> {
        write_vlq(event.delta_time, &mut self.out)?;

        match &event.message {
            TrackMessage::ChannelVoice(m) => {
                let status = m.status();
                if self.config.running_status && self.running_status == Some(status) {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(status, "omitting repeated status byte");
                    m.encode_data(&mut self.out);
                } else {
                    m.encode(&mut self.out)?;
                }
                self.running_status = Some(status);
            }
            TrackMessage::SystemRealTime(m) => m.encode(&mut self.out)?,
            other => {
                other.encode(&mut self.out)?;
                self.running_status = None;
            }
        }
        Ok(())
    }

    /// Consume the writer, returning the payload
    pub fn finish(self) -> Vec<u8> {
        self.out
    }
}

/// Encode events into a track chunk payload, writing every status byte.
///
/// Re-encoding the output of [`decode_track`](crate::decode_track) gives back the
/// original bytes, except that running status is expanded and delta-times are
/// written in their shortest form.
pub fn encode_track(events: &[TrackEvent<'_>]) -> WriteResult<Vec<u8>> {
    encode_track_with(events, WriterConfig::default())
}

/// Encode events into a track chunk payload with the given options.
pub fn encode_track_with(events: &[TrackEvent<'_>], config: WriterConfig) -> WriteResult<Vec<u8>> {
    let mut writer = Writer::with_config(config);
    for event in events {
        writer.write_event(event)?;
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        events = events.len(),
        bytes = writer.out.len(),
        running_status = config.running_status,
        "encoded track"
    );

    Ok(writer.finish())
}

#[cfg(test)]
fn note_on(key: u8) -> TrackEvent<'static> {
    use crate::prelude::*;
    TrackEvent::new(
        0,
        ChannelVoiceMessage::note_on(
            Channel::One,
            DataByte::new_unchecked(key),
            DataByte::new_unchecked(0x40),
        ),
    )
}

#[test]
fn encode_expands_running_status() {
    use pretty_assertions::assert_eq;
    let payload = [0x00, 0x90, 0x40, 0x60, 0x60, 0x41, 0x61];
    let events = crate::decode_track(&payload).unwrap();
    assert_eq!(
        encode_track(&events).unwrap(),
        [0x00, 0x90, 0x40, 0x60, 0x60, 0x90, 0x41, 0x61]
    );
}

#[test]
fn encode_with_running_status_round_trips() {
    use pretty_assertions::assert_eq;
    let payload = [0x00, 0x90, 0x40, 0x60, 0x60, 0x41, 0x61];
    let events = crate::decode_track(&payload).unwrap();
    let config = WriterConfig::default().with_running_status(true);
    assert_eq!(encode_track_with(&events, config).unwrap(), payload);
}

#[test]
fn compression_survives_real_time_only() {
    use crate::prelude::*;
    use pretty_assertions::assert_eq;
    let config = WriterConfig::default().with_running_status(true);

    let clock = TrackEvent::new(0, SystemRealTimeMessage::TimingClock);
    let events = [note_on(1), clock, note_on(2)];
    assert_eq!(
        encode_track_with(&events, config).unwrap(),
        [0x00, 0x90, 1, 0x40, 0x00, 0xF8, 0x00, 2, 0x40]
    );

    let text = TrackEvent::new(0, MetaMessage::new(MetaType::Text, b"x".as_slice()));
    let events = [note_on(1), text, note_on(2)];
    assert_eq!(
        encode_track_with(&events, config).unwrap(),
        [0x00, 0x90, 1, 0x40, 0x00, 0xFF, 0x01, 0x01, b'x', 0x00, 0x90, 2, 0x40]
    );
}

#[test]
fn failed_write_appends_nothing() {
    use crate::prelude::*;
    use pretty_assertions::assert_eq;
    let mut writer = Writer::new();
    writer.write_event(&note_on(1)).unwrap();

    let too_late = TrackEvent::new(0x1000_0000, SystemRealTimeMessage::Start);
    assert_eq!(
        writer.write_event(&too_late),
        Err(WriteError::VlqOutOfRange(0x1000_0000))
    );
    assert_eq!(writer.finish(), [0x00, 0x90, 1, 0x40]);
}
