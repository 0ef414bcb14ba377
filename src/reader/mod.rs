#![doc = r#"
Reads the events of a track chunk

The [`Reader`] walks a track chunk's payload one event at a time. For each event it
reads a delta-time, then either a fresh status byte or, when the next byte is a
data byte, the running status left by the last channel message. The status byte
selects the message family that decodes the rest.

```text
              channel status                       real-time / meta
            |----------------|                   |------------------|
            v                |                   v                  |
  [AwaitingEvent] ----> [Active(status)] --------+------------------|
        ^                    |
        |--------------------|
          system common / sysex
```

Any error ends the track. The reader does not try to resynchronise.
"#]

mod error;
pub use error::*;

use alloc::vec::Vec;

use crate::{
    ParseError, TrackEvent,
    message::{MessageFamily, RunningStatusEffect, TrackMessage},
    vlq::decode_vlq,
};

/// The running status of a [`Reader`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunningStatus {
    /// No channel status to reuse. A data byte in status position is an error.
    #[default]
    AwaitingEvent,
    /// A data byte in status position continues this channel status.
    Active(u8),
}

#[doc = r#"
A reader over the payload of a single track chunk.

# Example
```rust
# use mtrk::prelude::*;
// a note on, then another note on under running status
let payload = [0x00, 0x90, 0x40, 0x60, 0x10, 0x41, 0x61];
let mut reader = Reader::new(&payload);

let first = reader.read_event().unwrap().unwrap();
assert_eq!(reader.running_status(), RunningStatus::Active(0x90));

let second = reader.read_event().unwrap().unwrap();
assert_eq!(second.message().status(), 0x90);
assert_eq!(second.delta_time(), 0x10);

assert!(reader.read_event().unwrap().is_none());
```
"#]
#[derive(Debug, Clone)]
pub struct Reader<'slc> {
    data: &'slc [u8],
    position: usize,
    running_status: RunningStatus,
}

impl<'slc> Reader<'slc> {
    /// Read the track chunk payload `data`
    pub const fn new(data: &'slc [u8]) -> Self {
        Self {
            data,
            position: 0,
            running_status: RunningStatus::AwaitingEvent,
        }
    }

    /// The offset of the next unread byte
    pub const fn buffer_position(&self) -> usize {
        self.position
    }

    /// The running status carried into the next event
    pub const fn running_status(&self) -> RunningStatus {
        self.running_status
    }

    /// True once every byte has been consumed
    pub const fn is_finished(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Read the next event.
    ///
    /// Returns `Ok(None)` once the payload is exhausted. On error, the reader is left
    /// exactly as it was before the call.
    pub fn read_event(&mut self) -> ReadResult<Option<TrackEvent<'slc>>> {
        let start = self.position;
        let Some(remaining) = self.data.get(start..).filter(|r| !r.is_empty()) else {
            return Ok(None);
        };

        let (delta_time, read) =
            decode_vlq(remaining).map_err(|e| ReaderError::parse_error(start, e))?;

        let status_position = start + read;
        let Some(&byte) = self.data.get(status_position) else {
            return Err(ReaderError::parse_error(
                status_position,
                ParseError::MissingMessage,
            ));
        };

        let (status, data_position) = if byte & 0x80 != 0 {
            (byte, status_position + 1)
        } else {
            match self.running_status {
                RunningStatus::Active(status) => (status, status_position),
                RunningStatus::AwaitingEvent => {
                    return Err(ReaderError::parse_error(
                        status_position,
                        ParseError::DataByteWithoutRunningStatus(byte),
                    ));
                }
            }
        };

        let family = MessageFamily::from_status(status)
            .map_err(|e| ReaderError::parse_error(status_position, e))?;

        let data = self.data.get(data_position..).unwrap_or_default();
        let (message, read) = TrackMessage::decode_with(family, status, data)
            .map_err(|e| ReaderError::parse_error(data_position, e))?;

        match family.running_status_effect() {
            RunningStatusEffect::Set => self.running_status = RunningStatus::Active(status),
            RunningStatusEffect::Clear => self.running_status = RunningStatus::AwaitingEvent,
            RunningStatusEffect::Keep => {}
        }
        self.position = data_position + read;

        Ok(Some(TrackEvent {
            delta_time,
            message,
        }))
    }
}

impl<'slc> Iterator for Reader<'slc> {
    type Item = ReadResult<TrackEvent<'slc>>;

    /// Yields events until the payload is exhausted or the first error.
    fn next(&mut self) -> Option<Self::Item> {
        match self.read_event() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => None,
            Err(e) => {
                self.position = self.data.len();
                Some(Err(e))
            }
        }
    }
}

/// Decode every event of a track chunk payload.
///
/// Fails on the first malformed event; no events are returned in that case.
pub fn decode_track(payload: &[u8]) -> ReadResult<Vec<TrackEvent<'_>>> {
    let events = Reader::new(payload).collect::<ReadResult<Vec<_>>>()?;

    #[cfg(feature = "tracing")]
    tracing::debug!(events = events.len(), bytes = payload.len(), "decoded track");

    Ok(events)
}

#[cfg(test)]
fn failure(payload: &[u8]) -> (usize, ParseError) {
    let err = decode_track(payload).unwrap_err();
    (err.position(), *err.cause())
}

#[test]
fn empty_payload_has_no_events() {
    assert!(decode_track(&[]).unwrap().is_empty());
}

#[test]
fn running_status_reuses_channel_status() {
    use crate::prelude::*;
    use pretty_assertions::assert_eq;
    let payload = [0x00, 0x90, 0x40, 0x60, 0x81, 0x00, 0x41, 0x61];
    let events = decode_track(&payload).unwrap();

    let note_on = |key, velocity| {
        TrackMessage::ChannelVoice(ChannelVoiceMessage::note_on(
            Channel::One,
            DataByte::new_unchecked(key),
            DataByte::new_unchecked(velocity),
        ))
    };
    assert_eq!(
        events,
        alloc::vec![
            TrackEvent::new(0, note_on(0x40, 0x60)),
            TrackEvent::new(128, note_on(0x41, 0x61)),
        ]
    );
}

#[test]
fn data_byte_without_running_status() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        failure(&[0x00, 0x40, 0x60]),
        (1, ParseError::DataByteWithoutRunningStatus(0x40))
    );
}

#[test]
fn real_time_is_transparent_to_running_status() {
    use pretty_assertions::assert_eq;
    let payload = [0x00, 0xB2, 0x07, 0x64, 0x00, 0xF8, 0x00, 0x0A, 0x40];
    let mut reader = Reader::new(&payload);
    reader.read_event().unwrap();
    reader.read_event().unwrap();
    assert_eq!(reader.running_status(), RunningStatus::Active(0xB2));

    let third = reader.read_event().unwrap().unwrap();
    assert_eq!(third.message().status(), 0xB2);
    assert!(reader.is_finished());
}

#[test]
fn meta_is_transparent_to_running_status() {
    use pretty_assertions::assert_eq;
    let payload = [0x00, 0xC3, 0x05, 0x00, 0xFF, 0x06, 0x01, b'A', 0x00, 0x06];
    let events = decode_track(&payload).unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events[2].message().status(), 0xC3);
}

#[test]
fn sysex_and_system_common_cancel_running_status() {
    use pretty_assertions::assert_eq;
    let sysex = [0x00, 0x90, 0x40, 0x60, 0x00, 0xF0, 0x01, 0xF7, 0x00, 0x40, 0x00];
    assert_eq!(
        failure(&sysex),
        (9, ParseError::DataByteWithoutRunningStatus(0x40))
    );

    let common = [0x00, 0x90, 0x40, 0x60, 0x00, 0xF6, 0x00, 0x40, 0x00];
    assert_eq!(
        failure(&common),
        (7, ParseError::DataByteWithoutRunningStatus(0x40))
    );
}

#[test]
fn error_positions() {
    use pretty_assertions::assert_eq;
    // delta-time with nothing after it
    assert_eq!(failure(&[0x00, 0xFF, 0x2F, 0x00, 0x10]), (5, ParseError::MissingMessage));
    // unterminated delta-time
    assert_eq!(failure(&[0x80, 0x80]), (0, ParseError::MalformedVlq { read: 2 }));
    // undefined status byte
    assert_eq!(failure(&[0x00, 0xF4]), (1, ParseError::UnknownStatusByte(0xF4)));
    // truncated channel message
    assert_eq!(
        failure(&[0x00, 0x90, 0x40]),
        (
            2,
            ParseError::TruncatedChannelEvent {
                expected: 2,
                available: 1
            }
        )
    );
    // truncated meta
    assert_eq!(
        failure(&[0x00, 0xFF, 0x03, 0x09, b'a', b'b']),
        (
            2,
            ParseError::TruncatedMeta {
                expected: 9,
                available: 2
            }
        )
    );
}

#[test]
fn failed_read_leaves_reader_untouched() {
    use pretty_assertions::assert_eq;
    let payload = [0x00, 0x90, 0x40, 0x60, 0x00, 0x41];
    let mut reader = Reader::new(&payload);
    reader.read_event().unwrap();

    let before = (reader.buffer_position(), reader.running_status());
    assert!(reader.read_event().is_err());
    assert_eq!((reader.buffer_position(), reader.running_status()), before);
}

#[test]
fn iterator_stops_after_error() {
    let payload = [0x00, 0x40, 0x00, 0x90, 0x40, 0x60];
    let mut reader = Reader::new(&payload);
    assert!(matches!(reader.next(), Some(Err(_))));
    assert!(reader.next().is_none());
}
