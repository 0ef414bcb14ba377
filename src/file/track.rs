use alloc::{borrow::Cow, vec::Vec};

use crate::{
    FileError, TrackEvent,
    file::chunk::{RawChunk, TRACK_TAG},
    reader::{ReadResult, ReaderError, decode_track},
    writer::{WriteResult, WriterConfig, encode_track_with},
};

#[doc = r#"
The decoded events of one `MTrk` chunk

# Example
```rust
# use mtrk::prelude::*;
let chunk = RawChunk::new(*b"MTrk", [0x00, 0xFF, 0x2F, 0x00].as_slice());
let track = Track::from_chunk(&chunk).unwrap();

assert_eq!(track.events().len(), 1);
assert_eq!(track.to_chunk(WriterConfig::default()).unwrap(), chunk);
```
"#]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track<'a> {
    events: Vec<TrackEvent<'a>>,
}

impl<'a> Track<'a> {
    /// Create a track from its events
    pub fn new(events: Vec<TrackEvent<'a>>) -> Self {
        Self { events }
    }

    /// Decode the events of a track chunk.
    ///
    /// Error positions are relative to the start of the chunk payload.
    ///
    /// # Errors
    /// [`FileError::UnrecognizedChunkPayload`] if `chunk` is not an `MTrk` chunk.
    pub fn from_chunk(chunk: &RawChunk<'a>) -> ReadResult<Self> {
        if !chunk.is_track() {
            return Err(ReaderError::parse_error(
                0,
                FileError::UnrecognizedChunkPayload(chunk.tag()).into(),
            ));
        }

        let events = match chunk.payload_cow() {
            Cow::Borrowed(payload) => decode_track(*payload)?,
            Cow::Owned(payload) => decode_track(payload)?
                .into_iter()
                .map(|event| -> TrackEvent<'a> { event.into_owned() })
                .collect(),
        };
        Ok(Self { events })
    }

    /// The events of the track
    pub fn events(&self) -> &[TrackEvent<'a>] {
        &self.events
    }

    /// Take the events out of the track
    pub fn into_events(self) -> Vec<TrackEvent<'a>> {
        self.events
    }

    /// Append an event
    pub fn push(&mut self, event: TrackEvent<'a>) {
        self.events.push(event);
    }

    /// Encode the events into a track chunk payload
    pub fn encode(&self, config: WriterConfig) -> WriteResult<Vec<u8>> {
        encode_track_with(&self.events, config)
    }

    /// Encode the track as a complete `MTrk` chunk
    pub fn to_chunk(&self, config: WriterConfig) -> WriteResult<RawChunk<'static>> {
        Ok(RawChunk::new(TRACK_TAG, self.encode(config)?))
    }

    /// Detach the track from the buffer it was decoded from.
    pub fn into_owned(self) -> Track<'static> {
        Track {
            events: self.events.into_iter().map(TrackEvent::into_owned).collect(),
        }
    }
}

#[test]
fn from_chunk_rejects_other_tags() {
    use crate::ParseError;
    use pretty_assertions::assert_eq;
    let chunk = RawChunk::new(*b"MThd", [0u8, 0, 0, 1, 0, 96].as_slice());
    let err = Track::from_chunk(&chunk).unwrap_err();
    assert_eq!(
        *err.cause(),
        ParseError::File(FileError::UnrecognizedChunkPayload(*b"MThd"))
    );
}

#[test]
fn from_owned_chunk() {
    use crate::message::TrackMessage;
    use pretty_assertions::assert_eq;
    let chunk = RawChunk::new(TRACK_TAG, alloc::vec![0x00, 0xFF, 0x01, 0x02, b'h', b'i']);
    let track = Track::from_chunk(&chunk).unwrap();
    let TrackMessage::Meta(text) = track.events()[0].message() else {
        panic!("expected a meta message");
    };
    assert_eq!(text.text(), Some(b"hi".as_slice()));
}
