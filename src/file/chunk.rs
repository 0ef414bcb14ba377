#![doc = r#"
Chunk framing for MIDI files

A MIDI file is a sequence of chunks. Each is a 4-character ASCII tag, a 32-bit
big-endian length, and that many bytes of payload.

```text
[Header Chunk: "MThd"]
[Track Chunk 1: "MTrk"]
...
[Track Chunk N: "MTrk"]
[Optional Unknown Chunks]
```

Chunks with any other tag are not interpreted, and are kept as they were found.
"#]

use alloc::{borrow::Cow, vec::Vec};

use crate::{
    ChunkError, ParseError,
    reader::{ReadResult, ReaderError},
    writer::{WriteError, WriteResult},
};

/// The tag of a header chunk
pub const HEADER_TAG: [u8; 4] = *b"MThd";

/// The tag of a track chunk
pub const TRACK_TAG: [u8; 4] = *b"MTrk";

/// Bytes in the tag and length that precede every chunk payload
pub const CHUNK_PREFIX_LEN: usize = 8;

/// A chunk that has been framed but not interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawChunk<'a> {
    tag: [u8; 4],
    payload: Cow<'a, [u8]>,
}

impl<'a> RawChunk<'a> {
    /// Create a chunk from its tag and payload
    pub fn new<B>(tag: [u8; 4], payload: B) -> Self
    where
        B: Into<Cow<'a, [u8]>>,
    {
        Self {
            tag,
            payload: payload.into(),
        }
    }

    /// The 4 byte type identifier
    pub const fn tag(&self) -> [u8; 4] {
        self.tag
    }

    /// The chunk contents, without tag or length
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub(crate) const fn payload_cow(&self) -> &Cow<'a, [u8]> {
        &self.payload
    }

    /// True for an `MThd` chunk
    pub fn is_header(&self) -> bool {
        self.tag == HEADER_TAG
    }

    /// True for an `MTrk` chunk
    pub fn is_track(&self) -> bool {
        self.tag == TRACK_TAG
    }

    /// Append tag, length and payload to `out`.
    pub fn write(&self, out: &mut Vec<u8>) -> WriteResult<()> {
        let len = u32::try_from(self.payload.len())
            .map_err(|_| WriteError::PayloadTooLong(self.payload.len()))?;
        out.extend_from_slice(&self.tag);
        out.extend_from_slice(&len.to_be_bytes());
        out.extend_from_slice(&self.payload);
        Ok(())
    }

    /// Detach the chunk from the buffer it was read from.
    pub fn into_owned(self) -> RawChunk<'static> {
        RawChunk {
            tag: self.tag,
            payload: Cow::Owned(self.payload.into_owned()),
        }
    }
}

#[doc = r#"
Splits a file into chunks.

# Example
```rust
# use mtrk::prelude::*;
let bytes = [b'M', b'T', b'r', b'k', 0, 0, 0, 4, 0x00, 0xFF, 0x2F, 0x00];
let mut chunks = ChunkReader::new(&bytes);

let chunk = chunks.read_chunk().unwrap().unwrap();
assert!(chunk.is_track());
assert_eq!(chunk.payload(), [0x00, 0xFF, 0x2F, 0x00]);
assert!(chunks.read_chunk().unwrap().is_none());
```
"#]
#[derive(Debug, Clone)]
pub struct ChunkReader<'slc> {
    data: &'slc [u8],
    position: usize,
}

impl<'slc> ChunkReader<'slc> {
    /// Read the chunks of `data`
    pub const fn new(data: &'slc [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// The offset of the next chunk
    pub const fn buffer_position(&self) -> usize {
        self.position
    }

    /// Read the next chunk, or `None` at the end of the buffer.
    pub fn read_chunk(&mut self) -> ReadResult<Option<RawChunk<'slc>>> {
        let start = self.position;
        let remaining = self.data.get(start..).unwrap_or_default();
        if remaining.is_empty() {
            return Ok(None);
        }

        let Some((prefix, rest)) = remaining.split_first_chunk::<CHUNK_PREFIX_LEN>() else {
            return Err(chunk_error(
                start,
                ChunkError::TruncatedChunkHeader {
                    available: remaining.len(),
                },
            ));
        };
        let [t0, t1, t2, t3, l0, l1, l2, l3] = *prefix;
        let len = u32::from_be_bytes([l0, l1, l2, l3]) as usize;

        let Some(payload) = rest.get(..len) else {
            return Err(chunk_error(
                start,
                ChunkError::TruncatedChunk {
                    expected: len,
                    available: rest.len(),
                },
            ));
        };

        self.position = start + CHUNK_PREFIX_LEN + len;
        Ok(Some(RawChunk::new([t0, t1, t2, t3], payload)))
    }
}

impl<'slc> Iterator for ChunkReader<'slc> {
    type Item = ReadResult<RawChunk<'slc>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_chunk() {
            Ok(chunk) => chunk.map(Ok),
            Err(e) => {
                self.position = self.data.len();
                Some(Err(e))
            }
        }
    }
}

fn chunk_error(position: usize, error: ChunkError) -> ReaderError {
    ReaderError::parse_error(position, ParseError::Chunk(error))
}

#[test]
fn read_consecutive_chunks() {
    use pretty_assertions::assert_eq;
    let bytes = [
        b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0, 96, //
        b'X', b'Y', b'Z', b'W', 0, 0, 0, 0,
    ];
    let chunks = ChunkReader::new(&bytes)
        .collect::<ReadResult<Vec<_>>>()
        .unwrap();

    assert_eq!(
        chunks,
        alloc::vec![
            RawChunk::new(HEADER_TAG, [0u8, 0, 0, 1, 0, 96].as_slice()),
            RawChunk::new(*b"XYZW", [0u8; 0].as_slice()),
        ]
    );
}

#[test]
fn truncated_chunks() {
    use pretty_assertions::assert_eq;
    let err = ChunkReader::new(b"MTrk\x00\x00").read_chunk().unwrap_err();
    assert_eq!(err.position(), 0);
    assert_eq!(
        *err.cause(),
        ParseError::Chunk(ChunkError::TruncatedChunkHeader { available: 6 })
    );

    let bytes = b"MTrk\x00\x00\x00\x04\x00\xFF";
    let err = ChunkReader::new(bytes).read_chunk().unwrap_err();
    assert_eq!(
        *err.cause(),
        ParseError::Chunk(ChunkError::TruncatedChunk {
            expected: 4,
            available: 2
        })
    );
}

#[test]
fn write_frames_payload() {
    use pretty_assertions::assert_eq;
    let mut out = Vec::new();
    RawChunk::new(TRACK_TAG, [0x00u8, 0xFF, 0x2F, 0x00].as_slice())
        .write(&mut out)
        .unwrap();
    assert_eq!(out, b"MTrk\x00\x00\x00\x04\x00\xFF\x2F\x00");
}
