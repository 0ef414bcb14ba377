#![doc = r#"
Whole MIDI files: a header chunk, track chunks, and any other chunks

Track chunk payloads are decoded with [`decode_track`](crate::decode_track).
Chunks with unrecognized tags are kept as they were found, and written back in
their original position.
"#]

/// Contains the [`MidiFileBuilder`](builder::MidiFileBuilder)
pub mod builder;

pub mod chunk;

mod format;
pub use format::*;

mod header;
pub use header::*;

mod track;
pub use track::*;

mod timing;
pub use timing::*;

use alloc::vec::Vec;

use crate::{
    ParseError,
    file::{
        builder::MidiFileBuilder,
        chunk::{ChunkReader, RawChunk},
    },
    reader::{ReadResult, ReaderError},
    writer::{WriteError, WriteResult, WriterConfig},
};

/// A chunk that follows the header
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FileChunk<'a> {
    /// A decoded `MTrk` chunk
    Track(Track<'a>),
    /// A chunk this crate does not interpret
    Unknown(RawChunk<'a>),
}

#[doc = r#"
A parsed MIDI file

# Example
```rust
# use mtrk::prelude::*;
let bytes = [
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0, 96,
    b'M', b'T', b'r', b'k', 0, 0, 0, 4, 0x00, 0xFF, 0x2F, 0x00,
];
let file = MidiFile::parse(&bytes).unwrap();

assert_eq!(file.format_type(), FormatType::SingleMultiChannel);
assert_eq!(file.timing().ticks_per_quarter_note(), Some(96));
assert_eq!(file.tracks().count(), 1);
assert_eq!(file.to_bytes(WriterConfig::default()).unwrap(), bytes);
```
"#]
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MidiFile<'a> {
    header: Header,
    chunks: Vec<FileChunk<'a>>,
}

impl<'a> MidiFile<'a> {
    /// Parse a set of bytes into a file struct
    ///
    /// Error positions are offsets into `bytes`.
    pub fn parse(bytes: &'a [u8]) -> ReadResult<Self> {
        let mut reader = ChunkReader::new(bytes);
        let mut builder = MidiFileBuilder::default();

        loop {
            let start = reader.buffer_position();
            let Some(chunk) = reader.read_chunk()? else {
                break;
            };
            builder
                .handle_chunk(chunk)
                .map_err(|e| e.offset_by(start))?;
        }

        let file = builder
            .build()
            .map_err(|e| ReaderError::parse_error(reader.buffer_position(), e))?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            format = ?file.format_type(),
            tracks = file.tracks().count(),
            bytes = bytes.len(),
            "parsed midi file"
        );

        Ok(file)
    }

    /// Returns the header
    pub const fn header(&self) -> &Header {
        &self.header
    }

    /// Returns header info
    pub const fn timing(&self) -> Timing {
        self.header.timing()
    }

    /// Returns the format type for the file.
    pub const fn format_type(&self) -> FormatType {
        self.header.format_type()
    }

    /// The chunks following the header, in file order
    pub fn chunks(&self) -> &[FileChunk<'a>] {
        &self.chunks
    }

    /// Iterates over the tracks in file order
    pub fn tracks(&self) -> impl Iterator<Item = &Track<'a>> {
        self.chunks.iter().filter_map(|c| match c {
            FileChunk::Track(t) => Some(t),
            FileChunk::Unknown(_) => None,
        })
    }

    /// Iterates over the chunks this crate does not interpret
    pub fn unknown_chunks(&self) -> impl Iterator<Item = &RawChunk<'a>> {
        self.chunks.iter().filter_map(|c| match c {
            FileChunk::Unknown(u) => Some(u),
            FileChunk::Track(_) => None,
        })
    }

    /// Write the file back out: the header first, then every other chunk in order.
    ///
    /// The header's track count is set to the number of tracks actually written.
    ///
    /// # Errors
    /// [`WriteError::TooManyTracks`] if there are more than `u16::MAX` tracks, and any
    /// error from encoding a track or framing a chunk.
    pub fn to_bytes(&self, config: WriterConfig) -> WriteResult<Vec<u8>> {
        let count = self.tracks().count();
        let num_tracks = u16::try_from(count).map_err(|_| WriteError::TooManyTracks(count))?;

        let mut out = Vec::new();
        self.header
            .with_num_tracks(num_tracks)
            .to_chunk()
            .write(&mut out)?;

        for chunk in &self.chunks {
            match chunk {
                FileChunk::Track(track) => track.to_chunk(config)?.write(&mut out)?,
                FileChunk::Unknown(raw) => raw.write(&mut out)?,
            }
        }
        Ok(out)
    }

    /// Detach the file from the buffer it was parsed from.
    pub fn into_owned(self) -> MidiFile<'static> {
        MidiFile {
            header: self.header,
            chunks: self
                .chunks
                .into_iter()
                .map(|c| match c {
                    FileChunk::Track(t) => FileChunk::Track(t.into_owned()),
                    FileChunk::Unknown(u) => FileChunk::Unknown(u.into_owned()),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
fn parse_error(bytes: &[u8]) -> (usize, ParseError) {
    let err = MidiFile::parse(bytes).unwrap_err();
    (err.position(), *err.cause())
}

#[test]
fn parse_errors_point_into_the_file() {
    use crate::{FileError, SmpteError};
    use pretty_assertions::assert_eq;

    assert_eq!(parse_error(&[]), (0, ParseError::File(FileError::NoHeader)));

    // -26 is not a frame rate
    let bad_division = *b"MThd\x00\x00\x00\x06\x00\x00\x00\x01\xE6\x28";
    assert_eq!(
        parse_error(&bad_division),
        (8, ParseError::Smpte(SmpteError::HeaderFrameTime(-26)))
    );

    // the second event of the track has no running status to continue
    let bad_track = *b"MThd\x00\x00\x00\x06\x00\x00\x00\x01\x00\x60\
                       MTrk\x00\x00\x00\x06\x00\xF6\x00\x40\x00\x00";
    assert_eq!(
        parse_error(&bad_track),
        (25, ParseError::DataByteWithoutRunningStatus(0x40))
    );
}

#[test]
fn unknown_chunks_keep_their_place() {
    use pretty_assertions::assert_eq;
    let bytes = *b"MThd\x00\x00\x00\x06\x00\x01\x00\x02\x00\x60\
                   MTrk\x00\x00\x00\x04\x00\xFF\x2F\x00\
                   XTRA\x00\x00\x00\x02\xAB\xCD\
                   MTrk\x00\x00\x00\x04\x00\xFF\x2F\x00";
    let file = MidiFile::parse(&bytes).unwrap();

    assert_eq!(file.tracks().count(), 2);
    assert!(matches!(file.chunks()[1], FileChunk::Unknown(_)));
    assert_eq!(file.to_bytes(WriterConfig::default()).unwrap(), bytes);
}

#[test]
fn track_count_must_fit_the_header() {
    use pretty_assertions::assert_eq;
    let mut builder = MidiFileBuilder::default();
    builder.header(Header::new(
        FormatType::Simultaneous,
        0,
        Timing::new_ticks_per_quarter_note(96),
    ));
    for _ in 0..=u16::MAX as usize {
        builder.track(Track::default());
    }
    let file = builder.build().unwrap();

    assert_eq!(
        file.to_bytes(WriterConfig::default()),
        Err(WriteError::TooManyTracks(65_536))
    );
}
