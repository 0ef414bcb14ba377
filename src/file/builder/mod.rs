use alloc::vec::Vec;

use super::{FileChunk, MidiFile};
use crate::{
    ChunkError, FileError, ParseError,
    file::{
        FormatType, Header, Track,
        chunk::{CHUNK_PREFIX_LEN, RawChunk},
    },
    reader::{ReadResult, ReaderError},
};

/// A builder used to create a new [`MidiFile`].
///
/// Chunks may be handed over in any order. The header does not have to come
/// first, but there may only be one.
#[derive(Debug, Default)]
pub struct MidiFileBuilder<'a> {
    header: Option<Header>,
    chunks: Vec<FileChunk<'a>>,
}

impl<'a> MidiFileBuilder<'a> {
    /// Handles a chunk of a midi file.
    ///
    /// Error positions are relative to the start of the chunk's tag.
    pub fn handle_chunk(&mut self, chunk: RawChunk<'a>) -> ReadResult<()> {
        if chunk.is_header() {
            if self.header.is_some() {
                return Err(ReaderError::parse_error(
                    0,
                    ChunkError::DuplicateHeader.into(),
                ));
            }
            let header = Header::parse(chunk.payload())
                .map_err(|e| ReaderError::parse_error(CHUNK_PREFIX_LEN, e))?;
            self.header = Some(header);
        } else if chunk.is_track() {
            let track = Track::from_chunk(&chunk).map_err(|e| e.offset_by(CHUNK_PREFIX_LEN))?;
            self.chunks.push(FileChunk::Track(track));
        } else {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                tag = ?chunk.tag(),
                len = chunk.payload().len(),
                "keeping unrecognized chunk"
            );
            self.chunks.push(FileChunk::Unknown(chunk));
        }
        Ok(())
    }

    /// Set the header of the file
    pub fn header(&mut self, header: Header) -> &mut Self {
        self.header = Some(header);
        self
    }

    /// Append a track
    pub fn track(&mut self, track: Track<'a>) -> &mut Self {
        self.chunks.push(FileChunk::Track(track));
        self
    }

    /// Attempts to finish the midifile from the provided chunks.
    pub fn build(self) -> Result<MidiFile<'a>, ParseError> {
        let Some(header) = self.header else {
            return Err(FileError::NoHeader.into());
        };

        let num_tracks = self
            .chunks
            .iter()
            .filter(|c| matches!(c, FileChunk::Track(_)))
            .count();

        if header.format_type() == FormatType::SingleMultiChannel && num_tracks > 1 {
            return Err(ChunkError::MultipleTracksForSingleMultiChannel.into());
        }

        #[cfg(feature = "tracing")]
        if num_tracks != usize::from(header.num_tracks()) {
            tracing::warn!(
                announced = header.num_tracks(),
                found = num_tracks,
                "header track count does not match the track chunks"
            );
        }

        Ok(MidiFile {
            header,
            chunks: self.chunks,
        })
    }
}

#[test]
fn build_requires_header() {
    use pretty_assertions::assert_eq;
    let mut builder = MidiFileBuilder::default();
    builder.track(Track::default());
    assert_eq!(
        builder.build().unwrap_err(),
        ParseError::File(FileError::NoHeader)
    );
}

#[test]
fn single_multichannel_holds_one_track() {
    use crate::file::Timing;
    use pretty_assertions::assert_eq;
    let mut builder = MidiFileBuilder::default();
    builder
        .header(Header::new(
            FormatType::SingleMultiChannel,
            1,
            Timing::new_ticks_per_quarter_note(96),
        ))
        .track(Track::default())
        .track(Track::default());
    assert_eq!(
        builder.build().unwrap_err(),
        ParseError::Chunk(ChunkError::MultipleTracksForSingleMultiChannel)
    );
}

#[test]
fn second_header_is_rejected() {
    use pretty_assertions::assert_eq;
    let header = RawChunk::new(crate::file::chunk::HEADER_TAG, [0u8, 0, 0, 1, 0, 96].as_slice());
    let mut builder = MidiFileBuilder::default();
    builder.handle_chunk(header.clone()).unwrap();
    let err = builder.handle_chunk(header).unwrap_err();
    assert_eq!(*err.cause(), ParseError::Chunk(ChunkError::DuplicateHeader));
}
