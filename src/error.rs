use thiserror::Error;

#[doc = r#"
Errors produced while interpreting bytes as MIDI data.

Every variant is fatal for the chunk being decoded: there is no
resynchronisation or skipping.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A variable-length quantity never terminated, or decoded past `0x0FFFFFFF`.
    #[error("Malformed variable-length quantity after {read} bytes")]
    MalformedVlq {
        /// Bytes examined before giving up
        read: usize,
    },
    /// A data byte appeared where a status byte was required and no running status was active.
    #[error("Data byte {0:#04X} without an active running status")]
    DataByteWithoutRunningStatus(u8),
    /// A status byte that does not start any track message.
    #[error("Unknown status byte {0:#04X}")]
    UnknownStatusByte(u8),
    /// A delta-time was the last thing in the buffer.
    #[error("Expected a message after the delta-time, found end of data")]
    MissingMessage,
    /// A channel message has fewer data bytes than its kind requires.
    #[error("Channel message needs {expected} data bytes, {available} available")]
    TruncatedChannelEvent {
        /// Data bytes the message kind requires
        expected: usize,
        /// Bytes left in the buffer
        available: usize,
    },
    /// A system common message has fewer data bytes than its kind requires.
    #[error("System common message needs {expected} data bytes, {available} available")]
    TruncatedSystemCommon {
        /// Data bytes the message kind requires
        expected: usize,
        /// Bytes left in the buffer
        available: usize,
    },
    /// A system exclusive message declares more bytes than remain.
    #[error("System exclusive message declares {expected} bytes, {available} available")]
    TruncatedSysex {
        /// Declared payload length
        expected: usize,
        /// Bytes left in the buffer
        available: usize,
    },
    /// A meta message declares more bytes than remain, or is missing its type byte.
    #[error("Meta message needs {expected} bytes, {available} available")]
    TruncatedMeta {
        /// Declared payload length (or 1 for the missing type byte)
        expected: usize,
        /// Bytes left in the buffer
        available: usize,
    },
    /// A byte with its leading bit set was used as a data byte.
    #[error("Invalid data byte {0:#04X}: leading bit is set")]
    InvalidDataByte(u8),
    /// A 14-bit value was out of range.
    #[error("Invalid 14-bit value {0}")]
    InvalidDataWord(u16),
    /// Chunk framing errors
    #[error("Chunk: {0}")]
    Chunk(#[from] ChunkError),
    /// Header chunk errors
    #[error("Header: {0}")]
    Header(#[from] HeaderError),
    /// SMPTE errors
    #[error("SMPTE: {0}")]
    Smpte(#[from] SmpteError),
    /// Whole file errors
    #[error("File: {0}")]
    File(#[from] FileError),
}

/// Errors in the framing of chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChunkError {
    /// Fewer than the 8 bytes of a chunk tag and length remain.
    #[error("Chunk header needs 8 bytes, {available} available")]
    TruncatedChunkHeader {
        /// Bytes left in the buffer
        available: usize,
    },
    /// The chunk declares more payload bytes than remain.
    #[error("Chunk declares {expected} bytes, {available} available")]
    TruncatedChunk {
        /// Declared payload length
        expected: usize,
        /// Bytes left in the buffer
        available: usize,
    },
    /// The header chunk payload is not 6 bytes long
    #[error("Header chunk must be 6 bytes, found {0}")]
    InvalidHeaderLength(usize),
    /// A second header chunk was found
    #[error("Found a second header chunk")]
    DuplicateHeader,
    /// A format 0 file with more than one track
    #[error("A single multi-channel file contains more than one track")]
    MultipleTracksForSingleMultiChannel,
}

/// Errors in the header chunk contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// Format other than 0, 1 or 2
    #[error("Invalid format {0}")]
    InvalidFormat(u16),
}

/// Errors reading SMPTE values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SmpteError {
    /// The header division names a frame rate other than -24, -25, -29 or -30
    #[error("Invalid header frame rate {0}")]
    HeaderFrameTime(i8),
    /// SMPTE offset data must be 5 bytes
    #[error("Invalid SMPTE offset length {0}")]
    Length(usize),
    /// Frame type bits outside `0..=3`
    #[error("Invalid frame type {0}")]
    TrackFrame(u8),
    /// Hour above 23
    #[error("Invalid hour offset {0}")]
    HourOffset(u8),
    /// Minute above 59
    #[error("Invalid minute offset {0}")]
    MinuteOffset(u8),
    /// Second above 59
    #[error("Invalid second offset {0}")]
    SecondOffset(u8),
    /// Subframe above 99
    #[error("Invalid subframe {0}")]
    Subframe(u8),
}

/// Errors assembling a whole file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FileError {
    /// No header chunk was found
    #[error("No header chunk found")]
    NoHeader,
    /// A chunk handed to the track decoder is not a track chunk.
    #[error("Chunk {0:?} does not carry track events")]
    UnrecognizedChunkPayload([u8; 4]),
}
