use crate::SmpteError;
use thiserror::Error;

/// An error raised while encoding a track.
///
/// Encoding fails only for values the wire format cannot represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WriteError {
    /// A delta-time or length above `0x0FFF_FFFF`
    #[error("{0:#X} does not fit in a variable-length quantity")]
    VlqOutOfRange(u32),
    /// A sysex or meta payload whose length does not fit in a variable-length quantity
    #[error("Payload of {0} bytes is too long to encode")]
    PayloadTooLong(usize),
    /// A tempo above `0xFF_FFFF` microseconds per quarter note
    #[error("Tempo of {0} microseconds per quarter note does not fit in 3 bytes")]
    TempoOutOfRange(u32),
    /// An SMPTE offset field outside the range the meta message can carry
    #[error("Invalid SMPTE offset: {0}")]
    InvalidSmpteOffset(#[from] SmpteError),
    /// More tracks than the header's 16-bit count can describe
    #[error("{0} tracks do not fit in a header")]
    TooManyTracks(usize),
}

/// The Write Result type (see [`WriteError`])
pub type WriteResult<T> = Result<T, WriteError>;
