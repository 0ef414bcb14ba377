use crate::ParseError;
use thiserror::Error;

#[doc = r#"
An error raised while reading a track, with the offset at which it occurred.

The position is relative to the start of the buffer handed to the reader, and
points at the first byte of the component that failed: the delta-time, the
status byte, or the first data byte of the message.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Reading at Position {position}, {kind}")]
pub struct ReaderError {
    position: usize,
    pub(crate) kind: ReaderErrorKind,
}

/// A kind of error that a reader can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReaderErrorKind {
    /// Parsing errors
    #[error("Parsing {0}")]
    ParseError(#[from] ParseError),
}

impl ReaderError {
    /// Create a reader error from a position and kind
    pub const fn new(position: usize, kind: ReaderErrorKind) -> Self {
        Self { position, kind }
    }

    /// Create a new parse error
    pub const fn parse_error(position: usize, error: ParseError) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::ParseError(error),
        }
    }

    /// Returns the error kind of the reader.
    pub fn error_kind(&self) -> &ReaderErrorKind {
        &self.kind
    }

    /// Returns the underlying parse error
    pub const fn cause(&self) -> &ParseError {
        match &self.kind {
            ReaderErrorKind::ParseError(e) => e,
        }
    }

    /// Returns the position where the read error occurred.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Shift the position by `offset`, for errors raised inside a sub-buffer.
    pub(crate) const fn offset_by(self, offset: usize) -> Self {
        Self {
            position: self.position + offset,
            kind: self.kind,
        }
    }
}

/// The Read Result type (see [`ReaderError`])
pub type ReadResult<T> = Result<T, ReaderError>;
