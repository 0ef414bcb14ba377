use crate::{
    ChunkError, HeaderError, ParseError,
    file::{
        FormatType, Timing,
        chunk::{HEADER_TAG, RawChunk},
    },
};

#[doc = r#"
The contents of the `MThd` chunk

```text
format: u16 BE | track count: u16 BE | division: u16 BE
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    format: FormatType,
    num_tracks: u16,
    timing: Timing,
}

impl Header {
    /// The payload length of every header chunk
    pub const LEN: usize = 6;

    /// Create a new header
    pub const fn new(format: FormatType, num_tracks: u16, timing: Timing) -> Self {
        Self {
            format,
            num_tracks,
            timing,
        }
    }

    /// Parse the payload of a header chunk
    pub fn parse(payload: &[u8]) -> Result<Self, ParseError> {
        let &[f0, f1, n0, n1, d0, d1] = payload else {
            return Err(ChunkError::InvalidHeaderLength(payload.len()).into());
        };

        let format = u16::from_be_bytes([f0, f1]);
        let format =
            FormatType::try_from(format).map_err(|_| HeaderError::InvalidFormat(format))?;

        Ok(Self {
            format,
            num_tracks: u16::from_be_bytes([n0, n1]),
            timing: Timing::parse([d0, d1])?,
        })
    }

    /// The payload of a header chunk
    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let [f0, f1] = u16::from(self.format).to_be_bytes();
        let [n0, n1] = self.num_tracks.to_be_bytes();
        let [d0, d1] = self.timing.to_bytes();
        [f0, f1, n0, n1, d0, d1]
    }

    /// The header as a complete `MThd` chunk
    pub fn to_chunk(&self) -> RawChunk<'static> {
        RawChunk::new(HEADER_TAG, self.to_bytes().to_vec())
    }

    /// How the tracks relate to each other
    pub const fn format_type(&self) -> FormatType {
        self.format
    }

    /// The number of tracks the header announces
    pub const fn num_tracks(&self) -> u16 {
        self.num_tracks
    }

    /// Get the timing props
    pub const fn timing(&self) -> Timing {
        self.timing
    }

    pub(crate) const fn with_num_tracks(mut self, num_tracks: u16) -> Self {
        self.num_tracks = num_tracks;
        self
    }
}

#[test]
fn parse_header() {
    use pretty_assertions::assert_eq;
    let header = Header::parse(&[0, 1, 0, 3, 0x01, 0xE0]).unwrap();
    assert_eq!(header.format_type(), FormatType::Simultaneous);
    assert_eq!(header.num_tracks(), 3);
    assert_eq!(header.timing().ticks_per_quarter_note(), Some(480));
    assert_eq!(header.to_bytes(), [0, 1, 0, 3, 0x01, 0xE0]);
}

#[test]
fn parse_invalid_header() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        Header::parse(&[0, 1, 0, 3, 0x01]),
        Err(ParseError::Chunk(ChunkError::InvalidHeaderLength(5)))
    );
    assert_eq!(
        Header::parse(&[0, 3, 0, 1, 0, 96]),
        Err(ParseError::Header(HeaderError::InvalidFormat(3)))
    );
}
