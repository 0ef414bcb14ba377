#![doc = r#"
A codec for the event stream inside a Standard MIDI File track chunk.

A track chunk's payload is a sequence of delta-timed messages. Each delta-time is a
variable-length quantity (VLQ), and each message begins with a status byte, unless
the message reuses the previous channel status ("running status").

```text
payload := (delta-time message)*
message := status data*          ; explicit status
         | data+                 ; running status (channel messages only)
```

# Decoding

```rust
# use mtrk::prelude::*;
let payload = [0x00, 0x90, 0x40, 0x60, 0x60, 0x41, 0x61];
let events = decode_track(&payload).unwrap();

assert_eq!(events.len(), 2);
assert_eq!(events[1].delta_time(), 0x60);
```

# Encoding

```rust
# use mtrk::prelude::*;
let events = [
    TrackEvent::new(0, TrackMessage::Meta(MetaMessage::tempo(500_000).unwrap())),
    TrackEvent::new(0, TrackMessage::Meta(MetaMessage::end_of_track())),
];
let payload = encode_track(&events).unwrap();

assert_eq!(decode_track(&payload).unwrap(), events);
```

# Features
- `std` (default): `std::error::Error` for all error types.
- `tracing` (default): diagnostics through the `tracing` crate.
- `serde`: `Serialize`/`Deserialize` for every message type.
"#]
#![no_std]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod byte;
pub use byte::*;

mod channel;
pub use channel::*;

mod error;
pub use error::*;

pub mod vlq;

pub mod message;

mod event;
pub use event::*;

pub mod reader;

pub mod writer;

pub mod file;

pub use reader::decode_track;
pub use writer::{encode_track, encode_track_with};

/// Commonly used types, re-exported for glob imports.
pub mod prelude {
    pub use crate::{
        byte::*,
        channel::*,
        error::*,
        event::*,
        file::{
            FileChunk, FormatType, Header, MidiFile, SmpteFps, SmpteHeader, TicksPerQuarterNote,
            Timing, Track,
            builder::MidiFileBuilder,
            chunk::{ChunkReader, RawChunk},
        },
        message::{
            Decode, Encode, MessageFamily, TrackMessage,
            channel::*,
            meta::*,
            realtime::*,
            sysex::*,
            system_common::*,
        },
        reader::{ReadResult, Reader, ReaderError, ReaderErrorKind, RunningStatus, decode_track},
        vlq::{decode_vlq, encode_vlq, write_vlq},
        writer::{WriteError, WriteResult, Writer, WriterConfig, encode_track, encode_track_with},
    };
}
