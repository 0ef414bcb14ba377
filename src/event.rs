use crate::message::TrackMessage;

#[doc = r#"
A message and the ticks elapsed since the previous event of its track.

The first event of a track measures its delta-time from the start of the track.

# Example
```rust
# use mtrk::prelude::*;
let note = ChannelVoiceMessage::note_on(
    Channel::One,
    DataByte::new(60).unwrap(),
    DataByte::new(100).unwrap(),
);
let event = TrackEvent::new(96, note);

assert_eq!(event.delta_time(), 96);
assert_eq!(event.message().status(), 0x90);
```
"#]
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackEvent<'a> {
    pub(crate) delta_time: u32,
    pub(crate) message: TrackMessage<'a>,
}

impl<'a> TrackEvent<'a> {
    /// Create a new track event
    pub fn new(delta_time: u32, message: impl Into<TrackMessage<'a>>) -> Self {
        Self {
            delta_time,
            message: message.into(),
        }
    }

    /// Ticks since the previous event
    pub const fn delta_time(&self) -> u32 {
        self.delta_time
    }

    /// The message carried by this event
    pub const fn message(&self) -> &TrackMessage<'a> {
        &self.message
    }

    /// Take the message out of the event
    pub fn into_message(self) -> TrackMessage<'a> {
        self.message
    }

    /// Detach the event from the buffer it was decoded from.
    pub fn into_owned(self) -> TrackEvent<'static> {
        TrackEvent {
            delta_time: self.delta_time,
            message: self.message.into_owned(),
        }
    }
}
