#![doc = r#"
Contains all Channel Message types

# Hierarchy
```text
                |-----------------|
                | Channel Message |
                |-----------------|
                 /               \
|-----------------------|   |----------------------|
| Channel Voice Message |   | Channel Mode Message |
|-----------------------|   |----------------------|
```

Channel mode messages are control changes on controllers `120..=127`.
They share the control change layout, so both are represented by
[`ChannelVoiceMessage`]; see [`ChannelVoiceMessage::is_channel_mode`].

# Wire layout
```text
1000 cccc  0kkkkkkk 0vvvvvvv   note off
1001 cccc  0kkkkkkk 0vvvvvvv   note on
1010 cccc  0kkkkkkk 0ppppppp   polyphonic key pressure
1011 cccc  0nnnnnnn 0vvvvvvv   control change
1100 cccc  0ppppppp            program change
1101 cccc  0ppppppp            channel pressure
1110 cccc  0lllllll 0mmmmmmm   pitch bend (lsb, msb)
```
"#]

mod voice;
pub use voice::*;
mod voice_event;
pub use voice_event::*;
