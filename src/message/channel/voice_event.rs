use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::{DataByte, DataWord, ParseError};

/// The kind of a channel message, identified by the high nibble of its status byte.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum VoiceKind {
    NoteOff = 0x8,
    NoteOn = 0x9,
    PolyKeyPressure = 0xA,
    ControlChange = 0xB,
    ProgramChange = 0xC,
    ChannelPressure = 0xD,
    PitchBend = 0xE,
}

impl VoiceKind {
    /// Identify the kind from a full status byte.
    pub fn from_status(status: u8) -> Result<Self, ParseError> {
        Self::try_from(status >> 4).map_err(|_| ParseError::UnknownStatusByte(status))
    }

    /// Number of data bytes following the status byte.
    pub const fn data_len(&self) -> usize {
        match self {
            Self::ProgramChange | Self::ChannelPressure => 1,
            _ => 2,
        }
    }
}

#[doc = r#"
The content of a channel voice message

Two-byte kinds take their first field from the first data byte and their
second field from the second data byte. [`VoiceEvent::PitchBend`] joins both
bytes into one 14-bit value, least significant byte first.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VoiceEvent {
    /// Stop playing a key
    NoteOff {
        /// The key released
        key: DataByte,
        /// Release velocity
        velocity: DataByte,
    },
    /// Start playing a key. A velocity of zero is conventionally a note off.
    NoteOn {
        /// The key pressed
        key: DataByte,
        /// Attack velocity
        velocity: DataByte,
    },
    /// Pressure applied to a held key
    PolyKeyPressure {
        /// The key held
        key: DataByte,
        /// New pressure
        pressure: DataByte,
    },
    /// Move a controller, or a channel mode message for controllers `120..=127`
    ControlChange {
        /// Controller number
        controller: DataByte,
        /// New controller value
        value: DataByte,
    },
    /// Select a program (instrument)
    ProgramChange {
        /// Program number
        program: DataByte,
    },
    /// Pressure applied to the whole channel
    ChannelPressure {
        /// New pressure
        pressure: DataByte,
    },
    /// Bend the pitch of the channel. `0x2000` is centered.
    PitchBend {
        /// The combined 14-bit bend
        value: DataWord,
    },
}

impl VoiceEvent {
    /// Returns the kind of this event
    pub const fn kind(&self) -> VoiceKind {
        match self {
            Self::NoteOff { .. } => VoiceKind::NoteOff,
            Self::NoteOn { .. } => VoiceKind::NoteOn,
            Self::PolyKeyPressure { .. } => VoiceKind::PolyKeyPressure,
            Self::ControlChange { .. } => VoiceKind::ControlChange,
            Self::ProgramChange { .. } => VoiceKind::ProgramChange,
            Self::ChannelPressure { .. } => VoiceKind::ChannelPressure,
            Self::PitchBend { .. } => VoiceKind::PitchBend,
        }
    }

    /// The data bytes as they appear on the wire. The second is `None`
    /// for program change and channel pressure.
    pub const fn data(&self) -> (DataByte, Option<DataByte>) {
        match *self {
            Self::NoteOff { key, velocity } | Self::NoteOn { key, velocity } => {
                (key, Some(velocity))
            }
            Self::PolyKeyPressure { key, pressure } => (key, Some(pressure)),
            Self::ControlChange { controller, value } => (controller, Some(value)),
            Self::ProgramChange { program } => (program, None),
            Self::ChannelPressure { pressure } => (pressure, None),
            Self::PitchBend { value } => (value.lsb(), Some(value.msb())),
        }
    }

    /// Build an event of `kind` from its data bytes.
    ///
    /// `second` is ignored for one-byte kinds.
    pub const fn from_data(kind: VoiceKind, first: DataByte, second: DataByte) -> Self {
        match kind {
            VoiceKind::NoteOff => Self::NoteOff {
                key: first,
                velocity: second,
            },
            VoiceKind::NoteOn => Self::NoteOn {
                key: first,
                velocity: second,
            },
            VoiceKind::PolyKeyPressure => Self::PolyKeyPressure {
                key: first,
                pressure: second,
            },
            VoiceKind::ControlChange => Self::ControlChange {
                controller: first,
                value: second,
            },
            VoiceKind::ProgramChange => Self::ProgramChange { program: first },
            VoiceKind::ChannelPressure => Self::ChannelPressure { pressure: first },
            VoiceKind::PitchBend => Self::PitchBend {
                value: DataWord::from_bytes(first, second),
            },
        }
    }
}

#[test]
fn kinds_from_status_nibble() {
    use pretty_assertions::assert_eq;
    assert_eq!(VoiceKind::from_status(0x83), Ok(VoiceKind::NoteOff));
    assert_eq!(VoiceKind::from_status(0xC0), Ok(VoiceKind::ProgramChange));
    assert_eq!(VoiceKind::from_status(0xEF), Ok(VoiceKind::PitchBend));
    assert_eq!(VoiceKind::from_status(0xF0), Err(ParseError::UnknownStatusByte(0xF0)));
    assert_eq!(VoiceKind::ChannelPressure.data_len(), 1);
    assert_eq!(VoiceKind::PolyKeyPressure.data_len(), 2);
}

#[test]
fn first_byte_is_first_value() {
    use pretty_assertions::assert_eq;
    let first = DataByte::new_unchecked(0x40);
    let second = DataByte::new_unchecked(0x60);

    let event = VoiceEvent::from_data(VoiceKind::ControlChange, first, second);
    assert_eq!(
        event,
        VoiceEvent::ControlChange {
            controller: first,
            value: second
        }
    );
    assert_eq!(event.data(), (first, Some(second)));

    let event = VoiceEvent::from_data(VoiceKind::ProgramChange, first, second);
    assert_eq!(event.data(), (first, None));
}
