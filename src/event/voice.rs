//! Channel voice events
//!
//! Voice events carry the musical content of a track. On the wire each one is
//! a status byte (kind nibble in the high four bits, channel in the low four)
//! followed by one or two data bytes depending on the kind.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The seven channel voice event kinds, identified on the wire by the high
/// nibble of the status byte (0x8 through 0xE)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VoiceKind {
    /// Note released, status nibble 0x8
    NoteOff,
    /// Note depressed, status nibble 0x9
    NoteOn,
    /// Per-key aftertouch, status nibble 0xA
    PolyPressure,
    /// Controller value change, status nibble 0xB
    Controller,
    /// Patch number change, status nibble 0xC
    ProgramChange,
    /// Per-channel aftertouch, status nibble 0xD
    ChannelPressure,
    /// Pitch wheel change, status nibble 0xE
    PitchBend,
}

impl VoiceKind {
    /// Maps a status byte's high nibble to its voice kind
    pub fn from_status_nibble(nibble: u8) -> Option<Self> {
        match nibble {
            0x8 => Some(Self::NoteOff),
            0x9 => Some(Self::NoteOn),
            0xA => Some(Self::PolyPressure),
            0xB => Some(Self::Controller),
            0xC => Some(Self::ProgramChange),
            0xD => Some(Self::ChannelPressure),
            0xE => Some(Self::PitchBend),
            _ => None,
        }
    }

    /// The high nibble this kind writes into its status byte
    pub fn status_nibble(self) -> u8 {
        match self {
            Self::NoteOff => 0x8,
            Self::NoteOn => 0x9,
            Self::PolyPressure => 0xA,
            Self::Controller => 0xB,
            Self::ProgramChange => 0xC,
            Self::ChannelPressure => 0xD,
            Self::PitchBend => 0xE,
        }
    }

    /// How many data bytes follow the status byte
    pub fn data_byte_count(self) -> u8 {
        match self {
            Self::ProgramChange | Self::ChannelPressure => 1,
            _ => 2,
        }
    }

    /// Largest legal value for the first data byte.
    ///
    /// Controller tops out at 0x77 because 0x78 through 0x7F are reserved
    /// for the channel mode events.
    pub fn data1_max(self) -> u8 {
        match self {
            Self::Controller => 0x77,
            _ => 0x7F,
        }
    }

    /// Largest legal value for the second data byte, where one exists
    pub fn data2_max(self) -> u8 {
        match self {
            Self::ProgramChange | Self::ChannelPressure => 0,
            _ => 0x7F,
        }
    }
}

/// A channel voice event
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VoiceEvent {
    /// Which voice event this is
    pub kind: VoiceKind,
    /// Channel number, 0 through 15
    pub channel: u8,
    /// First data byte (key, controller number, program...)
    pub data1: u8,
    /// Second data byte (velocity, controller value...); unused for
    /// one-data-byte kinds
    pub data2: u8,
}

impl VoiceEvent {
    /// The full status byte this event writes: kind nibble over channel
    pub fn status_byte(&self) -> u8 {
        (self.kind.status_nibble() << 4) | (self.channel & 0x0F)
    }
}

/// Controller numbers with assigned meanings.
///
/// Not every assigned number is listed, only the ones sequenced files reach
/// for routinely.
pub mod controller {
    /// Bank select, coarse
    pub const BANK_SELECT_MSB: u8 = 0x00;
    /// Modulation wheel
    pub const MODULATION_WHEEL: u8 = 0x01;
    /// Breath controller
    pub const BREATH: u8 = 0x02;
    /// Foot controller
    pub const FOOT: u8 = 0x04;
    /// Portamento time
    pub const PORTAMENTO_TIME: u8 = 0x05;
    /// Data entry, coarse
    pub const DATA_ENTRY_MSB: u8 = 0x06;
    /// Channel volume
    pub const CHANNEL_VOLUME: u8 = 0x07;
    /// Stereo balance
    pub const BALANCE: u8 = 0x08;
    /// Pan position
    pub const PAN: u8 = 0x0A;
    /// Expression pedal
    pub const EXPRESSION: u8 = 0x0B;
    /// Bank select, fine
    pub const BANK_SELECT_LSB: u8 = 0x20;
    /// Damper (sustain) pedal
    pub const DAMPER_PEDAL: u8 = 0x40;
    /// Portamento on/off
    pub const PORTAMENTO_SWITCH: u8 = 0x41;
    /// Sostenuto pedal
    pub const SOSTENUTO: u8 = 0x42;
    /// Soft pedal
    pub const SOFT_PEDAL: u8 = 0x43;
    /// Legato footswitch
    pub const LEGATO: u8 = 0x44;
    /// Portamento control
    pub const PORTAMENTO: u8 = 0x54;
}
