//! Channel mode events
//!
//! Mode events share the controller change's 0xB status nibble; the wire
//! format distinguishes them purely by the first data byte, which holds a
//! mode code in the reserved range 0x78 through 0x7F. A second data byte
//! always follows, bounded by a kind-specific maximum (zero for most kinds).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The eight channel mode event kinds, identified by codes 0x78 through
/// 0x7F in the first data byte
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ModeKind {
    /// All sound off, code 0x78
    SoundOff,
    /// Reset all controllers, code 0x79
    ResetControllers,
    /// Local control on/off, code 0x7A
    LocalControl,
    /// All notes off, code 0x7B
    NotesOff,
    /// Omni mode off, code 0x7C
    OmniOff,
    /// Omni mode on, code 0x7D
    OmniOn,
    /// Mono mode on, code 0x7E
    MonoOn,
    /// Poly mode on, code 0x7F
    PolyOn,
}

impl ModeKind {
    /// Maps a first-data-byte code to its mode kind
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x78 => Some(Self::SoundOff),
            0x79 => Some(Self::ResetControllers),
            0x7A => Some(Self::LocalControl),
            0x7B => Some(Self::NotesOff),
            0x7C => Some(Self::OmniOff),
            0x7D => Some(Self::OmniOn),
            0x7E => Some(Self::MonoOn),
            0x7F => Some(Self::PolyOn),
            _ => None,
        }
    }

    /// The reserved controller-range code this kind writes as its first
    /// data byte
    pub fn code(self) -> u8 {
        match self {
            Self::SoundOff => 0x78,
            Self::ResetControllers => 0x79,
            Self::LocalControl => 0x7A,
            Self::NotesOff => 0x7B,
            Self::OmniOff => 0x7C,
            Self::OmniOn => 0x7D,
            Self::MonoOn => 0x7E,
            Self::PolyOn => 0x7F,
        }
    }

    /// Largest legal value for the second data byte
    pub fn data_max(self) -> u8 {
        match self {
            Self::LocalControl => 0x7F,
            Self::MonoOn => 0x10,
            _ => 0,
        }
    }
}

/// A channel mode event
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModeEvent {
    /// Which mode event this is
    pub kind: ModeKind,
    /// Channel number, 0 through 15
    pub channel: u8,
    /// Second data byte; meaningful only for kinds with a nonzero maximum
    pub data: u8,
}

impl ModeEvent {
    /// The full status byte this event writes: controller nibble over
    /// channel
    pub fn status_byte(&self) -> u8 {
        0xB0 | (self.channel & 0x0F)
    }
}

#[cfg(test)]
mod tests {
    use super::{ModeEvent, ModeKind};

    #[test]
    fn code_mapping_round_trips() {
        for code in 0x78..=0x7F {
            let kind = ModeKind::from_code(code).unwrap();
            assert_eq!(kind.code(), code)
        }
        assert_eq!(ModeKind::from_code(0x77), None)
    }

    #[test]
    fn data_maxima_follow_the_kind_table() {
        assert_eq!(ModeKind::LocalControl.data_max(), 0x7F);
        assert_eq!(ModeKind::MonoOn.data_max(), 0x10);
        assert_eq!(ModeKind::SoundOff.data_max(), 0);
        assert_eq!(ModeKind::PolyOn.data_max(), 0)
    }

    #[test]
    fn status_byte_uses_the_controller_nibble() {
        let event = ModeEvent {
            kind: ModeKind::ResetControllers,
            channel: 0x2,
            data: 0,
        };
        assert_eq!(event.status_byte(), 0xB2)
    }
}
