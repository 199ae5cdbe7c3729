//! System exclusive events
//!
//! A sysex event is a marker byte (0xF0 for a message start, 0xF7 for a
//! continuation or escape), a variable-length payload length, then the
//! payload. The codec carries the payload opaquely; interpreting it is the
//! caller's business.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The two sysex marker bytes
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SysexMarker {
    /// Message start, 0xF0
    Initiator,
    /// Continuation or escaped raw bytes, 0xF7
    Escape,
}

impl SysexMarker {
    /// Classifies a marker byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0xF0 => Some(Self::Initiator),
            0xF7 => Some(Self::Escape),
            _ => None,
        }
    }

    /// The marker byte written to the stream
    pub fn byte(self) -> u8 {
        match self {
            Self::Initiator => 0xF0,
            Self::Escape => 0xF7,
        }
    }
}

/// A system exclusive event: its marker plus the owned payload
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SysexEvent {
    /// Which marker byte introduced the event
    pub marker: SysexMarker,
    /// Payload bytes; the wire length field is this sequence's length
    pub data: Vec<u8>,
}

impl SysexEvent {
    /// Builds a sysex event from a marker and payload
    pub fn new(marker: SysexMarker, data: Vec<u8>) -> Self {
        Self { marker, data }
    }
}
