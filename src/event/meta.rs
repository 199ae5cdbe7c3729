//! Meta events
//!
//! Meta events carry sequencer-level information: track names, tempo
//! changes, the mandatory end-of-track marker. On the wire they are `0xFF`,
//! a type byte, a variable-length payload length, then the payload. Types
//! outside the known table pass through as [`MetaKind::Unknown`] so a file
//! using vendor extensions survives a decode/encode round trip.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Known meta event types plus a raw-byte passthrough for unrecognized
/// ones
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MetaKind {
    /// Sequence number, type 0x00, length 2
    SequenceNumber,
    /// Free text, type 0x01
    Text,
    /// Copyright notice, type 0x02
    Copyright,
    /// Track name, type 0x03
    TrackName,
    /// Instrument name, type 0x04
    InstrumentName,
    /// Lyric, type 0x05
    Lyric,
    /// Marker, type 0x06
    Marker,
    /// Cue point, type 0x07
    CuePoint,
    /// Channel prefix, type 0x20, length 1
    ChannelPrefix,
    /// End of track, type 0x2F, length 0
    EndOfTrack,
    /// Tempo in microseconds per quarter note, type 0x51, length 3
    SetTempo,
    /// SMPTE offset, type 0x54, length 5
    SmpteOffset,
    /// Time signature, type 0x58, length 4
    TimeSignature,
    /// Key signature, type 0x59, length 2
    KeySignature,
    /// Sequencer-specific payload, type 0x7F
    SequencerSpecific,
    /// A type byte outside the known table, carried through verbatim
    Unknown(u8),
}

impl MetaKind {
    /// Classifies a type byte, falling back to [`MetaKind::Unknown`]
    pub fn from_type_byte(byte: u8) -> Self {
        match byte {
            0x00 => Self::SequenceNumber,
            0x01 => Self::Text,
            0x02 => Self::Copyright,
            0x03 => Self::TrackName,
            0x04 => Self::InstrumentName,
            0x05 => Self::Lyric,
            0x06 => Self::Marker,
            0x07 => Self::CuePoint,
            0x20 => Self::ChannelPrefix,
            0x2F => Self::EndOfTrack,
            0x51 => Self::SetTempo,
            0x54 => Self::SmpteOffset,
            0x58 => Self::TimeSignature,
            0x59 => Self::KeySignature,
            0x7F => Self::SequencerSpecific,
            other => Self::Unknown(other),
        }
    }

    /// The type byte written after the 0xFF status
    pub fn type_byte(self) -> u8 {
        match self {
            Self::SequenceNumber => 0x00,
            Self::Text => 0x01,
            Self::Copyright => 0x02,
            Self::TrackName => 0x03,
            Self::InstrumentName => 0x04,
            Self::Lyric => 0x05,
            Self::Marker => 0x06,
            Self::CuePoint => 0x07,
            Self::ChannelPrefix => 0x20,
            Self::EndOfTrack => 0x2F,
            Self::SetTempo => 0x51,
            Self::SmpteOffset => 0x54,
            Self::TimeSignature => 0x58,
            Self::KeySignature => 0x59,
            Self::SequencerSpecific => 0x7F,
            Self::Unknown(byte) => byte,
        }
    }

    /// Table-declared payload length, or `None` for variable-length kinds
    pub fn expected_length(self) -> Option<usize> {
        match self {
            Self::SequenceNumber | Self::KeySignature => Some(2),
            Self::ChannelPrefix => Some(1),
            Self::EndOfTrack => Some(0),
            Self::SetTempo => Some(3),
            Self::SmpteOffset => Some(5),
            Self::TimeSignature => Some(4),
            Self::Text
            | Self::Copyright
            | Self::TrackName
            | Self::InstrumentName
            | Self::Lyric
            | Self::Marker
            | Self::CuePoint
            | Self::SequencerSpecific
            | Self::Unknown(_) => None,
        }
    }

    /// Returns false for the raw-byte passthrough variant
    pub fn is_known(self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

/// A meta event: a classified type plus its owned payload bytes
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MetaEvent {
    /// The event's classified type
    pub kind: MetaKind,
    /// Payload bytes; the wire length field is this sequence's length
    pub data: Vec<u8>,
}

impl MetaEvent {
    /// Builds a meta event from a kind and payload
    pub fn new(kind: MetaKind, data: Vec<u8>) -> Self {
        Self { kind, data }
    }

    /// The zero-length end-of-track event every track must finish with
    pub fn end_of_track() -> Self {
        Self {
            kind: MetaKind::EndOfTrack,
            data: vec![],
        }
    }
}
