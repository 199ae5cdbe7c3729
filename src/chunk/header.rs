//! File header chunk
//!
//! The header chunk's 6-byte payload holds three big-endian 16-bit fields:
//! the file format, the track count, and the division field describing the
//! time base. The division is a tagged choice — when its top bit is clear
//! the low 15 bits are ticks per quarter note; when set, the upper byte
//! carries a frames-per-second value (24, 25 or 30, with 29 normalized to
//! 30) and the lower byte ticks per frame.

use crate::{
    chunk::{Chunk, ChunkTag},
    error::CodecError,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The overall organization of the file; only three values are valid
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Format {
    /// A single multi-channel track
    Zero,
    /// One or more simultaneous tracks of a sequence
    One,
    /// One or more sequentially independent single-track patterns
    Two,
}

impl Format {
    /// Maps the header's format field to a format
    pub fn from_field(field: u16) -> Result<Self, CodecError> {
        match field {
            0 => Ok(Self::Zero),
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            _ => Err(CodecError::HeaderFormatInvalid),
        }
    }

    /// The value written into the header's format field
    pub fn field(self) -> u16 {
        match self {
            Self::Zero => 0,
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

/// The file-level time base, a tagged choice between the two division
/// interpretations
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Division {
    /// Metrical time: ticks per quarter note in the low 15 bits
    TicksPerQuarterNote(u16),
    /// Time-code-based time: frames per second and ticks per frame
    TicksPerFrame {
        /// Frames per second; only 24, 25 and 30 are valid
        fps: u8,
        /// Ticks per frame
        tpf: u8,
    },
}

impl Division {
    /// Interprets the header's 16-bit division field.
    ///
    /// An fps value of 29 (shorthand for 29.97 drop-frame) normalizes to
    /// 30; anything outside 24/25/30 fails.
    pub fn from_field(field: u16) -> Result<Self, CodecError> {
        if field & 0x8000 == 0 {
            return Ok(Self::TicksPerQuarterNote(field & 0x7FFF));
        }

        let fps = ((field & 0x7F00) >> 8) as u8;
        let fps = match fps {
            29 => 30,
            24 | 25 | 30 => fps,
            _ => return Err(CodecError::HeaderFormatInvalid),
        };
        Ok(Self::TicksPerFrame {
            fps,
            tpf: (field & 0xFF) as u8,
        })
    }

    /// The 16-bit division field this time base writes.
    ///
    /// # Panics
    ///
    /// Panics if a ticks-per-quarter-note value has its top bit set, or an
    /// fps value does not fit in 7 bits; both would corrupt the tag bit.
    pub fn field(self) -> u16 {
        match self {
            Self::TicksPerQuarterNote(tpqn) => {
                assert!(tpqn & 0x8000 == 0, "ticks per quarter note overflows 15 bits");
                tpqn
            }
            Self::TicksPerFrame { fps, tpf } => {
                assert!(fps < 0x80, "frames per second overflows 7 bits");
                0x8000 | (u16::from(fps) << 8) | u16::from(tpf)
            }
        }
    }
}

/// The decoded contents of a header chunk
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FileHeader {
    /// The file's format
    pub format: Format,
    /// Number of track chunks that follow the header
    pub track_count: u16,
    /// The file's time base
    pub division: Division,
}

impl FileHeader {
    /// Payload length of every header chunk
    pub const PAYLOAD_LEN: usize = 6;

    /// Parses a header chunk's payload.
    ///
    /// Fails on a wrong payload length, an unrecognized format, an invalid
    /// division field, or a format 0 file claiming more than one track.
    pub fn parse(payload: &[u8]) -> Result<Self, CodecError> {
        if payload.len() != Self::PAYLOAD_LEN {
            return Err(CodecError::HeaderFormatInvalid);
        }

        let format = Format::from_field(u16::from_be_bytes([payload[0], payload[1]]))?;
        let track_count = u16::from_be_bytes([payload[2], payload[3]]);
        if format == Format::Zero && track_count != 1 {
            return Err(CodecError::HeaderFormatInvalid);
        }
        let division = Division::from_field(u16::from_be_bytes([payload[4], payload[5]]))?;

        Ok(Self {
            format,
            track_count,
            division,
        })
    }

    /// Synthesizes the 6-byte payload and wraps it in a header chunk
    pub fn to_chunk(&self) -> Chunk {
        let mut payload = Vec::with_capacity(Self::PAYLOAD_LEN);
        payload.extend(self.format.field().to_be_bytes());
        payload.extend(self.track_count.to_be_bytes());
        payload.extend(self.division.field().to_be_bytes());
        Chunk::new(ChunkTag::Header, payload)
    }
}

#[cfg(test)]
mod tests {
    use super::{Division, FileHeader, Format};
    use crate::{chunk::Chunk, cursor::ByteCursor, error::CodecError};

    #[test]
    fn header_round_trips_through_its_chunk() {
        let header = FileHeader {
            format: Format::One,
            track_count: 2,
            division: Division::TicksPerQuarterNote(96),
        };

        let mut cursor = ByteCursor::new();
        header.to_chunk().write_into(&mut cursor).unwrap();
        assert_eq!(cursor.len(), 14);

        let chunk = Chunk::read_from(&mut cursor).unwrap();
        assert_eq!(FileHeader::parse(&chunk.payload).unwrap(), header)
    }

    #[test]
    fn metrical_division_uses_the_low_15_bits() {
        assert_eq!(
            Division::from_field(0x0060).unwrap(),
            Division::TicksPerQuarterNote(96)
        )
    }

    #[test]
    fn timecode_division_validates_fps() {
        assert_eq!(
            Division::from_field(0x9828).unwrap(),
            Division::TicksPerFrame { fps: 24, tpf: 40 }
        );
        // 29 is shorthand for drop-frame and reads back as 30
        assert_eq!(
            Division::from_field(0x9D04).unwrap(),
            Division::TicksPerFrame { fps: 30, tpf: 4 }
        );
        assert_eq!(
            Division::from_field(0xFF00),
            Err(CodecError::HeaderFormatInvalid)
        )
    }

    #[test]
    fn timecode_division_round_trips() {
        let division = Division::TicksPerFrame { fps: 25, tpf: 40 };
        assert_eq!(Division::from_field(division.field()).unwrap(), division)
    }

    #[test]
    fn format_zero_requires_exactly_one_track() {
        let mut payload = vec![0, 0, 0, 2, 0, 96];
        assert_eq!(
            FileHeader::parse(&payload),
            Err(CodecError::HeaderFormatInvalid)
        );

        payload[3] = 1;
        assert!(FileHeader::parse(&payload).is_ok())
    }

    #[test]
    fn bad_format_field_fails() {
        let payload = vec![0, 3, 0, 1, 0, 96];
        assert_eq!(
            FileHeader::parse(&payload),
            Err(CodecError::HeaderFormatInvalid)
        )
    }

    #[test]
    fn wrong_payload_length_fails() {
        assert_eq!(
            FileHeader::parse(&[0, 1, 0, 2]),
            Err(CodecError::HeaderFormatInvalid)
        )
    }
}
