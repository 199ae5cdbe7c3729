//! Chunk framing
//!
//! A file is a sequence of chunks: a 4-byte ASCII tag, a 4-byte big-endian
//! payload length, then the payload. Only the `MThd` header and `MTrk` track
//! tags are recognized. Chunks are ephemeral — built just before
//! serialization or just after deserialization, never held onto.

use crate::{cursor::ByteCursor, error::CodecError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod header;

/// The two recognized chunk tags
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChunkTag {
    /// A file header chunk, tag `MThd`
    Header,
    /// A track chunk, tag `MTrk`
    Track,
}

impl ChunkTag {
    /// Magic bytes for the header chunk
    pub const HEADER_MAGIC: [u8; 4] = *b"MThd";
    /// Magic bytes for the track chunk
    pub const TRACK_MAGIC: [u8; 4] = *b"MTrk";

    /// The 4 ASCII bytes this tag writes
    pub fn magic(self) -> [u8; 4] {
        match self {
            Self::Header => Self::HEADER_MAGIC,
            Self::Track => Self::TRACK_MAGIC,
        }
    }

    /// Classifies 4 tag bytes, failing on anything unrecognized
    pub fn from_magic(magic: [u8; 4]) -> Result<Self, CodecError> {
        match magic {
            Self::HEADER_MAGIC => Ok(Self::Header),
            Self::TRACK_MAGIC => Ok(Self::Track),
            other => Err(CodecError::ChunkTagInvalid(other)),
        }
    }
}

/// A tagged, length-prefixed container for header or track payload bytes
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Chunk {
    /// Whether this is a header or track chunk
    pub tag: ChunkTag,
    /// The chunk's owned payload
    pub payload: Vec<u8>,
}

impl Chunk {
    /// Wraps a payload under a tag
    pub fn new(tag: ChunkTag, payload: Vec<u8>) -> Self {
        Self { tag, payload }
    }

    /// Checks the invariant a chunk must satisfy before serialization:
    /// a nonzero payload length
    pub fn validate(&self) -> Result<(), CodecError> {
        if self.payload.is_empty() {
            return Err(CodecError::ChunkEmpty);
        }
        Ok(())
    }

    /// Total bytes the chunk occupies on the wire: tag, length field,
    /// payload
    pub fn size(&self) -> usize {
        self.payload.len() + 8
    }

    /// Writes tag, big-endian length and payload into the destination
    /// stream
    pub fn write_into(&self, cursor: &mut ByteCursor) -> Result<(), CodecError> {
        self.validate()?;
        cursor.write(&self.tag.magic());
        cursor.write(&(self.payload.len() as u32).to_be_bytes());
        cursor.write(&self.payload);
        Ok(())
    }

    /// Reads one chunk from the stream, validating its tag and length
    pub fn read_from(cursor: &mut ByteCursor) -> Result<Self, CodecError> {
        let mut magic = [0u8; 4];
        magic.copy_from_slice(cursor.read(4)?);
        let tag = ChunkTag::from_magic(magic)?;

        let mut length_field = [0u8; 4];
        length_field.copy_from_slice(cursor.read(4)?);
        let length = u32::from_be_bytes(length_field) as usize;
        if length == 0 {
            return Err(CodecError::ChunkEmpty);
        }

        let available = cursor.remaining().len();
        if length > available {
            return Err(CodecError::TruncatedChunk {
                expected: length,
                available,
            });
        }

        Ok(Self {
            tag,
            payload: cursor.read(length)?.to_vec(),
        })
    }

    /// Reads one chunk and requires it to carry a particular tag
    pub fn read_expecting(cursor: &mut ByteCursor, expected: ChunkTag) -> Result<Self, CodecError> {
        let chunk = Self::read_from(cursor)?;
        if chunk.tag != expected {
            return Err(CodecError::UnexpectedChunk {
                expected,
                found: chunk.tag,
            });
        }
        Ok(chunk)
    }
}

#[cfg(test)]
mod tests {
    use super::{Chunk, ChunkTag};
    use crate::{cursor::ByteCursor, error::CodecError};

    #[test]
    fn chunk_round_trips_through_the_wire_layout() {
        let chunk = Chunk::new(ChunkTag::Track, vec![0x00, 0xFF, 0x2F, 0x00]);
        let mut cursor = ByteCursor::new();
        chunk.write_into(&mut cursor).unwrap();

        assert_eq!(
            cursor.as_bytes(),
            &[b'M', b'T', b'r', b'k', 0, 0, 0, 4, 0x00, 0xFF, 0x2F, 0x00]
        );
        assert_eq!(Chunk::read_from(&mut cursor).unwrap(), chunk)
    }

    #[test]
    fn unrecognized_tag_fails() {
        let mut cursor = ByteCursor::from(b"MUnk\x00\x00\x00\x01\x00".as_slice());
        assert_eq!(
            Chunk::read_from(&mut cursor),
            Err(CodecError::ChunkTagInvalid(*b"MUnk"))
        )
    }

    #[test]
    fn zero_length_chunk_fails() {
        let mut cursor = ByteCursor::from(b"MTrk\x00\x00\x00\x00".as_slice());
        assert_eq!(Chunk::read_from(&mut cursor), Err(CodecError::ChunkEmpty));

        let empty = Chunk::new(ChunkTag::Track, vec![]);
        let mut out = ByteCursor::new();
        assert_eq!(empty.write_into(&mut out), Err(CodecError::ChunkEmpty))
    }

    #[test]
    fn declared_length_beyond_the_stream_fails() {
        let mut cursor = ByteCursor::from(b"MTrk\x00\x00\x00\x10\x00\x00".as_slice());
        assert_eq!(
            Chunk::read_from(&mut cursor),
            Err(CodecError::TruncatedChunk {
                expected: 16,
                available: 2,
            })
        )
    }

    #[test]
    fn read_expecting_rejects_the_other_tag() {
        let chunk = Chunk::new(ChunkTag::Track, vec![0x00]);
        let mut cursor = ByteCursor::new();
        chunk.write_into(&mut cursor).unwrap();

        assert_eq!(
            Chunk::read_expecting(&mut cursor, ChunkTag::Header),
            Err(CodecError::UnexpectedChunk {
                expected: ChunkTag::Header,
                found: ChunkTag::Track,
            })
        )
    }
}
