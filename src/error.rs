//! Fatal codec error definitions
//!
//! Structural problems in the byte stream (a bad chunk tag, a truncated
//! payload, a variable-length quantity cut off mid-integer) abort the current
//! encode or decode operation and surface as a [`CodecError`]. Recoverable
//! conditions are reported through [`crate::diag`] instead and never appear
//! here.

use thiserror::Error;

use crate::chunk::ChunkTag;

/// Errors that abort an encode or decode operation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    /// The byte stream ended before a requested read could complete
    #[error("Byte stream exhausted before the requested read")]
    TruncatedStream,
    /// The byte stream ended in the middle of a variable-length quantity
    #[error("Byte stream exhausted in the middle of a variable-length quantity")]
    MalformedVlq,
    /// A byte matched none of the event kinds and no running status applied
    #[error("Unknown event kind for byte {0:#04x}")]
    UnknownEventKind(u8),
    /// A chunk's 4-byte tag was neither `MThd` nor `MTrk`
    #[error("Unrecognized chunk tag {:?}", String::from_utf8_lossy(.0))]
    ChunkTagInvalid([u8; 4]),
    /// A chunk declared a zero-byte payload
    #[error("Chunk contains no data")]
    ChunkEmpty,
    /// A chunk declared more payload bytes than the stream holds
    #[error("Chunk declares {expected} payload bytes but only {available} remain")]
    TruncatedChunk {
        /// Payload byte count from the chunk's length field
        expected: usize,
        /// Bytes actually left in the stream
        available: usize,
    },
    /// The header chunk payload was malformed (bad format value, bad
    /// division field, or a format 0 file with more than one track)
    #[error("Malformed file header")]
    HeaderFormatInvalid,
    /// A chunk of one tag was required but a chunk of another was found
    #[error("Expected a {expected:?} chunk but found a {found:?} chunk")]
    UnexpectedChunk {
        /// The tag the caller required
        expected: ChunkTag,
        /// The tag actually read
        found: ChunkTag,
    },
}
