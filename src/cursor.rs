//! Growable byte cursor with independent write and read offsets
//!
//! [`ByteCursor`] backs both codec directions: encoders append to the end of
//! the buffer, decoders advance a read offset through it. The codec never
//! seeks backward or randomly, so the cursor exposes only sequential
//! operations plus a [`ByteCursor::remaining`] view for the decoder's
//! classify-before-consume step.

use crate::error::CodecError;

/// A resizable byte region supporting sequential appends and sequential
/// reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ByteCursor {
    /// Backing storage; the write offset is its length
    buffer: Vec<u8>,
    /// Current read offset into the buffer
    read_offset: usize,
}

impl ByteCursor {
    /// Creates an empty cursor
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cursor with room for `capacity` bytes before the
    /// first reallocation
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            read_offset: 0,
        }
    }

    /// Appends a byte slice at the write offset
    pub fn write(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Appends a single byte at the write offset
    pub fn write_byte(&mut self, byte: u8) {
        self.buffer.push(byte);
    }

    /// Reads exactly `len` bytes, advancing the read offset
    pub fn read(&mut self, len: usize) -> Result<&[u8], CodecError> {
        if self.read_offset + len > self.buffer.len() {
            return Err(CodecError::TruncatedStream);
        }
        let slice = &self.buffer[self.read_offset..self.read_offset + len];
        self.read_offset += len;
        Ok(slice)
    }

    /// Reads a single byte, advancing the read offset
    pub fn read_byte(&mut self) -> Result<u8, CodecError> {
        let byte = *self
            .buffer
            .get(self.read_offset)
            .ok_or(CodecError::TruncatedStream)?;
        self.read_offset += 1;
        Ok(byte)
    }

    /// Returns the unread portion of the buffer without advancing the read
    /// offset
    pub fn remaining(&self) -> &[u8] {
        &self.buffer[self.read_offset..]
    }

    /// Returns true once the read offset has consumed every written byte
    pub fn at_end(&self) -> bool {
        self.read_offset >= self.buffer.len()
    }

    /// Total bytes written so far
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if nothing has been written
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// The full written buffer, independent of the read offset
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Consumes the cursor and returns the written buffer
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

impl From<Vec<u8>> for ByteCursor {
    fn from(buffer: Vec<u8>) -> Self {
        Self {
            buffer,
            read_offset: 0,
        }
    }
}

impl From<&[u8]> for ByteCursor {
    fn from(bytes: &[u8]) -> Self {
        Self::from(bytes.to_vec())
    }
}
