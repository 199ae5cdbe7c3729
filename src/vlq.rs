//! Variable-length quantity codec
//!
//! Delta times and meta/sysex lengths are stored as variable-length
//! quantities: 7 bits per byte, most significant group first, with the high
//! bit set on every byte except the last. Values up to `0x0FFF_FFFF` fit in
//! four encoded bytes.

use crate::{cursor::ByteCursor, error::CodecError};

/// Longest encoding this codec produces (five groups of 7 bits cover a u32)
const MAX_ENCODED_LEN: usize = 5;

/// Appends the variable-length encoding of `value` to the cursor.
pub fn encode_into(cursor: &mut ByteCursor, mut value: u32) {
    // Groups are produced least significant first, then written in reverse
    let mut scratch = [0u8; MAX_ENCODED_LEN];
    scratch[0] = (value & 0x7F) as u8;
    let mut len = 1;
    value >>= 7;

    while value != 0 {
        scratch[len] = (value & 0x7F) as u8 | 0x80;
        len += 1;
        value >>= 7;
    }

    for group in scratch[..len].iter().rev() {
        cursor.write_byte(*group);
    }
}

/// Returns the variable-length encoding of `value` as a standalone byte
/// sequence.
pub fn encode(value: u32) -> Vec<u8> {
    let mut cursor = ByteCursor::with_capacity(MAX_ENCODED_LEN);
    encode_into(&mut cursor, value);
    cursor.into_bytes()
}

/// Reads one variable-length quantity from the cursor.
///
/// Returns the decoded value and the number of bytes consumed. Fails with
/// [`CodecError::MalformedVlq`] if the stream ends before a byte with a clear
/// high bit terminates the quantity.
pub fn decode(cursor: &mut ByteCursor) -> Result<(u32, usize), CodecError> {
    let mut result: u32 = 0;
    let mut consumed = 0;

    loop {
        let byte = cursor
            .read_byte()
            .map_err(|_| CodecError::MalformedVlq)?;
        consumed += 1;
        result = (result << 7) | u32::from(byte & 0x7F);

        if byte & 0x80 == 0 {
            return Ok((result, consumed));
        }
    }
}
