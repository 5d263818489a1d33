//! I/O helper functions for reading and writing wire primitives
//!
//! Byte order follows the wire format: `u32` little-endian, `f64` big-endian.
//! Text is a varuint byte count followed by UTF-8 bytes, where a varuint
//! stores 7 bits per byte, least significant group first, with the high bit
//! set on every byte except the last.

use std::io::{Cursor, Read};

use crate::error::LubbaError;

/// Longest varuint accepted (10 x 7 bits covers a u64)
const MAX_VARUINT_BYTES: usize = 10;

/// Write a single byte
pub(crate) fn write_u8(output: &mut Vec<u8>, val: u8) {
    output.push(val);
}

/// Write a u32 in little-endian format
pub(crate) fn write_u32(output: &mut Vec<u8>, val: u32) {
    output.extend_from_slice(&val.to_le_bytes());
}

/// Write an f64 in big-endian format
pub(crate) fn write_f64(output: &mut Vec<u8>, val: f64) {
    output.extend_from_slice(&val.to_be_bytes());
}

/// Write a variable-length unsigned integer
pub(crate) fn write_var_uint(output: &mut Vec<u8>, mut val: u64) {
    while val > 0x7F {
        output.push(0x80 | (val & 0x7F) as u8);
        val >>= 7;
    }
    output.push(val as u8);
}

/// Write a length-prefixed UTF-8 string
pub(crate) fn write_var_string(output: &mut Vec<u8>, val: &str) {
    write_var_uint(output, val.len() as u64);
    output.extend_from_slice(val.as_bytes());
}

/// Write the one-byte element count of a sequence
pub(crate) fn write_count(
    output: &mut Vec<u8>,
    field: &'static str,
    count: usize,
) -> Result<(), LubbaError> {
    let count = u8::try_from(count).map_err(|_| LubbaError::TooManyEntries { field, count })?;
    output.push(count);
    Ok(())
}

/// Fill `buf` from the cursor, reporting the offset where input ran out
fn read_exact(cursor: &mut Cursor<&[u8]>, buf: &mut [u8]) -> Result<(), LubbaError> {
    let offset = cursor.position();
    cursor
        .read_exact(buf)
        .map_err(|_| LubbaError::UnexpectedEof { offset })
}

/// Read a single byte
pub(crate) fn read_u8(cursor: &mut Cursor<&[u8]>) -> Result<u8, LubbaError> {
    let mut buf = [0u8; 1];
    read_exact(cursor, &mut buf)?;
    Ok(buf[0])
}

/// Read a u32 in little-endian format
pub(crate) fn read_u32(cursor: &mut Cursor<&[u8]>) -> Result<u32, LubbaError> {
    let mut buf = [0u8; 4];
    read_exact(cursor, &mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Read an f64 in big-endian format
pub(crate) fn read_f64(cursor: &mut Cursor<&[u8]>) -> Result<f64, LubbaError> {
    let mut buf = [0u8; 8];
    read_exact(cursor, &mut buf)?;
    Ok(f64::from_be_bytes(buf))
}

/// Read a variable-length unsigned integer
pub(crate) fn read_var_uint(cursor: &mut Cursor<&[u8]>) -> Result<u64, LubbaError> {
    let start = cursor.position();
    let mut val = 0u64;

    for i in 0..MAX_VARUINT_BYTES {
        let byte = read_u8(cursor)?;
        let group = u64::from(byte & 0x7F);
        let shift = 7 * i as u32;

        // The tenth byte may only carry the single top bit of a u64
        if i == MAX_VARUINT_BYTES - 1 && group > 1 {
            return Err(LubbaError::VarIntOverflow { offset: start });
        }
        val |= group << shift;

        if byte & 0x80 == 0 {
            return Ok(val);
        }
    }

    Err(LubbaError::VarIntOverflow { offset: start })
}

/// Read a length-prefixed UTF-8 string
pub(crate) fn read_var_string(cursor: &mut Cursor<&[u8]>) -> Result<String, LubbaError> {
    let len = read_var_uint(cursor)?;
    let offset = cursor.position();

    // Reject lengths past the end before allocating for them
    let remaining = (cursor.get_ref().len() as u64).saturating_sub(offset);
    if len > remaining {
        return Err(LubbaError::UnexpectedEof { offset });
    }

    let mut bytes = vec![0u8; len as usize];
    read_exact(cursor, &mut bytes)?;
    Ok(String::from_utf8(bytes)?)
}
