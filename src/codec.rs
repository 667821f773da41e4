//! Typed value marshalling for PLC registers.
//!
//! PLC memory is word oriented: every register is a 16-bit big-endian
//! value. Two-word types (i32, u32, f32) travel as the big-endian encoding
//! of the whole value across consecutive registers. Decoders validate the
//! payload length exactly so a miscounted read surfaces as
//! [`FinsError::TooMuchData`] or [`FinsError::NotEnoughData`] instead of a
//! silently truncated value.

use crate::error::{FinsError, Result};

/// Bytes per PLC word.
pub const WORD_SIZE: usize = 2;

fn expect_len(data: &[u8], expected: usize) -> Result<()> {
    if data.len() > expected {
        return Err(FinsError::TooMuchData {
            expected,
            actual: data.len(),
        });
    }
    if data.len() < expected {
        return Err(FinsError::NotEnoughData {
            expected,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Splits `data` into chunks of `chunk_size` bytes.
///
/// A trailing chunk shorter than `chunk_size` is dropped unless
/// `include_partial` is set.
pub fn partition(data: &[u8], chunk_size: usize, include_partial: bool) -> Vec<Vec<u8>> {
    let mut chunks: Vec<Vec<u8>> = data.chunks(chunk_size).map(|c| c.to_vec()).collect();
    if !include_partial {
        if let Some(last) = chunks.last() {
            if last.len() < chunk_size {
                chunks.pop();
            }
        }
    }
    chunks
}

/// Decodes a register as a boolean from its low byte.
pub fn decode_bool(data: &[u8]) -> Result<bool> {
    expect_len(data, 2)?;
    Ok(data[1] != 0)
}

/// Decodes one register as a signed 16-bit value.
pub fn decode_i16(data: &[u8]) -> Result<i16> {
    expect_len(data, 2)?;
    Ok(i16::from_be_bytes([data[0], data[1]]))
}

/// Decodes one register as an unsigned 16-bit value.
pub fn decode_u16(data: &[u8]) -> Result<u16> {
    expect_len(data, 2)?;
    Ok(u16::from_be_bytes([data[0], data[1]]))
}

/// Decodes two registers as a signed 32-bit value.
pub fn decode_i32(data: &[u8]) -> Result<i32> {
    expect_len(data, 4)?;
    Ok(i32::from_be_bytes([data[0], data[1], data[2], data[3]]))
}

/// Decodes two registers as an unsigned 32-bit value.
pub fn decode_u32(data: &[u8]) -> Result<u32> {
    expect_len(data, 4)?;
    Ok(u32::from_be_bytes([data[0], data[1], data[2], data[3]]))
}

/// Decodes two registers as an IEEE 754 single-precision float.
pub fn decode_f32(data: &[u8]) -> Result<f32> {
    expect_len(data, 4)?;
    Ok(f32::from_be_bytes([data[0], data[1], data[2], data[3]]))
}

/// Decodes a run of registers as ASCII text.
pub fn decode_string(data: &[u8]) -> Result<String> {
    if !data.is_ascii() {
        return Err(FinsError::frame(format!(
            "payload is not ASCII text: {:02X?}",
            data
        )));
    }
    let text: String = data.iter().map(|&b| b as char).collect();
    Ok(text.trim_end_matches('\0').to_owned())
}

/// Decodes a run of registers as ASCII text split into lines.
///
/// Lines are separated by `"\r\n"` or `"\n"`.
pub fn decode_string_array(data: &[u8]) -> Result<Vec<String>> {
    let text = decode_string(data)?;
    Ok(text
        .split("\r\n")
        .flat_map(|part| part.split('\n'))
        .map(str::to_owned)
        .collect())
}

/// Decodes each 2-byte chunk of the payload as a boolean.
pub fn decode_bool_array(data: &[u8], include_partial: bool) -> Result<Vec<bool>> {
    partition(data, 2, include_partial)
        .iter()
        .map(|chunk| decode_bool(chunk))
        .collect()
}

/// Decodes each 2-byte chunk of the payload as an i16.
pub fn decode_i16_array(data: &[u8], include_partial: bool) -> Result<Vec<i16>> {
    partition(data, 2, include_partial)
        .iter()
        .map(|chunk| decode_i16(chunk))
        .collect()
}

/// Decodes each 2-byte chunk of the payload as a u16.
pub fn decode_u16_array(data: &[u8], include_partial: bool) -> Result<Vec<u16>> {
    partition(data, 2, include_partial)
        .iter()
        .map(|chunk| decode_u16(chunk))
        .collect()
}

/// Decodes each 4-byte chunk of the payload as an i32.
pub fn decode_i32_array(data: &[u8], include_partial: bool) -> Result<Vec<i32>> {
    partition(data, 4, include_partial)
        .iter()
        .map(|chunk| decode_i32(chunk))
        .collect()
}

/// Decodes each 4-byte chunk of the payload as a u32.
pub fn decode_u32_array(data: &[u8], include_partial: bool) -> Result<Vec<u32>> {
    partition(data, 4, include_partial)
        .iter()
        .map(|chunk| decode_u32(chunk))
        .collect()
}

/// Decodes each 4-byte chunk of the payload as an f32.
pub fn decode_f32_array(data: &[u8], include_partial: bool) -> Result<Vec<f32>> {
    partition(data, 4, include_partial)
        .iter()
        .map(|chunk| decode_f32(chunk))
        .collect()
}

/// Encodes a boolean as one register (`0x0001` or `0x0000`).
pub fn encode_bool(value: bool) -> Vec<u8> {
    vec![0x00, u8::from(value)]
}

/// Encodes a signed 16-bit value as one register.
pub fn encode_i16(value: i16) -> Vec<u8> {
    value.to_be_bytes().to_vec()
}

/// Encodes an unsigned 16-bit value as one register.
pub fn encode_u16(value: u16) -> Vec<u8> {
    value.to_be_bytes().to_vec()
}

/// Encodes a signed 32-bit value as two registers.
pub fn encode_i32(value: i32) -> Vec<u8> {
    value.to_be_bytes().to_vec()
}

/// Encodes an unsigned 32-bit value as two registers.
pub fn encode_u32(value: u32) -> Vec<u8> {
    value.to_be_bytes().to_vec()
}

/// Encodes an IEEE 754 single-precision float as two registers.
pub fn encode_f32(value: f32) -> Vec<u8> {
    value.to_be_bytes().to_vec()
}

/// Encodes ASCII text for register storage, zero-padding to a whole word.
///
/// # Errors
///
/// Returns [`FinsError::InvalidParameter`] if the text contains non-ASCII
/// characters.
pub fn encode_string(value: &str) -> Result<Vec<u8>> {
    if !value.is_ascii() {
        return Err(FinsError::invalid_parameter(
            "value",
            "only ASCII text can be written to the PLC",
        ));
    }
    let mut bytes = value.as_bytes().to_vec();
    if bytes.len() % WORD_SIZE != 0 {
        bytes.push(0x00);
    }
    Ok(bytes)
}

/// Encodes a slice of values by concatenating their register encodings.
pub fn encode_all<T, F>(values: &[T], encode: F) -> Vec<u8>
where
    T: Copy,
    F: Fn(T) -> Vec<u8>,
{
    values.iter().flat_map(|&value| encode(value)).collect()
}
