//! Helper functions for parsing

use na::Vector3;
use std::convert::TryInto;

use crate::records::Field;
use crate::types::{ParseError, Result};

/// Length of the fixed, NUL padded names used by textures and archive entries.
pub const NAME_LEN: usize = 16;

/// Turn a slice into a le i32.
/// # Panics
/// If slice is not 4 bytes long
pub fn slice_to_i32(slice: &[u8]) -> i32 {
    i32::from_le_bytes(slice.try_into().unwrap())
}

/// Turn a slice into a le u32.
/// # Panics
/// If slice is not 4 bytes long.
pub fn slice_to_u32(slice: &[u8]) -> u32 {
    u32::from_le_bytes(slice.try_into().unwrap())
}

/// Turn a slice into a be u32, for magic numbers.
/// # Panics
/// If slice is not 4 bytes long.
pub fn slice_to_u32_be(slice: &[u8]) -> u32 {
    u32::from_be_bytes(slice.try_into().unwrap())
}

/// Turn a slice into a le u16.
/// # Panics
/// If slice is not 2 bytes long.
pub fn slice_to_u16(slice: &[u8]) -> u16 {
    u16::from_le_bytes(slice.try_into().unwrap())
}

/// Turn a slice into a le i16.
/// # Panics
/// If slice is not 2 bytes long.
pub fn slice_to_i16(slice: &[u8]) -> i16 {
    i16::from_le_bytes(slice.try_into().unwrap())
}

/// Turn a slice into a le f32, the float datatype in a bsp file.
/// # Panics
/// If slice is not 4 bytes long
pub fn slice_to_f32(slice: &[u8]) -> f32 {
    f32::from_bits(slice_to_u32(slice))
}

/// Read a NUL terminated name. Anything after the first NUL is ignored, and
/// non-ASCII bytes are replaced rather than rejected.
pub fn slice_to_name(slice: &[u8]) -> String {
    let end = slice.iter().position(|&b| b == 0).unwrap_or(slice.len());
    String::from_utf8_lossy(&slice[..end]).into_owned()
}

/// Bounds checked sub-slice of `buf`.
pub fn sub_slice<'a>(buf: &'a [u8], offset: usize, size: usize, what: &str) -> Result<&'a [u8]> {
    match offset.checked_add(size) {
        Some(end) if end <= buf.len() => Ok(&buf[offset..end]),
        _ => Err(ParseError::OutOfBounds {
            what: what.to_owned(),
            offset,
            size,
            available: buf.len(),
        }),
    }
}

/// Bounds checked le u32 at `offset`.
pub fn u32_at(buf: &[u8], offset: usize, what: &str) -> Result<u32> {
    sub_slice(buf, offset, 4, what).map(slice_to_u32)
}

/// Group 3 decoded fields into a float vector.
/// # Panics
/// If `fields` is shorter than 3.
pub fn fields_to_vec3(fields: &[Field]) -> Vector3<f32> {
    Vector3::new(fields[0].float(), fields[1].float(), fields[2].float())
}

/// Group 3 decoded fields into a bounding box corner.
/// # Panics
/// If `fields` is shorter than 3.
pub fn fields_to_vec3i(fields: &[Field]) -> Vector3<i16> {
    Vector3::new(
        fields[0].int() as i16,
        fields[1].int() as i16,
        fields[2].int() as i16,
    )
}

/// `start..start + count`, clamped rather than wrapping.
pub fn index_range(start: i64, count: i64) -> std::ops::Range<u32> {
    let start = start.max(0).min(u32::MAX as i64) as u32;
    let count = count.max(0).min(u32::MAX as i64) as u32;
    start..start.saturating_add(count)
}
