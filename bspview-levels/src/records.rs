/*
 * Copyright (C) the bspview authors 2026
 *
 * This program is free software: you can redistribute it and/or modify it
 * under the terms of the GNU General Public License as published by the Free
 * Software Foundation, either version 3 of the License, or (at your option)
 * any later version.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT
 * ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
 * FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License for
 * more details.
 *
 * You should have received a copy of the GNU General Public License along
 * with this program.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Splits a byte range into fixed-size records described by a list of field types.
//!
//! This knows nothing about levels. Every homogeneous lump is decoded by handing
//! its bytes and field list to [`extract`], then mapping the records into richer types.

use crate::helpers::*;
use crate::types::{ParseError, Result};

/// A primitive field in a record. All multi-byte fields are little endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    F32,
    /// 16 bytes of NUL padded text
    Name16,
}

impl FieldType {
    /// Size of this field in bytes.
    pub fn size(self) -> usize {
        match self {
            FieldType::I8 | FieldType::U8 => 1,
            FieldType::I16 | FieldType::U16 => 2,
            FieldType::I32 | FieldType::U32 | FieldType::F32 => 4,
            FieldType::Name16 => NAME_LEN,
        }
    }

    /// Decode one field from the start of `bytes`.
    /// # Panics
    /// If `bytes` is shorter than [`FieldType::size`].
    fn decode(self, bytes: &[u8]) -> Field {
        match self {
            FieldType::I8 => Field::I8(bytes[0] as i8),
            FieldType::U8 => Field::U8(bytes[0]),
            FieldType::I16 => Field::I16(slice_to_i16(&bytes[0..2])),
            FieldType::U16 => Field::U16(slice_to_u16(&bytes[0..2])),
            FieldType::I32 => Field::I32(slice_to_i32(&bytes[0..4])),
            FieldType::U32 => Field::U32(slice_to_u32(&bytes[0..4])),
            FieldType::F32 => Field::F32(slice_to_f32(&bytes[0..4])),
            FieldType::Name16 => Field::Name(slice_to_name(&bytes[0..NAME_LEN])),
        }
    }
}

/// A decoded field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    F32(f32),
    Name(String),
}

impl Field {
    /// The field as an integer. Floats are truncated, names are 0.
    pub fn int(&self) -> i64 {
        match *self {
            Field::I8(v) => v as i64,
            Field::U8(v) => v as i64,
            Field::I16(v) => v as i64,
            Field::U16(v) => v as i64,
            Field::I32(v) => v as i64,
            Field::U32(v) => v as i64,
            Field::F32(v) => v as i64,
            Field::Name(_) => 0,
        }
    }

    /// The field as a float. Names are 0.
    pub fn float(&self) -> f32 {
        match *self {
            Field::F32(v) => v,
            Field::Name(_) => 0.0,
            ref other => other.int() as f32,
        }
    }

    /// The field's text, empty for numeric fields.
    pub fn text(&self) -> &str {
        match self {
            Field::Name(s) => s,
            _ => "",
        }
    }
}

/// One decoded record.
/// Records with a single field come back as a bare [`Record::Scalar`].
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Scalar(Field),
    Tuple(Box<[Field]>),
}

impl Record {
    /// All fields, in declaration order.
    pub fn fields(&self) -> &[Field] {
        match self {
            Record::Scalar(f) => std::slice::from_ref(f),
            Record::Tuple(fs) => fs,
        }
    }
}

/// Total size of one record with the given fields.
pub fn stride(types: &[FieldType]) -> usize {
    types.iter().map(|t| t.size()).sum()
}

/// Decode `data` as a packed array of records.
/// Fails if `data` isn't a whole number of records.
pub fn extract(data: &[u8], types: &[FieldType]) -> Result<Vec<Record>> {
    let stride = stride(types);
    if stride == 0 {
        return Ok(Vec::new());
    }

    if data.len() % stride != 0 {
        return Err(ParseError::TruncatedRecord {
            len: data.len(),
            stride,
        });
    }

    let mut records = Vec::with_capacity(data.len() / stride);
    for raw in data.chunks_exact(stride) {
        let mut offset = 0;
        let mut fields = Vec::with_capacity(types.len());
        for ty in types {
            fields.push(ty.decode(&raw[offset..]));
            offset += ty.size();
        }

        records.push(if fields.len() == 1 {
            Record::Scalar(fields.remove(0))
        } else {
            Record::Tuple(fields.into_boxed_slice())
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::FieldType::*;
    use super::*;

    fn encode(field: &Field, out: &mut Vec<u8>) {
        match field {
            Field::I8(v) => out.push(*v as u8),
            Field::U8(v) => out.push(*v),
            Field::I16(v) => out.extend_from_slice(&v.to_le_bytes()),
            Field::U16(v) => out.extend_from_slice(&v.to_le_bytes()),
            Field::I32(v) => out.extend_from_slice(&v.to_le_bytes()),
            Field::U32(v) => out.extend_from_slice(&v.to_le_bytes()),
            Field::F32(v) => out.extend_from_slice(&v.to_le_bytes()),
            Field::Name(s) => {
                let mut name = [0u8; NAME_LEN];
                name[..s.len()].copy_from_slice(s.as_bytes());
                out.extend_from_slice(&name);
            }
        }
    }

    #[test]
    fn every_field_type_survives() {
        let types = [I8, U8, I16, U16, I32, U32, F32, Name16];
        let originals: Vec<Vec<Field>> = (0..5)
            .map(|n| {
                vec![
                    Field::I8(-(n as i8) - 100),
                    Field::U8(200 + n as u8),
                    Field::I16(-30_000 + n as i16),
                    Field::U16(60_000 + n as u16),
                    Field::I32(-2_000_000_000 + n),
                    Field::U32(4_000_000_000 + n as u32),
                    Field::F32(n as f32 * -1.5),
                    Field::Name(format!("{{blue{}", n)),
                ]
            })
            .collect();

        let mut buf = Vec::new();
        for record in originals.iter() {
            for field in record {
                encode(field, &mut buf);
            }
        }
        assert_eq!(buf.len(), 5 * stride(&types));

        let decoded = extract(&buf, &types).unwrap();
        assert_eq!(decoded.len(), originals.len());
        for (record, original) in decoded.iter().zip(originals.iter()) {
            assert_eq!(record.fields(), &original[..]);
        }
    }

    #[test]
    fn single_field_is_scalar() {
        let buf = [0xff, 0xff, 0xff, 0xff, 0x05, 0x00, 0x00, 0x00];
        let decoded = extract(&buf, &[I32]).unwrap();

        assert_eq!(
            decoded,
            vec![Record::Scalar(Field::I32(-1)), Record::Scalar(Field::I32(5))]
        );
    }

    #[test]
    fn ragged_data_is_rejected() {
        let buf = [0u8; 10];
        assert_eq!(
            extract(&buf, &[U16, U16]),
            Err(ParseError::TruncatedRecord { len: 10, stride: 4 })
        );
    }

    #[test]
    fn empty_data_gives_no_records() {
        assert!(extract(&[], &[F32, F32, F32]).unwrap().is_empty());
    }

    #[test]
    fn field_conversions() {
        assert_eq!(Field::U16(65535).int(), 65535);
        assert_eq!(Field::I16(-2).float(), -2.0);
        assert_eq!(Field::F32(2.5).float(), 2.5);
        assert_eq!(Field::Name("sky".into()).text(), "sky");
        assert_eq!(Field::U8(1).text(), "");
    }
}
