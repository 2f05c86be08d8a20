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

use super::file::BspFile;
use crate::helpers::index_range;
use crate::records::{extract, FieldType::*};
use crate::traits::faces::*;
use crate::types::Result;

/// Parse the faces lump.
/// # Format
/// ushort plane            Plane the face lies on.
/// ushort side             Non-zero if the face is behind its plane.
/// uint first_surfedge
/// ushort surfedge_count
/// ushort texinfo
/// ubyte[4] styles         Lighting styles.
/// int light_offset        Byte offset into the lighting lump, -1 if unlit.
pub fn from_data(data: &[u8]) -> Result<Box<[Face]>> {
    Ok(
        extract(data, &[U16, U16, U32, U16, U16, U8, U8, U8, U8, I32])?
            .iter()
            .map(|r| {
                let f = r.fields();
                let light = f[9].int();
                Face {
                    plane_idx: f[0].int() as u32,
                    back_side: f[1].int() != 0,
                    surfedges: index_range(f[2].int(), f[3].int()),
                    texinfo_idx: f[4].int() as u32,
                    styles: [
                        f[5].int() as u8,
                        f[6].int() as u8,
                        f[7].int() as u8,
                        f[8].int() as u8,
                    ],
                    lightmap_offset: if light < 0 { None } else { Some(light as u32) },
                }
            })
            .collect(),
    )
}

impl HasFaces for BspFile {
    fn faces(&self) -> &[Face] {
        &self.faces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face_bytes(first: u32, count: u16, light: i32) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&3u16.to_le_bytes());
        buf.extend_from_slice(&1u16.to_le_bytes());
        buf.extend_from_slice(&first.to_le_bytes());
        buf.extend_from_slice(&count.to_le_bytes());
        buf.extend_from_slice(&7u16.to_le_bytes());
        buf.extend_from_slice(&[0, 255, 255, 255]);
        buf.extend_from_slice(&light.to_le_bytes());
        buf
    }

    #[test]
    fn faces_decode() {
        let mut buf = face_bytes(10, 4, 96);
        buf.extend(face_bytes(14, 3, -1));
        let faces = from_data(&buf).unwrap();

        assert_eq!(faces.len(), 2);
        assert_eq!(
            faces[0],
            Face {
                plane_idx: 3,
                back_side: true,
                surfedges: 10..14,
                texinfo_idx: 7,
                styles: [0, 255, 255, 255],
                lightmap_offset: Some(96),
            }
        );
        assert_eq!(faces[0].edge_count(), 4);
        assert_eq!(faces[1].lightmap_offset, None);
    }
}
