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
use crate::helpers::fields_to_vec3;
use crate::records::{extract, FieldType::*};
use crate::traits::texinfo::*;
use crate::types::Result;

/// Parse the texinfo lump.
/// # Format
/// float[3] s
/// float s_shift
/// float[3] t
/// float t_shift
/// uint texture        Index into the textures lump.
/// uint flags
pub fn from_data(data: &[u8]) -> Result<Box<[TexInfo]>> {
    Ok(
        extract(data, &[F32, F32, F32, F32, F32, F32, F32, F32, U32, U32])?
            .iter()
            .map(|r| {
                let f = r.fields();
                let raw_flags = f[9].int() as u32;
                TexInfo {
                    s: fields_to_vec3(&f[0..3]),
                    s_shift: f[3].float(),
                    t: fields_to_vec3(&f[4..7]),
                    t_shift: f[7].float(),
                    texture_idx: f[8].int() as u32,
                    flags: TexInfoFlags::from_bits_truncate(raw_flags),
                    raw_flags,
                }
            })
            .collect(),
    )
}

impl HasTexInfo for BspFile {
    fn texinfo(&self) -> &[TexInfo] {
        &self.texinfo
    }
}

#[test]
fn texinfo_single() {
    let mut buf = Vec::new();
    for v in &[1.0f32, 0.0, 0.0, 16.0, 0.0, 0.0, -1.0, 0.5] {
        buf.extend_from_slice(&v.to_le_bytes());
    }
    buf.extend_from_slice(&4u32.to_le_bytes());
    buf.extend_from_slice(&0x8001u32.to_le_bytes());

    let infos = from_data(&buf).unwrap();

    assert_eq!(infos.len(), 1);
    assert_eq!(infos[0].s, na::Vector3::new(1.0, 0.0, 0.0));
    assert_eq!(infos[0].t_shift, 0.5);
    assert_eq!(infos[0].texture_idx, 4);
    assert_eq!(infos[0].flags, TexInfoFlags::SPECIAL);
    assert_eq!(infos[0].raw_flags, 0x8001);
}
