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
use crate::traits::planes::*;
use crate::types::Result;

/// Parse the planes lump.
/// # Format
/// float[3] normal     Plane normal.
/// float dist          Distance from origin to plane along normal.
/// int type            Axis the plane is closest to.
pub fn from_data(data: &[u8]) -> Result<Box<[Plane]>> {
    Ok(extract(data, &[F32, F32, F32, F32, U32])?
        .iter()
        .map(|r| {
            let f = r.fields();
            Plane {
                normal: fields_to_vec3(&f[0..3]),
                dist: f[3].float(),
                kind: PlaneType::from_raw(f[4].int() as u32),
            }
        })
        .collect())
}

impl HasPlanes for BspFile {
    fn planes(&self) -> &[Plane] {
        &self.planes
    }
}

#[test]
fn planes_single_plane() {
    let mut buf = Vec::new();
    for v in &[0.0f32, 0.0, 1.0, 128.0] {
        buf.extend_from_slice(&v.to_le_bytes());
    }
    buf.extend_from_slice(&2u32.to_le_bytes());

    let planes = from_data(&buf).unwrap();

    assert_eq!(planes.len(), 1);
    assert_eq!(planes[0].normal, na::Vector3::new(0.0, 0.0, 1.0));
    assert_eq!(planes[0].dist, 128.0);
    assert_eq!(planes[0].kind, PlaneType::Z);
}
