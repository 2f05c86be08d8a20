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
use crate::helpers::{fields_to_vec3, index_range};
use crate::records::{extract, FieldType::*};
use crate::traits::models::*;
use crate::types::Result;

/// Parse the models lump.
/// # Format
/// float[3] mins
/// float[3] maxs
/// float[3] origin
/// int[4] head_nodes       Draw tree, then the clipping hulls.
/// int vis_leaves
/// int first_face
/// int face_count
pub fn from_data(data: &[u8]) -> Result<Box<[Model]>> {
    Ok(extract(
        data,
        &[
            F32, F32, F32, F32, F32, F32, F32, F32, F32, I32, I32, I32, I32, I32, I32, I32,
        ],
    )?
    .iter()
    .map(|r| {
        let f = r.fields();
        Model {
            mins: fields_to_vec3(&f[0..3]),
            maxs: fields_to_vec3(&f[3..6]),
            origin: fields_to_vec3(&f[6..9]),
            head_nodes: [
                f[9].int() as i32,
                f[10].int() as i32,
                f[11].int() as i32,
                f[12].int() as i32,
            ],
            vis_leaves: f[13].int().max(0) as u32,
            faces: index_range(f[14].int(), f[15].int()),
        }
    })
    .collect())
}

impl HasModels for BspFile {
    fn models(&self) -> &[Model] {
        &self.models
    }
}

#[test]
fn models_world() {
    let mut buf = Vec::new();
    for v in &[-64.0f32, -64.0, -16.0, 64.0, 64.0, 48.0, 0.0, 0.0, 0.0] {
        buf.extend_from_slice(&v.to_le_bytes());
    }
    for v in &[0i32, 0, 1, -1, 12, 0, 30] {
        buf.extend_from_slice(&v.to_le_bytes());
    }

    let models = from_data(&buf).unwrap();

    assert_eq!(models.len(), 1);
    assert_eq!(models[0].maxs, na::Vector3::new(64.0, 64.0, 48.0));
    assert_eq!(models[0].head_nodes, [0, 0, 1, -1]);
    assert_eq!(models[0].vis_leaves, 12);
    assert_eq!(models[0].faces, 0..30);
}
