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

//! Turning faces into triangles

use na::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

use super::faces::FaceRef;
use super::textures::TextureRef;
use super::{HasEdges, HasFaces, HasLighting, HasTexInfo, HasTextures};
use crate::types::{ParseError, Result, Rgb};

/// A face as a triangle fan, ready to hand to a mesh builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceGeometry {
    /// The face's outline, in drawing order.
    pub vertices: Vec<Vector3<f32>>,

    /// Texture coordinates for each vertex, normalised by the texture size.
    pub uvs: Vec<Vector2<f32>>,

    /// Indices into `vertices`.
    pub triangles: Vec<[u32; 3]>,

    pub texture_idx: TextureRef,

    /// The face's first light sample, if it's lit.
    pub light: Option<Rgb>,
}

pub trait HasFaceGeometry: HasFaces + HasEdges + HasTexInfo + HasTextures + HasLighting {
    /// Build the geometry for a face.
    /// Returns `None` for faces with a texture that should never be drawn.
    fn face_geometry(&self, face: FaceRef) -> Result<Option<FaceGeometry>> {
        let face = self
            .get_face(face)
            .ok_or_else(|| ParseError::out_of_range("face", face as i64, self.faces().len()))?;
        let info = self.get_texinfo(face.texinfo_idx).ok_or_else(|| {
            ParseError::out_of_range(
                "texinfo",
                face.texinfo_idx as i64,
                self.texinfo().len(),
            )
        })?;
        let texture = self.get_texture(info.texture_idx).ok_or_else(|| {
            ParseError::out_of_range(
                "texture",
                info.texture_idx as i64,
                self.textures().len(),
            )
        })?;

        if texture.is_skipped() {
            return Ok(None);
        }

        let width = texture.width.max(1) as f32;
        let height = texture.height.max(1) as f32;

        let count = face.edge_count() as usize;
        let mut vertices = Vec::with_capacity(count);
        let mut uvs = Vec::with_capacity(count);

        for idx in face.surfedges.clone() {
            let surfedge = self.get_surfedge(idx).ok_or_else(|| {
                ParseError::out_of_range("surfedge", idx as i64, self.surfedges().len())
            })?;
            let edge = self.get_edge(surfedge.edge_index()).ok_or_else(|| {
                ParseError::out_of_range(
                    "edge",
                    surfedge.edge_index() as i64,
                    self.edges().len(),
                )
            })?;
            let vertex_idx = surfedge.first_vertex(edge) as u32;
            let vertex = self.get_vertex(vertex_idx).ok_or_else(|| {
                ParseError::out_of_range("vertex", vertex_idx as i64, self.vertices().len())
            })?;

            let (s, t) = info.project(vertex);
            vertices.push(*vertex);
            uvs.push(Vector2::new(s / width, t / height));
        }

        // Stored clockwise, flip so the fan faces outwards.
        vertices.reverse();
        uvs.reverse();

        let triangles = (1..vertices.len().saturating_sub(1) as u32)
            .map(|i| [0, i, i + 1])
            .collect();

        let light = face
            .lightmap_offset
            .and_then(|offset| self.lighting().sample(offset));

        Ok(Some(FaceGeometry {
            vertices,
            uvs,
            triangles,
            texture_idx: info.texture_idx,
            light,
        }))
    }
}
