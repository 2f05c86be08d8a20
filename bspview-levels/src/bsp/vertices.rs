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
use crate::records::{extract, FieldType::*, Record};
use crate::traits::vertices::*;
use crate::types::Result;

/// Parse the vertices lump.
/// # Format
/// float[3] position
pub fn verts_from_data(data: &[u8]) -> Result<Box<[Vertex]>> {
    Ok(extract(data, &[F32, F32, F32])?
        .iter()
        .map(|r| fields_to_vec3(r.fields()))
        .collect())
}

/// Parse the edges lump.
/// # Format
/// ushort[2] vertices
pub fn edges_from_data(data: &[u8]) -> Result<Box<[Edge]>> {
    Ok(extract(data, &[U16, U16])?
        .iter()
        .map(|r| {
            let f = r.fields();
            Edge {
                vertices: [f[0].int() as u16, f[1].int() as u16],
            }
        })
        .collect())
}

/// Parse the surfedges lump, a flat list of signed edge references.
pub fn surfedges_from_data(data: &[u8]) -> Result<Box<[SurfEdge]>> {
    Ok(extract(data, &[I32])?
        .into_iter()
        .map(|r| match r {
            Record::Scalar(f) => SurfEdge(f.int() as i32),
            Record::Tuple(fs) => SurfEdge(fs[0].int() as i32),
        })
        .collect())
}

impl HasVertices for BspFile {
    fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }
}

impl HasEdges for BspFile {
    fn edges(&self) -> &[Edge] {
        &self.edges
    }

    fn surfedges(&self) -> &[SurfEdge] {
        &self.surfedges
    }
}
