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

use na::Vector3;
use serde::{Deserialize, Serialize};

pub type Vertex = Vector3<f32>;

/// A line between two vertices, shared by the faces either side of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub vertices: [u16; 2],
}

/// A signed reference to an edge.
/// Negative values walk the edge backwards, from its second vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfEdge(pub i32);

impl SurfEdge {
    /// Index into the edges lump.
    pub fn edge_index(self) -> u32 {
        self.0.unsigned_abs()
    }

    pub fn is_reversed(self) -> bool {
        self.0 < 0
    }

    /// The vertex this surfedge starts at.
    pub fn first_vertex(self, edge: &Edge) -> u16 {
        if self.is_reversed() {
            edge.vertices[1]
        } else {
            edge.vertices[0]
        }
    }
}

pub trait HasVertices {
    fn vertices(&self) -> &[Vertex];

    fn get_vertex(&self, index: u32) -> Option<&Vertex> {
        self.vertices().get(index as usize)
    }
}

pub trait HasEdges: HasVertices {
    fn edges(&self) -> &[Edge];
    fn surfedges(&self) -> &[SurfEdge];

    fn get_edge(&self, index: u32) -> Option<&Edge> {
        self.edges().get(index as usize)
    }

    fn get_surfedge(&self, index: u32) -> Option<SurfEdge> {
        self.surfedges().get(index as usize).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surfedge_direction() {
        let edge = Edge { vertices: [4, 9] };

        assert_eq!(SurfEdge(3).edge_index(), 3);
        assert_eq!(SurfEdge(3).first_vertex(&edge), 4);
        assert_eq!(SurfEdge(-3).edge_index(), 3);
        assert_eq!(SurfEdge(-3).first_vertex(&edge), 9);
        assert_eq!(SurfEdge(0).first_vertex(&edge), 4);
    }
}
