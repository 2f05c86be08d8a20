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

//! The BSP tree, and walking it

use na::Vector3;
use serde::{Deserialize, Serialize};
use std::ops::Range;

use super::faces::FaceRef;
use super::{HasFaces, HasModels, HasPlanes};
use crate::types::{ParseError, Result};

pub type NodeRef = u32;
pub type LeafRef = u32;

/// Where a node's child reference points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeChild {
    Node(NodeRef),
    Leaf(LeafRef),

    /// Solid space with no leaf of its own. Never an index.
    Empty,
}

impl NodeChild {
    /// Decode a raw child reference.
    /// Positive values are nodes, -1 is empty, anything lower is leaf `-ref - 1`.
    pub fn from_raw(raw: i32) -> NodeChild {
        match raw {
            r if r >= 0 => NodeChild::Node(r as u32),
            -1 => NodeChild::Empty,
            r => NodeChild::Leaf((-(r as i64) - 1) as u32),
        }
    }
}

/// What fills a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contents {
    Empty,
    Solid,
    Water,
    Slime,
    Lava,
    Sky,
    Origin,
    Clip,
    /// Water current, numbered 0..=5 (0, 90, 180, 270, up, down)
    Current(u8),
    Translucent,
    Other(i32),
}

impl Contents {
    pub fn from_raw(raw: i32) -> Contents {
        match raw {
            -1 => Contents::Empty,
            -2 => Contents::Solid,
            -3 => Contents::Water,
            -4 => Contents::Slime,
            -5 => Contents::Lava,
            -6 => Contents::Sky,
            -7 => Contents::Origin,
            -8 => Contents::Clip,
            -14..=-9 => Contents::Current((-9 - raw) as u8),
            -15 => Contents::Translucent,
            n => Contents::Other(n),
        }
    }

    pub fn is_liquid(self) -> bool {
        matches!(
            self,
            Contents::Water | Contents::Slime | Contents::Lava | Contents::Current(_)
        )
    }
}

/// An internal node, splitting space by a plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub plane_idx: u32,

    /// Front then back.
    pub children: [NodeChild; 2],

    pub mins: Vector3<i16>,
    pub maxs: Vector3<i16>,

    /// Faces lying on this node's plane.
    pub faces: Range<u32>,
}

/// A convex region of space at the bottom of the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaf {
    pub contents: Contents,

    /// Byte offset of this leaf's compressed visibility list, if it has one.
    pub vis_offset: Option<u32>,

    pub mins: Vector3<i16>,
    pub maxs: Vector3<i16>,

    /// Range into the marksurfaces lump.
    pub marksurfaces: Range<u32>,

    /// Ambient sound levels: water, sky, slime, lava.
    pub ambient: [u8; 4],
}

/// A node in one of the collision hulls.
/// Children use the same encoding as [`NodeChild`], except the negative values are contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipNode {
    pub plane_idx: u32,
    pub children: [i16; 2],
}

pub trait HasBspTree: HasPlanes + HasModels + HasFaces {
    fn nodes(&self) -> &[Node];
    fn leaves(&self) -> &[Leaf];
    fn clip_nodes(&self) -> &[ClipNode];

    /// Face indices for leaves, indexed by [`Leaf::marksurfaces`].
    fn mark_surfaces(&self) -> &[u16];

    fn get_node(&self, idx: NodeRef) -> Option<&Node> {
        self.nodes().get(idx as usize)
    }

    fn get_leaf(&self, idx: LeafRef) -> Option<&Leaf> {
        self.leaves().get(idx as usize)
    }

    /// Find the leaf containing `point`, walking down from the given model's
    /// draw tree. Points on a plane go to the back.
    /// Returns `None` if the point is in empty space.
    fn locate_leaf(&self, model: u32, point: &Vector3<f32>) -> Result<Option<LeafRef>> {
        let model = self
            .get_model(model)
            .ok_or_else(|| ParseError::out_of_range("model", model as i64, self.models().len()))?;

        let mut child = NodeChild::from_raw(model.head_nodes[0]);
        let mut last = 0;

        // Every node can be visited at most once on the way down.
        for _ in 0..=self.nodes().len() {
            match child {
                NodeChild::Empty => return Ok(None),
                NodeChild::Leaf(idx) => {
                    if idx as usize >= self.leaves().len() {
                        return Err(ParseError::out_of_range(
                            "leaf",
                            idx as i64,
                            self.leaves().len(),
                        ));
                    }

                    return Ok(Some(idx));
                }
                NodeChild::Node(idx) => {
                    let node = self.get_node(idx).ok_or_else(|| {
                        ParseError::out_of_range("node", idx as i64, self.nodes().len())
                    })?;
                    let plane = self.get_plane(node.plane_idx).ok_or_else(|| {
                        ParseError::out_of_range(
                            "plane",
                            node.plane_idx as i64,
                            self.planes().len(),
                        )
                    })?;

                    child = if plane.distance_to(point) > 0.0 {
                        node.children[0]
                    } else {
                        node.children[1]
                    };
                    last = idx;
                }
            }
        }

        Err(ParseError::MalformedTree { node: last })
    }

    /// Faces to draw for the given leaf.
    fn leaf_faces(&self, leaf: LeafRef) -> Result<Vec<FaceRef>> {
        let leaf = self
            .get_leaf(leaf)
            .ok_or_else(|| ParseError::out_of_range("leaf", leaf as i64, self.leaves().len()))?;

        let marks = self.mark_surfaces();
        let range = leaf.marksurfaces.clone();
        if range.end as usize > marks.len() {
            return Err(ParseError::out_of_range(
                "marksurface",
                range.end as i64 - 1,
                marks.len(),
            ));
        }

        marks[range.start as usize..range.end as usize]
            .iter()
            .map(|&face| {
                if (face as usize) < self.faces().len() {
                    Ok(face as FaceRef)
                } else {
                    Err(ParseError::out_of_range(
                        "face",
                        face as i64,
                        self.faces().len(),
                    ))
                }
            })
            .collect()
    }

    /// Every leaf reachable from the level's own tree (model 0), depth first.
    fn world_leaves(&self) -> Result<Vec<LeafRef>> {
        let model = self
            .get_model(0)
            .ok_or_else(|| ParseError::out_of_range("model", 0, self.models().len()))?;

        let mut leaves = Vec::new();
        let mut stack = vec![NodeChild::from_raw(model.head_nodes[0])];
        let mut visited = 0;

        while let Some(child) = stack.pop() {
            match child {
                NodeChild::Empty => {}
                NodeChild::Leaf(idx) => leaves.push(idx),
                NodeChild::Node(idx) => {
                    visited += 1;
                    if visited > self.nodes().len() {
                        return Err(ParseError::MalformedTree { node: idx });
                    }

                    let node = self.get_node(idx).ok_or_else(|| {
                        ParseError::out_of_range("node", idx as i64, self.nodes().len())
                    })?;
                    stack.push(node.children[0]);
                    stack.push(node.children[1]);
                }
            }
        }

        Ok(leaves)
    }
}
