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

//! Potentially visible sets

use bitvec::prelude::*;

use super::tree::LeafRef;
use super::HasBspTree;
use crate::types::{ParseError, Result};

/// The leaves visible from some leaf, in increasing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleSet {
    leaves: Vec<LeafRef>,
    members: BitVec,
}

impl VisibleSet {
    fn new() -> VisibleSet {
        VisibleSet {
            leaves: Vec::new(),
            members: BitVec::new(),
        }
    }

    /// Grows with the highest leaf seen, so the size is bounded by the data read.
    fn insert(&mut self, leaf: LeafRef) {
        let idx = leaf as usize;
        if idx >= self.members.len() {
            self.members.resize(idx + 1, false);
        }
        self.leaves.push(leaf);
        self.members.set(idx, true);
    }

    pub fn contains(&self, leaf: LeafRef) -> bool {
        self.members.get(leaf as usize).map_or(false, |bit| *bit)
    }

    pub fn leaves(&self) -> &[LeafRef] {
        &self.leaves
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }
}

/// Result of a visibility query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visibility {
    /// No list was compiled for this leaf, so nothing can be culled.
    All,
    Leaves(VisibleSet),
}

impl Visibility {
    pub fn contains(&self, leaf: LeafRef) -> bool {
        match self {
            Visibility::All => true,
            Visibility::Leaves(set) => set.contains(leaf),
        }
    }
}

/// Decompress the visibility list starting at `offset` in `data`.
///
/// Leaves are counted from 1. A zero byte is followed by a count of 8-leaf
/// groups to skip, any other byte is a bitmask of the next 8 leaves, lowest bit
/// first. Stops once `leaf_count` leaves have been covered.
pub fn decompress(data: &[u8], offset: usize, leaf_count: u32) -> Result<VisibleSet> {
    let byte_at = |cursor: usize| {
        data.get(cursor).copied().ok_or_else(|| {
            ParseError::out_of_range("visibility byte", cursor as i64, data.len())
        })
    };

    let mut visible = VisibleSet::new();
    let leaf_count = leaf_count as u64;
    let mut leaf: u64 = 1;
    let mut cursor = offset;

    while leaf <= leaf_count {
        let byte = byte_at(cursor)?;
        if byte == 0 {
            leaf += 8 * byte_at(cursor + 1)? as u64;
            cursor += 2;
            continue;
        }

        for bit in 0..8 {
            if leaf > leaf_count {
                break;
            }
            if byte & (1 << bit) != 0 {
                visible.insert(leaf as LeafRef);
            }
            leaf += 1;
        }
        cursor += 1;
    }

    Ok(visible)
}

pub trait HasVisData: HasBspTree {
    /// The raw visibility lump.
    fn visibility(&self) -> &[u8];

    /// Number of leaves the visibility lists cover.
    /// Never more than the leaves that exist, whatever the world model claims.
    fn vis_leaf_count(&self) -> u32 {
        let available = self.leaves().len().saturating_sub(1) as u32;
        match self.models().first() {
            Some(world) => world.vis_leaves.min(available),
            None => available,
        }
    }

    /// Leaves potentially visible from `leaf`.
    fn visible_leaves(&self, leaf: LeafRef) -> Result<Visibility> {
        if leaf == 0 {
            return Ok(Visibility::All);
        }

        let vis_offset = self
            .get_leaf(leaf)
            .ok_or_else(|| ParseError::out_of_range("leaf", leaf as i64, self.leaves().len()))?
            .vis_offset;

        match vis_offset {
            None => Ok(Visibility::All),
            Some(offset) => {
                decompress(self.visibility(), offset as usize, self.vis_leaf_count())
                    .map(Visibility::Leaves)
            }
        }
    }
}
