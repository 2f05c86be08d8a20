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

//! Parses Quake and Half-Life levels, and the texture archives they use.
//!
//! Start with [`BspFile::parse`] and [`Archive::parse`], then query the level
//! through the traits in [`traits`].

extern crate nalgebra as na;

#[macro_use]
extern crate bitflags;

pub mod bsp;
pub mod helpers;
pub mod miptex;
pub mod palette;
pub mod records;
pub mod traits;
pub mod types;
pub mod wad;

pub use crate::bsp::BspFile;
pub use crate::wad::{Archive, ArchiveSet};

pub mod prelude {
    pub use crate::bsp::{BspFile, BspVersion, LumpKind};
    pub use crate::traits::entities::Entity;
    pub use crate::traits::geometry::FaceGeometry;
    pub use crate::traits::textures::{resolve_texture, Texture, TextureResolver};
    pub use crate::traits::tree::{LeafRef, NodeChild};
    pub use crate::traits::visdata::{Visibility, VisibleSet};
    pub use crate::traits::*;
    pub use crate::types::{ParseError, Rgb, Rgba};
    pub use crate::wad::{Archive, ArchiveSet};
}
