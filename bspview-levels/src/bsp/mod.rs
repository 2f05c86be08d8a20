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

//! Parsing data from Quake and Half-Life levels

mod entities;
mod faces;
pub mod file;
pub mod header;
mod lighting;
mod models;
mod planes;
mod texinfo;
mod textures;
mod tree;
mod vertices;

pub use self::file::BspFile;
pub use self::header::{BspVersion, Header, LumpEntry, LumpKind};
