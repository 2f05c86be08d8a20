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

//! Mip texture headers, shared by levels and archives.

use crate::helpers::{slice_to_name, slice_to_u32, sub_slice, NAME_LEN};
use crate::palette::{Palette, PALETTE_SIZE};
use crate::traits::textures::Texture;
use crate::types::Result;

/// Size of a mip texture header
/// # Format
/// string[16] name
/// uint width
/// uint height
/// uint offsets[4]     relative to the start of the header, 0 if not stored
pub const MIPTEX_HEADER_SIZE: usize = NAME_LEN + 4 * 6;

/// Padding between the last mip level and the palette
const PALETTE_PAD: usize = 2;

/// Where the colours for a texture come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteSource {
    /// Stored after the smallest mip level
    Embedded,

    /// The fixed Quake palette. Any bytes after the mip levels are ignored.
    Builtin,
}

/// Read the texture whose header starts at `base` in `buf`.
pub fn read(buf: &[u8], base: usize, palette_source: PaletteSource) -> Result<Texture> {
    let header = sub_slice(buf, base, MIPTEX_HEADER_SIZE, "mip texture header")?;

    let name = slice_to_name(&header[0..NAME_LEN]);
    let width = slice_to_u32(&header[16..20]);
    let height = slice_to_u32(&header[20..24]);
    let mut mip_offsets = [0; 4];
    for (n, offset) in mip_offsets.iter_mut().enumerate() {
        let start = 24 + n * 4;
        *offset = slice_to_u32(&header[start..start + 4]);
    }

    let mut texture = Texture {
        name,
        width,
        height,
        mip_offsets,
        base_offset: base,
        pixels: None,
        palette: None,
    };

    if !texture.is_embedded() {
        return Ok(texture);
    }

    let area = width as usize * height as usize;
    let pixels = sub_slice(
        buf,
        base + mip_offsets[0] as usize,
        area,
        &format!("pixels of {}", texture.name),
    )?;
    texture.pixels = Some(pixels.into());

    texture.palette = Some(match palette_source {
        PaletteSource::Builtin => Palette::quake(),
        PaletteSource::Embedded => {
            let offset = base + mip_offsets[3] as usize + area / 64 + PALETTE_PAD;
            let raw = sub_slice(
                buf,
                offset,
                PALETTE_SIZE,
                &format!("palette of {}", texture.name),
            )?;
            Palette::from_slice(raw)
        }
    });

    Ok(texture)
}
