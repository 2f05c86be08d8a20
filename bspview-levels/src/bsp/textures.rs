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

use log::warn;

use super::file::BspFile;
use crate::helpers::{slice_to_i32, sub_slice, u32_at};
use crate::miptex::{self, PaletteSource};
use crate::traits::textures::*;
use crate::types::{ParseError, Result};

/// Parse the textures lump.
/// # Format
/// uint count
/// int[count] offsets      Relative to the start of the lump, negative if missing.
/// Followed by a mip texture header (and possibly its pixels) at each offset.
///
/// Textures that can't be read are replaced with [`Texture::placeholder`], and the
/// reason is returned alongside so indices into the lump stay valid.
pub fn from_data(
    lump: &[u8],
    palette_source: PaletteSource,
) -> Result<(Box<[Texture]>, Vec<ParseError>)> {
    if lump.is_empty() {
        return Ok((Vec::new().into_boxed_slice(), Vec::new()));
    }

    let count = u32_at(lump, 0, "texture count")? as usize;
    let offsets = sub_slice(lump, 4, count.saturating_mul(4), "texture offsets")?;

    let mut textures = Vec::with_capacity(count);
    let mut warnings = Vec::new();
    for (n, raw) in offsets.chunks_exact(4).enumerate() {
        let offset = slice_to_i32(raw);
        let texture = if offset < 0 {
            Err(ParseError::out_of_range(
                format!("offset of texture {}", n),
                offset as i64,
                lump.len(),
            ))
        } else {
            miptex::read(lump, offset as usize, palette_source)
        };

        match texture {
            Ok(texture) => textures.push(texture),
            Err(e) => {
                warn!("Texture {} replaced with a placeholder: {}", n, e);
                warnings.push(e);
                textures.push(Texture::placeholder());
            }
        }
    }

    Ok((textures.into_boxed_slice(), warnings))
}

impl HasTextures for BspFile {
    fn textures(&self) -> &[Texture] {
        &self.textures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::miptex::tests::embedded_miptex;
    use crate::palette::Palette;

    fn lump(offsets: &[i32], blobs: &[Vec<u8>]) -> Vec<u8> {
        let mut buf = (offsets.len() as u32).to_le_bytes().to_vec();
        for o in offsets {
            buf.extend_from_slice(&o.to_le_bytes());
        }
        for blob in blobs {
            buf.extend_from_slice(blob);
        }
        buf
    }

    #[test]
    fn textures_embedded_and_missing() {
        let table = 4 + 3 * 4;
        let first = embedded_miptex("{grate", 16, 16, 4);
        let second = table + first.len();
        let buf = lump(
            &[table as i32, -1, second as i32],
            &[first, embedded_miptex("water", 8, 8, 2)],
        );

        let (textures, warnings) = from_data(&buf, PaletteSource::Embedded).unwrap();

        assert_eq!(textures.len(), 3);
        assert_eq!(textures[0].name, "{grate");
        assert_eq!(textures[0].base_offset, table);
        assert_eq!(textures[1], Texture::placeholder());
        assert_eq!(textures[2].name, "water");
        assert_eq!(textures[2].pixels.as_ref().map(|p| p.len()), Some(64));

        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            warnings[0],
            ParseError::OutOfRangeIndex { index: -1, .. }
        ));
    }

    #[test]
    fn textures_builtin_palette() {
        let buf = lump(&[8], &[embedded_miptex("metal", 16, 16, 1)]);
        let (textures, warnings) = from_data(&buf, PaletteSource::Builtin).unwrap();

        assert!(warnings.is_empty());
        assert_eq!(textures[0].palette, Some(Palette::quake()));
    }

    #[test]
    fn textures_table_past_end() {
        let mut buf = lump(&[8, 8], &[]);
        buf[0..4].copy_from_slice(&9u32.to_le_bytes());

        assert!(matches!(
            from_data(&buf, PaletteSource::Embedded),
            Err(ParseError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn textures_empty_lump() {
        let (textures, warnings) = from_data(&[], PaletteSource::Embedded).unwrap();
        assert!(textures.is_empty() && warnings.is_empty());
    }
}
