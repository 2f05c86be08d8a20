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

use image::RgbaImage;

use crate::palette::{is_transparent, Palette};
use crate::types::Result;

pub type TextureRef = u32;

/// Names of brush textures that never produce visible geometry.
/// Compared case-insensitively.
pub const SKIPPED_TEXTURES: &[&str] = &[
    "aaatrigger",
    "trigger",
    "clip",
    "origin",
    "null",
    "hint",
    "skip",
];

/// A mip texture, either embedded in a level or read from an archive.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub name: String,
    pub width: u32,
    pub height: u32,

    /// Offsets of the 4 mip levels, relative to `base_offset`.
    /// 0 means the level isn't stored here and must come from an archive.
    pub mip_offsets: [u32; 4],

    /// Offset of the texture header from the start of the lump or archive it came from
    pub base_offset: usize,

    /// Palette indices for the full size mip level, `width * height` long
    pub pixels: Option<Box<[u8]>>,
    pub palette: Option<Palette>,
}

impl Texture {
    /// A texture with nothing in it, standing in for a missing lump entry
    /// so that the indices after it stay correct.
    pub fn placeholder() -> Texture {
        Texture {
            name: String::new(),
            width: 0,
            height: 0,
            mip_offsets: [0; 4],
            base_offset: 0,
            pixels: None,
            palette: None,
        }
    }

    /// True if the pixel data is stored alongside this header.
    pub fn is_embedded(&self) -> bool {
        self.mip_offsets[0] != 0
    }

    /// True if faces using this texture shouldn't be drawn at all.
    pub fn is_skipped(&self) -> bool {
        SKIPPED_TEXTURES
            .iter()
            .any(|s| s.eq_ignore_ascii_case(&self.name))
    }

    /// True if any pixel decodes to the transparency key.
    pub fn has_transparency(&self) -> bool {
        match (&self.pixels, &self.palette) {
            (Some(pixels), Some(palette)) => {
                pixels.iter().any(|&i| is_transparent(palette.color(i)))
            }
            _ => false,
        }
    }

    /// Expand the full size mip level to RGBA.
    /// Returns `None` if the pixels or palette aren't available.
    pub fn to_rgba(&self) -> Option<RgbaImage> {
        let pixels = self.pixels.as_ref()?;
        let palette = self.palette.as_ref()?;

        let mut raw = Vec::with_capacity(pixels.len() * 4);
        for &index in pixels.iter() {
            raw.extend_from_slice(&palette.rgba(index).to_bytes());
        }

        RgbaImage::from_raw(self.width, self.height, raw)
    }
}

/// Something that can supply textures which aren't embedded in the level.
pub trait TextureResolver {
    /// Find the full texture for `texture`, which is only a header.
    fn resolve<'a>(&'a self, texture: &Texture) -> Result<&'a Texture>;
}

/// Use the texture itself if it's embedded, otherwise ask the resolver.
pub fn resolve_texture<'a, R: TextureResolver>(
    texture: &'a Texture,
    resolver: &'a R,
) -> Result<&'a Texture> {
    if texture.is_embedded() {
        Ok(texture)
    } else {
        resolver.resolve(texture)
    }
}

pub trait HasTextures {
    fn textures(&self) -> &[Texture];

    fn get_texture(&self, idx: TextureRef) -> Option<&Texture> {
        self.textures().get(idx as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PALETTE_SIZE;

    fn texture(name: &str) -> Texture {
        Texture {
            name: name.to_owned(),
            ..Texture::placeholder()
        }
    }

    #[test]
    fn skip_list_ignores_case() {
        assert!(texture("AAATRIGGER").is_skipped());
        assert!(texture("Clip").is_skipped());
        assert!(!texture("aaatrigger2").is_skipped());
        assert!(!texture("+0~light").is_skipped());
    }

    #[test]
    fn blue_pixels_become_transparent() {
        let mut raw = [0u8; PALETTE_SIZE];
        for (i, c) in raw.chunks_exact_mut(3).enumerate() {
            c.copy_from_slice(&[i as u8, i as u8, 0]);
        }
        raw[255 * 3..].copy_from_slice(&[0, 0, 255]);

        let tex = Texture {
            width: 2,
            height: 2,
            mip_offsets: [40, 44, 45, 46],
            pixels: Some(vec![1, 255, 3, 255].into_boxed_slice()),
            palette: Some(Palette::from_slice(&raw)),
            ..texture("{grate")
        };

        assert!(tex.has_transparency());
        let img = tex.to_rgba().unwrap();
        assert_eq!(img.get_pixel(0, 0).0, [1, 1, 0, 255]);
        assert_eq!(img.get_pixel(1, 0).0, [0, 0, 255, 0]);
        assert_eq!(img.get_pixel(0, 1).0, [3, 3, 0, 255]);
        assert_eq!(img.get_pixel(1, 1).0, [0, 0, 255, 0]);
    }

    #[test]
    fn unembedded_has_no_image() {
        let tex = Texture {
            width: 64,
            height: 64,
            ..texture("crate01")
        };
        assert!(!tex.is_embedded());
        assert!(tex.to_rgba().is_none());
        assert!(!tex.has_transparency());
    }
}
