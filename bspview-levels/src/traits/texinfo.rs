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

use super::textures::TextureRef;

bitflags!(
    /// Flags on a texture projection.
    #[derive(Serialize, Deserialize)]
    pub struct TexInfoFlags: u32 {
        /// Sky or liquid. Not lightmapped and not subdivided.
        const SPECIAL = 0b01;
    }
);

/// Planar projection of a texture onto a face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TexInfo {
    pub s: Vector3<f32>,
    pub s_shift: f32,
    pub t: Vector3<f32>,
    pub t_shift: f32,
    pub texture_idx: TextureRef,

    /// The flags this library knows about.
    pub flags: TexInfoFlags,

    /// Every flag bit as stored, including ones outside [`TexInfoFlags`].
    pub raw_flags: u32,
}

impl TexInfo {
    /// Texture space coordinates of `point`, in texels.
    pub fn project(&self, point: &Vector3<f32>) -> (f32, f32) {
        (
            self.s.dot(point) + self.s_shift,
            self.t.dot(point) + self.t_shift,
        )
    }
}

pub trait HasTexInfo {
    fn texinfo(&self) -> &[TexInfo];

    fn get_texinfo(&self, idx: u32) -> Option<&TexInfo> {
        self.texinfo().get(idx as usize)
    }
}
