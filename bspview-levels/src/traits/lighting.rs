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

use crate::types::Rgb;

/// The lighting lump. Quake levels store one intensity per sample,
/// Half-Life levels store an RGB triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lighting {
    Mono(Box<[u8]>),
    Rgb(Box<[u8]>),
}

impl Lighting {
    /// The sample starting at byte `offset`, if it's in the lump.
    pub fn sample(&self, offset: u32) -> Option<Rgb> {
        let offset = offset as usize;
        match self {
            Lighting::Mono(data) => data.get(offset).map(|&v| Rgb::grey(v)),
            Lighting::Rgb(data) => data.get(offset..offset + 3).map(Rgb::from_slice),
        }
    }

    /// Size of the lump in bytes.
    pub fn len(&self) -> usize {
        match self {
            Lighting::Mono(data) | Lighting::Rgb(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub trait HasLighting {
    fn lighting(&self) -> &Lighting;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples() {
        let mono = Lighting::Mono(vec![10, 200].into_boxed_slice());
        assert_eq!(mono.sample(1), Some(Rgb::grey(200)));
        assert_eq!(mono.sample(2), None);

        let rgb = Lighting::Rgb(vec![1, 2, 3, 4, 5].into_boxed_slice());
        assert_eq!(rgb.sample(0), Some(Rgb { r: 1, g: 2, b: 3 }));
        assert_eq!(rgb.sample(2), Some(Rgb { r: 3, g: 4, b: 5 }));
        assert_eq!(rgb.sample(3), None);
    }
}
