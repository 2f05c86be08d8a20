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

use super::file::BspFile;
use super::header::BspVersion;
use crate::traits::lighting::*;

/// Wrap the lighting lump in the layout used by `version`.
pub fn from_data(data: &[u8], version: BspVersion) -> Lighting {
    let data = Box::from(data);
    if version.has_rgb_lighting() {
        Lighting::Rgb(data)
    } else {
        Lighting::Mono(data)
    }
}

impl HasLighting for BspFile {
    fn lighting(&self) -> &Lighting {
        &self.lighting
    }
}

#[test]
fn lighting_layout_follows_version() {
    let data = [10, 20, 30];
    assert_eq!(
        from_data(&data, BspVersion::Quake).sample(1),
        Some(crate::types::Rgb::grey(20))
    );
    assert_eq!(
        from_data(&data, BspVersion::HalfLife).sample(0),
        Some(crate::types::Rgb { r: 10, g: 20, b: 30 })
    );
}
