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

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::helpers::{slice_to_u32, slice_to_u32_be, sub_slice};
use crate::miptex::{self, PaletteSource};
use crate::records::{extract, FieldType::*};
use crate::traits::textures::Texture;
use crate::types::{Container, ParseError, Result};

/// "WAD3", read big endian
pub const MAGIC_WAD3: u32 = 0x5741_4433;

/// Entry type of a mip texture
pub const TYPE_MIPTEX: u8 = 0x43;

/// Entry type of a mip texture in older archives
pub const TYPE_MIPTEX_WAD2: u8 = 0x44;

/// Offset of the directory entry list from the start of the archive
const HEADER_SIZE: usize = 12;

/// An entry in the archive's directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    pub name: String,

    /// Offset of the entry's data from the start of the archive
    pub offset: u32,
    pub disk_size: u32,
    pub size: u32,
    pub kind: u8,

    /// 0 if stored uncompressed, the only kind supported.
    pub compression: u8,
}

impl ArchiveEntry {
    pub fn is_texture(&self) -> bool {
        self.kind == TYPE_MIPTEX || self.kind == TYPE_MIPTEX_WAD2
    }
}

/// A parsed texture archive.
#[derive(Debug, Clone)]
pub struct Archive {
    entries: Box<[ArchiveEntry]>,

    /// Keyed by lowercased entry name
    textures: HashMap<String, Texture>,

    warnings: Vec<ParseError>,
}

impl Archive {
    /// Parse `data` as a WAD3 archive.
    /// # Format
    /// char[4] magic           "WAD3"
    /// uint count              Number of directory entries.
    /// uint dir_offset         Offset of the directory.
    ///
    /// Each directory entry is:
    /// uint offset
    /// uint disk_size
    /// uint size
    /// ubyte type
    /// ubyte compression
    /// ushort padding
    /// string[16] name
    ///
    /// A bad magic, a truncated header or a bad directory fails outright. Entries that can't be read are
    /// skipped and noted in [`Archive::warnings`].
    pub fn parse(data: &[u8]) -> Result<Archive> {
        let magic = data.get(0..4).map_or(0, slice_to_u32_be);
        if magic != MAGIC_WAD3 {
            return Err(ParseError::BadMagic {
                container: Container::Archive,
                found: magic,
            });
        }

        let header = sub_slice(data, 0, HEADER_SIZE, "archive header")?;
        let count = slice_to_u32(&header[4..8]) as usize;
        let dir_offset = slice_to_u32(&header[8..12]) as usize;

        let types = [U32, U32, U32, U8, U8, U16, Name16];
        let dir_size = count.saturating_mul(crate::records::stride(&types));
        let directory = sub_slice(data, dir_offset, dir_size, "archive directory")?;

        let entries: Box<[ArchiveEntry]> = extract(directory, &types)?
            .iter()
            .map(|r| {
                let f = r.fields();
                ArchiveEntry {
                    name: f[6].text().to_owned(),
                    offset: f[0].int() as u32,
                    disk_size: f[1].int() as u32,
                    size: f[2].int() as u32,
                    kind: f[3].int() as u8,
                    compression: f[4].int() as u8,
                }
            })
            .collect();

        let mut textures = HashMap::with_capacity(entries.len());
        let mut warnings = Vec::new();
        for entry in entries.iter() {
            if !entry.is_texture() {
                debug!("Skipping {} (type {:#04x})", entry.name, entry.kind);
                continue;
            }

            let texture = if entry.compression != 0 {
                Err(ParseError::Unsupported(format!(
                    "compression type {}",
                    entry.compression
                )))
            } else {
                miptex::read(data, entry.offset as usize, PaletteSource::Embedded)
            };

            match texture {
                Ok(texture) => {
                    textures.insert(entry.name.to_ascii_lowercase(), texture);
                }
                Err(e) => {
                    let e = ParseError::InEntry {
                        name: entry.name.clone(),
                        source: Box::new(e),
                    };
                    warn!("{}", e);
                    warnings.push(e);
                }
            }
        }

        debug!(
            "Loaded archive: {} entries, {} textures",
            entries.len(),
            textures.len()
        );

        Ok(Archive {
            entries,
            textures,
            warnings,
        })
    }

    /// Find a texture by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&Texture> {
        self.textures.get(&name.to_ascii_lowercase())
    }

    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    pub fn textures(&self) -> impl Iterator<Item = &Texture> {
        self.textures.values()
    }

    /// Number of textures that were read successfully.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Entries that were skipped, and why.
    pub fn warnings(&self) -> &[ParseError] {
        &self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_magic_has_no_table() {
        let mut buf = b"WAD2".to_vec();
        buf.extend_from_slice(&[0; 8]);

        assert_eq!(
            Archive::parse(&buf).unwrap_err(),
            ParseError::BadMagic {
                container: Container::Archive,
                found: 0x5741_4432
            }
        );
    }

    #[test]
    fn short_buffer_is_not_an_archive() {
        assert!(matches!(
            Archive::parse(b"WA"),
            Err(ParseError::BadMagic { .. })
        ));
    }

    #[test]
    fn truncated_header_is_out_of_bounds() {
        let mut buf = b"WAD3".to_vec();
        buf.extend_from_slice(&1u32.to_le_bytes());

        assert_eq!(
            Archive::parse(&buf).unwrap_err(),
            ParseError::OutOfBounds {
                what: "archive header".to_owned(),
                offset: 0,
                size: 12,
                available: 8
            }
        );
        assert!(matches!(
            Archive::parse(b"WAD3"),
            Err(ParseError::OutOfBounds { available: 4, .. })
        ));
    }

    #[test]
    fn empty_archive() {
        let mut buf = b"WAD3".to_vec();
        buf.extend_from_slice(&0u32.to_le_bytes());
        buf.extend_from_slice(&12u32.to_le_bytes());

        let archive = Archive::parse(&buf).unwrap();
        assert!(archive.is_empty());
        assert!(archive.entries().is_empty());
    }
}
