use serde::{Deserialize, Serialize};
use std::fmt;

use crate::helpers::{slice_to_u32, sub_slice};
use crate::miptex::PaletteSource;
use crate::types::{Container, ParseError, Result};

/// Number of lumps in the directory
pub const LUMP_COUNT: usize = 15;

/// Version tag followed by an (offset, size) pair per lump
pub const HEADER_LEN: usize = 4 + LUMP_COUNT * 4 * 2;

/// A named section of a level file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LumpKind {
    Entities,
    Planes,
    Textures,
    Vertices,
    Visibility,
    Nodes,
    TexInfo,
    Faces,
    Lighting,
    ClipNodes,
    Leaves,
    MarkSurfaces,
    Edges,
    SurfEdges,
    Models,
}

impl LumpKind {
    pub fn name(self) -> &'static str {
        match self {
            LumpKind::Entities => "entities",
            LumpKind::Planes => "planes",
            LumpKind::Textures => "textures",
            LumpKind::Vertices => "vertices",
            LumpKind::Visibility => "visibility",
            LumpKind::Nodes => "nodes",
            LumpKind::TexInfo => "texinfo",
            LumpKind::Faces => "faces",
            LumpKind::Lighting => "lighting",
            LumpKind::ClipNodes => "clipnodes",
            LumpKind::Leaves => "leaves",
            LumpKind::MarkSurfaces => "marksurfaces",
            LumpKind::Edges => "edges",
            LumpKind::SurfEdges => "surfedges",
            LumpKind::Models => "models",
        }
    }

    pub fn from_name(name: &str) -> Option<LumpKind> {
        STANDARD_ORDER
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for LumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const STANDARD_ORDER: [LumpKind; LUMP_COUNT] = [
    LumpKind::Entities,
    LumpKind::Planes,
    LumpKind::Textures,
    LumpKind::Vertices,
    LumpKind::Visibility,
    LumpKind::Nodes,
    LumpKind::TexInfo,
    LumpKind::Faces,
    LumpKind::Lighting,
    LumpKind::ClipNodes,
    LumpKind::Leaves,
    LumpKind::MarkSurfaces,
    LumpKind::Edges,
    LumpKind::SurfEdges,
    LumpKind::Models,
];

/// Supported level versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BspVersion {
    /// Quake. Textures use the built in palette and lighting is greyscale.
    Quake = 29,

    /// Half-Life. Textures carry their own palette and lighting is RGB.
    HalfLife = 30,
}

impl BspVersion {
    pub fn from_raw(tag: u32) -> Option<BspVersion> {
        match tag {
            29 => Some(BspVersion::Quake),
            30 => Some(BspVersion::HalfLife),
            _ => None,
        }
    }

    /// Order lumps appear in the directory.
    pub fn lump_order(self) -> &'static [LumpKind; LUMP_COUNT] {
        match self {
            BspVersion::Quake | BspVersion::HalfLife => &STANDARD_ORDER,
        }
    }

    pub fn palette_source(self) -> PaletteSource {
        match self {
            BspVersion::Quake => PaletteSource::Builtin,
            BspVersion::HalfLife => PaletteSource::Embedded,
        }
    }

    pub fn has_rgb_lighting(self) -> bool {
        self == BspVersion::HalfLife
    }
}

/// A directory entry, pointing to a lump in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LumpEntry {
    pub kind: LumpKind,

    /// Offset from beginning of file to start of lump
    pub offset: u32,

    /// Length of lump in bytes
    pub size: u32,
}

/// The header found at the start of a level file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub version: BspVersion,

    /// In directory order.
    pub lumps: [LumpEntry; LUMP_COUNT],
}

impl Header {
    /// Deserialise from buffer.
    /// # Format
    /// int version                 29 for Quake, 30 for Half-Life.
    /// direntry[15] direntries     Lump directory, fifteen (offset, size) pairs.
    ///
    /// Lump bounds aren't checked here, see [`Header::get_lump`].
    pub fn from(v: &[u8]) -> Result<Header> {
        let tag = slice_to_u32(sub_slice(v, 0, 4, "version tag")?);
        let version = BspVersion::from_raw(tag).ok_or(ParseError::BadMagic {
            container: Container::Level,
            found: tag,
        })?;

        let entries = sub_slice(v, 4, HEADER_LEN - 4, "lump directory")?;
        let order = version.lump_order();
        let mut lumps = [LumpEntry {
            kind: LumpKind::Entities,
            offset: 0,
            size: 0,
        }; LUMP_COUNT];

        for (n, lump) in lumps.iter_mut().enumerate() {
            let base = &entries[n * 8..(n * 8) + 8];
            *lump = LumpEntry {
                kind: order[n],
                offset: slice_to_u32(&base[0..4]),
                size: slice_to_u32(&base[4..8]),
            };
        }

        Ok(Header { version, lumps })
    }

    pub fn entry(&self, kind: LumpKind) -> LumpEntry {
        self.lumps
            .iter()
            .copied()
            .find(|e| e.kind == kind)
            .unwrap_or(LumpEntry {
                kind,
                offset: 0,
                size: 0,
            })
    }

    /// Look up a lump by its name, ignoring case.
    pub fn entry_by_name(&self, name: &str) -> Option<LumpEntry> {
        LumpKind::from_name(name).map(|kind| self.entry(kind))
    }

    /// Get the given lump from the buffer, with offset & length based on this directory.
    pub fn get_lump<'l>(&self, buf: &'l [u8], kind: LumpKind) -> Result<&'l [u8]> {
        let entry = self.entry(kind);

        sub_slice(buf, entry.offset as usize, entry.size as usize, kind.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes(version: u32) -> Vec<u8> {
        let mut buf = version.to_le_bytes().to_vec();
        for n in 0..LUMP_COUNT as u32 {
            buf.extend_from_slice(&(HEADER_LEN as u32 + n * 4).to_le_bytes());
            buf.extend_from_slice(&4u32.to_le_bytes());
        }
        buf
    }

    #[test]
    fn reads_directory_in_order() {
        let header = Header::from(&header_bytes(30)).unwrap();

        assert_eq!(header.version, BspVersion::HalfLife);
        assert_eq!(header.lumps[0].kind, LumpKind::Entities);
        assert_eq!(header.lumps[14].kind, LumpKind::Models);
        assert_eq!(
            header.entry(LumpKind::Faces),
            LumpEntry {
                kind: LumpKind::Faces,
                offset: HEADER_LEN as u32 + 7 * 4,
                size: 4
            }
        );
        assert_eq!(
            header.entry_by_name("SURFEDGES").map(|e| e.offset),
            Some(HEADER_LEN as u32 + 13 * 4)
        );
        assert_eq!(header.entry_by_name("brushes"), None);
    }

    #[test]
    fn rejects_unknown_versions() {
        assert_eq!(
            Header::from(&header_bytes(38)),
            Err(ParseError::BadMagic {
                container: Container::Level,
                found: 38
            })
        );
    }

    #[test]
    fn short_header() {
        let mut buf = header_bytes(29);
        buf.truncate(50);
        assert!(matches!(
            Header::from(&buf),
            Err(ParseError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn lumps_are_checked_lazily() {
        let mut buf = header_bytes(29);
        // Point the last lump off the end
        let at = 4 + 14 * 8;
        buf[at..at + 4].copy_from_slice(&1000u32.to_le_bytes());
        buf.extend_from_slice(&[0; 64]);

        let header = Header::from(&buf).unwrap();
        assert!(header.get_lump(&buf, LumpKind::Entities).is_ok());
        assert!(matches!(
            header.get_lump(&buf, LumpKind::Models),
            Err(ParseError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn names_display_lowercase() {
        assert_eq!(LumpKind::MarkSurfaces.to_string(), "marksurfaces");
        assert_eq!(LumpKind::from_name("TexInfo"), Some(LumpKind::TexInfo));
    }
}
