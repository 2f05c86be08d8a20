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

//! Various types used in parsed levels and archives.

use serde::{Deserialize, Serialize};
use std::convert::TryInto;
use std::fmt;
use thiserror::Error;

use crate::bsp::header::LumpKind;

/// RGBA Colour (0-255)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Interpret the given bytes as an RGBA colour.
    pub fn from_bytes(bytes: [u8; 4]) -> Rgba {
        Rgba {
            r: bytes[0],
            g: bytes[1],
            b: bytes[2],
            a: bytes[3],
        }
    }

    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// RGB Colour (0-255)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// 255, 255, 255
    pub fn white() -> Rgb {
        Rgb {
            r: 255,
            g: 255,
            b: 255,
        }
    }

    /// Interpret the given bytes as an RGB colour.
    pub fn from_bytes(bytes: [u8; 3]) -> Rgb {
        Rgb {
            r: bytes[0],
            g: bytes[1],
            b: bytes[2],
        }
    }

    /// Convert a slice to an RGB colour
    /// # Panics
    /// If slice is not 3 bytes long.
    pub fn from_slice(slice: &[u8]) -> Rgb {
        Rgb::from_bytes(slice.try_into().unwrap())
    }

    /// A grey of the given intensity
    pub fn grey(v: u8) -> Rgb {
        Rgb { r: v, g: v, b: v }
    }
}

/// Which kind of container a magic number was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Container {
    Level,
    Archive,
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Container::Level => f.write_str("level"),
            Container::Archive => f.write_str("texture archive"),
        }
    }
}

/// An error encountered while parsing or querying.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParseError {
    /// The container's magic or version tag isn't one we support.
    /// For archives this is the "not an archive" case.
    #[error("not a supported {container} (magic {found:#010x})")]
    BadMagic { container: Container, found: u32 },

    #[error("{len} bytes is not a whole number of {stride}-byte records")]
    TruncatedRecord { len: usize, stride: usize },

    #[error("{what} ({size} bytes at {offset}) runs past the end of the data ({available} bytes)")]
    OutOfBounds {
        what: String,
        offset: usize,
        size: usize,
        available: usize,
    },

    #[error("{what} index {index} is out of range ({len} available)")]
    OutOfRangeIndex { what: String, index: i64, len: usize },

    #[error("no `{0}` key")]
    MissingKey(String),

    #[error("texture `{0}` not found in any loaded archive")]
    TextureNotFound(String),

    #[error("unsupported: {0}")]
    Unsupported(String),

    #[error("walk through node {node} never reached a leaf")]
    MalformedTree { node: u32 },

    #[error("in {lump} lump: {source}")]
    InLump {
        lump: LumpKind,
        #[source]
        source: Box<ParseError>,
    },

    #[error("in archive entry `{name}`: {source}")]
    InEntry {
        name: String,
        #[source]
        source: Box<ParseError>,
    },
}

impl ParseError {
    pub(crate) fn out_of_range<S: Into<String>>(what: S, index: i64, len: usize) -> ParseError {
        ParseError::OutOfRangeIndex {
            what: what.into(),
            index,
            len,
        }
    }

    pub(crate) fn in_lump(self, lump: LumpKind) -> ParseError {
        ParseError::InLump {
            lump,
            source: Box::new(self),
        }
    }

    /// Strip any context wrappers, leaving the error that actually happened.
    pub fn root(&self) -> &ParseError {
        match self {
            ParseError::InLump { source, .. } | ParseError::InEntry { source, .. } => {
                source.root()
            }
            other => other,
        }
    }
}

/// Standard result type.
pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_unwraps_context() {
        let err = ParseError::TruncatedRecord { len: 7, stride: 4 }.in_lump(LumpKind::Planes);
        assert_eq!(
            err.root(),
            &ParseError::TruncatedRecord { len: 7, stride: 4 }
        );
        assert_eq!(
            err.to_string(),
            "in planes lump: 7 bytes is not a whole number of 4-byte records"
        );
    }
}
