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

use log::debug;

use super::Archive;
use crate::traits::textures::{Texture, TextureResolver};
use crate::types::{ParseError, Result};

/// A collection of loaded archives, searched newest first.
#[derive(Debug, Clone, Default)]
pub struct ArchiveSet {
    /// Highest priority first
    archives: Vec<(String, Archive)>,
}

impl ArchiveSet {
    pub fn new() -> ArchiveSet {
        ArchiveSet::default()
    }

    /// Add an archive, giving it priority over everything already loaded.
    /// An archive already loaded under `name` is replaced.
    pub fn insert<S: Into<String>>(&mut self, name: S, archive: Archive) {
        let name = name.into();
        self.remove(&name);

        debug!("Archive loaded: {} ({} textures)", name, archive.len());
        self.archives.insert(0, (name, archive));
    }

    pub fn remove(&mut self, name: &str) -> Option<Archive> {
        let idx = self.archives.iter().position(|(n, _)| n == name)?;
        Some(self.archives.remove(idx).1)
    }

    pub fn clear(&mut self) {
        self.archives.clear();
    }

    pub fn get(&self, name: &str) -> Option<&Archive> {
        self.archives
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, a)| a)
    }

    /// Names of loaded archives, highest priority first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.archives.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.archives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archives.is_empty()
    }

    /// Find a texture by name in the newest archive that has it.
    pub fn resolve_texture(&self, name: &str) -> Result<&Texture> {
        self.archives
            .iter()
            .find_map(|(_, archive)| archive.get(name))
            .ok_or_else(|| ParseError::TextureNotFound(name.to_owned()))
    }
}

impl TextureResolver for ArchiveSet {
    fn resolve<'a>(&'a self, texture: &Texture) -> Result<&'a Texture> {
        self.resolve_texture(&texture.name)
    }
}
