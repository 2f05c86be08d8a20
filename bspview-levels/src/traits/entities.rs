use na::Vector3;
use serde::{Deserialize, Serialize};

use crate::types::{ParseError, Result};

pub type EntityRef = u32;

/// A game entity.
/// The set of keys is open ended, so this is a map rather than a struct.
/// Keys keep the order they were first seen in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    attributes: Vec<(String, String)>,
}

impl Entity {
    pub fn new() -> Entity {
        Entity::default()
    }

    /// Set `key`, replacing any previous value.
    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Like `get`, but a missing key is an error.
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| ParseError::MissingKey(key.to_owned()))
    }

    pub fn classname(&self) -> Option<&str> {
        self.get("classname")
    }

    /// The `origin` key as a vector, if present and made of 3 numbers.
    pub fn origin(&self) -> Option<Vector3<f32>> {
        let mut parts = self.get("origin")?.split_whitespace().map(str::parse::<f32>);
        let x = parts.next()?.ok()?;
        let y = parts.next()?.ok()?;
        let z = parts.next()?.ok()?;

        Some(Vector3::new(x, y, z))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

pub trait HasEntities {
    fn entities(&self) -> &[Entity];

    fn get_entity(&self, idx: EntityRef) -> Option<&Entity> {
        self.entities().get(idx as usize)
    }

    /// The entity carrying level-wide settings.
    fn worldspawn(&self) -> Result<&Entity> {
        self.entities()
            .iter()
            .find(|e| e.classname() == Some("worldspawn"))
            .ok_or_else(|| ParseError::MissingKey("classname".to_owned()))
    }

    /// File names of the texture archives the level asks for, from worldspawn's
    /// `wad` key. Paths are stripped down to the file name.
    fn required_archives(&self) -> Result<Vec<String>> {
        let wads = self.worldspawn()?.require("wad")?;

        Ok(wads
            .split(';')
            .filter_map(|path| path.rsplit(|c| c == '\\' || c == '/').next())
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
            .collect())
    }
}
