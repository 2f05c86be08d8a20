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
use crate::traits::entities::*;

const START_BRACKET: &str = "{";
const END_BRACKET: &str = "}";
const QUOTE: char = '"';

/// Internal enum to parse through the entities string.
#[derive(PartialEq, Eq)]
enum ParseState {
    InsideEntity,
    OutsideEntity,
}

/// Parse the given data as an entities lump.
/// # Format
/// A block per entity, one `"key" "value"` pair per line:
/// {
/// "classname" "worldspawn"
/// "wad" "halflife.wad"
/// }
/// Lines outside a block are ignored. The text may be NUL terminated.
pub fn from_data(data: &[u8]) -> Box<[Entity]> {
    let string = String::from_utf8_lossy(data);
    let string = string.trim_end_matches('\0');

    let mut entities = Vec::new();
    let mut current = Entity::new();
    let mut state = ParseState::OutsideEntity;

    for line in string.lines() {
        let line = line.trim();
        match state {
            ParseState::OutsideEntity => {
                if line == START_BRACKET {
                    current = Entity::new();
                    state = ParseState::InsideEntity;
                }
            }
            ParseState::InsideEntity if line == END_BRACKET => {
                entities.push(std::mem::take(&mut current));
                state = ParseState::OutsideEntity;
            }
            ParseState::InsideEntity if line.is_empty() => {}
            ParseState::InsideEntity => {
                // An empty key (`"" "value"`) is kept like any other.
                let line = line.replace(QUOTE, "");
                let mut parts = line.splitn(2, ' ');
                let key = parts.next().unwrap_or_default();
                current.insert(key, parts.next().unwrap_or_default());
            }
        }
    }

    if state == ParseState::InsideEntity {
        warn!(
            "Dropping unterminated entity with {} key(s) at end of lump",
            current.len()
        );
    }

    entities.into_boxed_slice()
}

impl HasEntities for BspFile {
    fn entities(&self) -> &[Entity] {
        &self.entities
    }
}

#[test]
fn entities_single_entity() {
    let ents = from_data(b"{\nclassname info_player_start\norigin 0 0 0\n}\n");

    assert_eq!(ents.len(), 1);
    assert_eq!(
        ents[0].iter().collect::<Vec<_>>(),
        vec![("classname", "info_player_start"), ("origin", "0 0 0")]
    );
}

#[test]
fn entities_quoted_crlf() {
    let ents = from_data(
        b"{\r\n\"classname\" \"worldspawn\"\r\n\"message\" \"The  Lab\"\r\n}\r\n\
          {\r\n\"classname\" \"light\"\r\n\"classname\" \"light_spot\"\r\n}\r\n\0",
    );

    assert_eq!(ents.len(), 2);
    assert_eq!(ents[0].classname(), Some("worldspawn"));
    assert_eq!(ents[0].get("message"), Some("The  Lab"));
    assert_eq!(ents[1].classname(), Some("light_spot"));
    assert_eq!(ents[1].len(), 1);
}

#[test]
fn entities_keep_empty_keys() {
    let ents = from_data(b"{\n\"classname\" \"light\"\n\n\"\" \"orphan value\"\n}\n");

    assert_eq!(ents.len(), 1);
    assert_eq!(ents[0].len(), 2);
    assert_eq!(ents[0].get(""), Some("orphan value"));
}

#[test]
fn entities_ignores_stray_lines() {
    let ents = from_data(b"junk\n}\n{\nclassname light\n}\nmore junk\n{\nclassname lost\n");

    assert_eq!(ents.len(), 1);
    assert_eq!(ents[0].classname(), Some("light"));
}
