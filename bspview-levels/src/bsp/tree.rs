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
use crate::helpers::{fields_to_vec3i, index_range};
use crate::records::{extract, FieldType::*, Record};
use crate::traits::tree::*;
use crate::traits::visdata::HasVisData;
use crate::types::Result;

/// Parse the nodes lump.
/// # Format
/// uint plane
/// short[2] children   See [`NodeChild::from_raw`].
/// short[3] mins
/// short[3] maxs
/// ushort first_face
/// ushort face_count
pub fn nodes_from_data(data: &[u8]) -> Result<Box<[Node]>> {
    Ok(extract(
        data,
        &[U32, I16, I16, I16, I16, I16, I16, I16, I16, U16, U16],
    )?
    .iter()
    .map(|r| {
        let f = r.fields();
        Node {
            plane_idx: f[0].int() as u32,
            children: [
                NodeChild::from_raw(f[1].int() as i32),
                NodeChild::from_raw(f[2].int() as i32),
            ],
            mins: fields_to_vec3i(&f[3..6]),
            maxs: fields_to_vec3i(&f[6..9]),
            faces: index_range(f[9].int(), f[10].int()),
        }
    })
    .collect())
}

/// Parse the leaves lump.
/// # Format
/// int contents
/// int vis_offset          Offset into the visibility lump, <= 0 if there's no list.
/// short[3] mins
/// short[3] maxs
/// ushort first_marksurface
/// ushort marksurface_count
/// ubyte[4] ambient
pub fn leaves_from_data(data: &[u8]) -> Result<Box<[Leaf]>> {
    Ok(extract(
        data,
        &[
            I32, I32, I16, I16, I16, I16, I16, I16, U16, U16, U8, U8, U8, U8,
        ],
    )?
    .iter()
    .map(|r| {
        let f = r.fields();
        let vis_offset = f[1].int();
        Leaf {
            contents: Contents::from_raw(f[0].int() as i32),
            vis_offset: if vis_offset > 0 {
                Some(vis_offset as u32)
            } else {
                None
            },
            mins: fields_to_vec3i(&f[2..5]),
            maxs: fields_to_vec3i(&f[5..8]),
            marksurfaces: index_range(f[8].int(), f[9].int()),
            ambient: [
                f[10].int() as u8,
                f[11].int() as u8,
                f[12].int() as u8,
                f[13].int() as u8,
            ],
        }
    })
    .collect())
}

/// Parse the clipnodes lump.
/// # Format
/// int plane
/// short[2] children
pub fn clip_nodes_from_data(data: &[u8]) -> Result<Box<[ClipNode]>> {
    Ok(extract(data, &[I32, I16, I16])?
        .iter()
        .map(|r| {
            let f = r.fields();
            ClipNode {
                plane_idx: f[0].int() as u32,
                children: [f[1].int() as i16, f[2].int() as i16],
            }
        })
        .collect())
}

/// Parse the marksurfaces lump, a flat list of face indices.
pub fn mark_surfaces_from_data(data: &[u8]) -> Result<Box<[u16]>> {
    Ok(extract(data, &[U16])?
        .into_iter()
        .map(|r| match r {
            Record::Scalar(f) => f.int() as u16,
            Record::Tuple(fs) => fs[0].int() as u16,
        })
        .collect())
}

impl HasBspTree for BspFile {
    fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    fn clip_nodes(&self) -> &[ClipNode] {
        &self.clip_nodes
    }

    fn mark_surfaces(&self) -> &[u16] {
        &self.mark_surfaces
    }
}

impl HasVisData for BspFile {
    fn visibility(&self) -> &[u8] {
        &self.visibility
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use na::Vector3;

    fn push_i16s(buf: &mut Vec<u8>, values: &[i16]) {
        for v in values {
            buf.extend_from_slice(&v.to_le_bytes());
        }
    }

    #[test]
    fn node_children_decoded() {
        let mut buf = 5u32.to_le_bytes().to_vec();
        push_i16s(&mut buf, &[3, -1, -8, -8, -8, 8, 8, 8, 2, 6]);

        let nodes = nodes_from_data(&buf).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].plane_idx, 5);
        assert_eq!(nodes[0].children, [NodeChild::Node(3), NodeChild::Empty]);
        assert_eq!(nodes[0].mins, Vector3::new(-8, -8, -8));
        assert_eq!(nodes[0].faces, 2..8);

        let mut buf = 0u32.to_le_bytes().to_vec();
        push_i16s(&mut buf, &[-2, -10, 0, 0, 0, 0, 0, 0, 0, 0]);
        let nodes = nodes_from_data(&buf).unwrap();
        assert_eq!(nodes[0].children, [NodeChild::Leaf(1), NodeChild::Leaf(9)]);
    }

    #[test]
    fn leaf_without_vis_list() {
        let mut buf = Vec::new();
        for vis_offset in &[0i32, -1, 40] {
            buf.extend_from_slice(&(-1i32).to_le_bytes());
            buf.extend_from_slice(&vis_offset.to_le_bytes());
            push_i16s(&mut buf, &[0, 0, 0, 16, 16, 16, 4, 2]);
            buf.extend_from_slice(&[0, 0, 30, 0]);
        }

        let leaves = leaves_from_data(&buf).unwrap();
        assert_eq!(leaves.len(), 3);
        assert_eq!(leaves[0].vis_offset, None);
        assert_eq!(leaves[1].vis_offset, None);
        assert_eq!(leaves[2].vis_offset, Some(40));
        assert_eq!(leaves[2].contents, Contents::Empty);
        assert_eq!(leaves[2].marksurfaces, 4..6);
        assert_eq!(leaves[2].ambient, [0, 0, 30, 0]);
    }

    #[test]
    fn clip_nodes_and_marks() {
        let mut buf = 9i32.to_le_bytes().to_vec();
        push_i16s(&mut buf, &[-2, 1]);
        assert_eq!(
            &clip_nodes_from_data(&buf).unwrap()[..],
            &[ClipNode {
                plane_idx: 9,
                children: [-2, 1]
            }]
        );

        assert_eq!(
            &mark_surfaces_from_data(&[1, 0, 0, 1]).unwrap()[..],
            &[1, 256]
        );
    }
}
