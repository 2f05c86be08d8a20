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
#![allow(dead_code, unused_macros)]

//! Builders for small synthetic levels and archives.

use bspview_levels::bsp::header::{LumpKind, HEADER_LEN, LUMP_COUNT};

pub const MIPTEX_HEADER_SIZE: usize = 40;

macro_rules! assert_out_of_range(
    ($result:expr, $what:expr) => {
        match $result {
            Err(bspview_levels::types::ParseError::OutOfRangeIndex { ref what, .. }) => {
                assert_eq!(what, $what)
            }
            ref other => panic!("expected {} out of range, got {:?}", $what, other),
        }
    };
);

/// Assembles a level file from raw lumps.
pub struct LevelBuilder {
    version: u32,
    lumps: Vec<Vec<u8>>,
}

impl LevelBuilder {
    pub fn new(version: u32) -> LevelBuilder {
        LevelBuilder {
            version,
            lumps: vec![Vec::new(); LUMP_COUNT],
        }
    }

    pub fn lump(mut self, kind: LumpKind, data: Vec<u8>) -> LevelBuilder {
        self.lumps[kind as usize] = data;
        self
    }

    /// Header, then each lump in directory order.
    pub fn build(&self) -> Vec<u8> {
        let mut buf = self.version.to_le_bytes().to_vec();
        let mut offset = HEADER_LEN;
        for lump in self.lumps.iter() {
            buf.extend_from_slice(&(offset as u32).to_le_bytes());
            buf.extend_from_slice(&(lump.len() as u32).to_le_bytes());
            offset += lump.len();
        }
        for lump in self.lumps.iter() {
            buf.extend_from_slice(lump);
        }
        buf
    }
}

pub fn f32s(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes().to_vec()).collect()
}

pub fn i32s(values: &[i32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes().to_vec()).collect()
}

pub fn u16s(values: &[u16]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes().to_vec()).collect()
}

pub fn i16s(values: &[i16]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes().to_vec()).collect()
}

pub fn name16(name: &str) -> Vec<u8> {
    let mut buf = vec![0u8; 16];
    buf[..name.len()].copy_from_slice(name.as_bytes());
    buf
}

pub fn plane(normal: [f32; 3], dist: f32, kind: u32) -> Vec<u8> {
    let mut buf = f32s(&[normal[0], normal[1], normal[2], dist]);
    buf.extend_from_slice(&kind.to_le_bytes());
    buf
}

pub fn edge(a: u16, b: u16) -> Vec<u8> {
    u16s(&[a, b])
}

pub fn face(plane: u16, first_surfedge: u32, count: u16, texinfo: u16, light: i32) -> Vec<u8> {
    let mut buf = u16s(&[plane, 0]);
    buf.extend_from_slice(&first_surfedge.to_le_bytes());
    buf.extend(u16s(&[count, texinfo]));
    buf.extend_from_slice(&[0, 255, 255, 255]);
    buf.extend(i32s(&[light]));
    buf
}

pub fn texinfo(s: [f32; 4], t: [f32; 4], texture: u32, flags: u32) -> Vec<u8> {
    let mut buf = f32s(&s);
    buf.extend(f32s(&t));
    buf.extend_from_slice(&texture.to_le_bytes());
    buf.extend_from_slice(&flags.to_le_bytes());
    buf
}

pub fn node(plane: u32, front: i16, back: i16, first_face: u16, faces: u16) -> Vec<u8> {
    let mut buf = plane.to_le_bytes().to_vec();
    buf.extend(i16s(&[front, back, -128, -128, -128, 128, 128, 128]));
    buf.extend(u16s(&[first_face, faces]));
    buf
}

pub fn leaf(contents: i32, vis_offset: i32, first_mark: u16, marks: u16) -> Vec<u8> {
    let mut buf = i32s(&[contents, vis_offset]);
    buf.extend(i16s(&[-128, -128, -128, 128, 128, 128]));
    buf.extend(u16s(&[first_mark, marks]));
    buf.extend_from_slice(&[0, 0, 0, 0]);
    buf
}

pub fn model(head_node: i32, vis_leaves: i32, first_face: i32, faces: i32) -> Vec<u8> {
    let mut buf = f32s(&[-128.0, -128.0, -128.0, 128.0, 128.0, 128.0, 0.0, 0.0, 0.0]);
    buf.extend(i32s(&[head_node, 0, 0, 0, vis_leaves, first_face, faces]));
    buf
}

/// A mip texture header with no pixels, to be found in an archive.
pub fn miptex_header(name: &str, width: u32, height: u32) -> Vec<u8> {
    let mut buf = name16(name);
    buf.extend_from_slice(&width.to_le_bytes());
    buf.extend_from_slice(&height.to_le_bytes());
    buf.extend_from_slice(&[0; 16]);
    buf
}

/// A full mip texture: header, 4 mip levels, pad, palette.
/// `pixels` is the full size level, `palette` is 768 bytes.
pub fn miptex(name: &str, width: u32, height: u32, pixels: &[u8], palette: &[u8]) -> Vec<u8> {
    assert_eq!(pixels.len(), (width * height) as usize);
    assert_eq!(palette.len(), 768);

    let area = (width * height) as usize;
    let mut buf = name16(name);
    buf.extend_from_slice(&width.to_le_bytes());
    buf.extend_from_slice(&height.to_le_bytes());

    let mut offset = MIPTEX_HEADER_SIZE;
    for n in 0..4 {
        buf.extend_from_slice(&(offset as u32).to_le_bytes());
        offset += area >> (2 * n);
    }

    buf.extend_from_slice(pixels);
    for n in 1..4 {
        buf.extend(std::iter::repeat(0).take(area >> (2 * n)));
    }
    buf.extend_from_slice(&[0, 0]);
    buf.extend_from_slice(palette);
    buf
}

/// 256 shades of grey.
pub fn grey_palette() -> Vec<u8> {
    (0..=255u8).flat_map(|i| vec![i, i, i]).collect()
}

/// A texture lump holding the given texture blobs, in order.
pub fn texture_lump(textures: &[Vec<u8>]) -> Vec<u8> {
    let mut offset = 4 + 4 * textures.len();
    let mut buf = (textures.len() as u32).to_le_bytes().to_vec();
    for tex in textures {
        buf.extend_from_slice(&(offset as u32).to_le_bytes());
        offset += tex.len();
    }
    for tex in textures {
        buf.extend_from_slice(tex);
    }
    buf
}

pub fn entity_lump(text: &str) -> Vec<u8> {
    let mut buf = text.as_bytes().to_vec();
    buf.push(0);
    buf
}

/// A directory entry to be written by [`archive`].
pub struct EntrySpec {
    pub name: &'static str,
    pub kind: u8,
    pub compression: u8,
    pub data: Vec<u8>,
}

impl EntrySpec {
    pub fn texture(name: &'static str, data: Vec<u8>) -> EntrySpec {
        EntrySpec {
            name,
            kind: 0x43,
            compression: 0,
            data,
        }
    }
}

/// A WAD3 archive: header, entry data, then the directory.
pub fn archive(entries: &[EntrySpec]) -> Vec<u8> {
    let mut data = Vec::new();
    let mut directory = Vec::new();
    for entry in entries {
        let offset = 12 + data.len();
        directory.extend_from_slice(&(offset as u32).to_le_bytes());
        directory.extend_from_slice(&(entry.data.len() as u32).to_le_bytes());
        directory.extend_from_slice(&(entry.data.len() as u32).to_le_bytes());
        directory.extend_from_slice(&[entry.kind, entry.compression, 0, 0]);
        directory.extend(name16(entry.name));
        data.extend_from_slice(&entry.data);
    }

    let mut buf = b"WAD3".to_vec();
    buf.extend_from_slice(&(entries.len() as u32).to_le_bytes());
    buf.extend_from_slice(&(12 + data.len() as u32).to_le_bytes());
    buf.extend(data);
    buf.extend(directory);
    buf
}

/// A Half-Life level with a few of everything:
///
/// * a 64x64 floor square (face 0), a two edge sliver (face 1), a face using a
///   trigger texture (face 2) and a face with an edge to a vertex that doesn't exist (face 3)
/// * root node 0 splits on z = 0: above goes to node 1, below is empty.
///   Node 1 splits on x = 32: leaf 1 in front, leaf 2 behind.
/// * leaf 1 can see leaf 2 and vice versa
pub fn sample_level() -> LevelBuilder {
    let vertices = f32s(&[
        0.0, 0.0, 0.0, //
        64.0, 0.0, 0.0, //
        64.0, 64.0, 0.0, //
        0.0, 64.0, 0.0,
    ]);

    let mut edges = edge(0, 0);
    edges.extend(edge(0, 1));
    edges.extend(edge(1, 2));
    edges.extend(edge(2, 3));
    edges.extend(edge(0, 3));
    edges.extend(edge(9, 9));

    let mut planes = plane([1.0, 0.0, 0.0], 32.0, 0);
    planes.extend(plane([0.0, 0.0, 1.0], 0.0, 2));

    let mut faces = face(1, 0, 4, 0, 0);
    faces.extend(face(1, 0, 2, 0, -1));
    faces.extend(face(1, 0, 4, 1, -1));
    faces.extend(face(1, 2, 3, 0, -1));

    let mut texinfos = texinfo([1.0, 0.0, 0.0, 0.0], [0.0, 1.0, 0.0, 0.0], 0, 0);
    texinfos.extend(texinfo([1.0, 0.0, 0.0, 0.0], [0.0, 1.0, 0.0, 0.0], 1, 0));
    texinfos.extend(texinfo([1.0, 0.0, 0.0, 0.0], [0.0, 1.0, 0.0, 0.0], 2, 0));

    let floor_pixels: Vec<u8> = (0..16 * 16).map(|i| (i % 256) as u8).collect();
    let textures = texture_lump(&[
        miptex("floor", 16, 16, &floor_pixels, &grey_palette()),
        miptex_header("AAATRIGGER", 16, 16),
        miptex_header("{fence", 16, 16),
    ]);

    let mut nodes = node(1, 1, -1, 0, 0);
    nodes.extend(node(0, -2, -3, 0, 0));

    let mut leaves = leaf(-2, 0, 0, 0);
    leaves.extend(leaf(-1, 1, 0, 1));
    leaves.extend(leaf(-1, 2, 1, 1));

    LevelBuilder::new(30)
        .lump(
            LumpKind::Entities,
            entity_lump(
                "{\n\"classname\" \"worldspawn\"\n\"wad\" \"\\valve\\halflife.wad;decals.wad\"\n}\n\
                 {\n\"classname\" \"info_player_start\"\n\"origin\" \"16 -8 36\"\n}\n",
            ),
        )
        .lump(LumpKind::Planes, planes)
        .lump(LumpKind::Textures, textures)
        .lump(LumpKind::Vertices, vertices)
        .lump(LumpKind::Visibility, vec![0x00, 0b10, 0b01])
        .lump(LumpKind::Nodes, nodes)
        .lump(LumpKind::TexInfo, texinfos)
        .lump(LumpKind::Faces, faces)
        .lump(LumpKind::Lighting, vec![200, 100, 50, 7])
        .lump(LumpKind::ClipNodes, {
            let mut buf = i32s(&[1]);
            buf.extend(i16s(&[-1, -2]));
            buf
        })
        .lump(LumpKind::Leaves, leaves)
        .lump(LumpKind::MarkSurfaces, u16s(&[0, 1]))
        .lump(LumpKind::Edges, edges)
        .lump(LumpKind::SurfEdges, i32s(&[1, 2, 3, -4, 5]))
        .lump(LumpKind::Models, model(0, 2, 0, 4))
}

/// A level holding one convex polygon with `sides` vertices, wound the way
/// compiled levels are.
pub fn polygon_level(sides: usize) -> Vec<u8> {
    let mut vertices = Vec::new();
    let mut edges = Vec::new();
    for i in 0..sides {
        let angle = i as f32 / sides as f32 * std::f32::consts::PI * 2.0;
        vertices.extend(f32s(&[angle.cos() * 64.0, angle.sin() * 64.0, 0.0]));
        edges.extend(edge(i as u16, ((i + 1) % sides) as u16));
    }
    let surfedges: Vec<i32> = (0..sides as i32).collect();

    LevelBuilder::new(29)
        .lump(LumpKind::Planes, plane([0.0, 0.0, 1.0], 0.0, 2))
        .lump(LumpKind::Textures, texture_lump(&[miptex_header("wall", 32, 32)]))
        .lump(LumpKind::Vertices, vertices)
        .lump(LumpKind::TexInfo, texinfo([1.0, 0.0, 0.0, 0.0], [0.0, 1.0, 0.0, 0.0], 0, 0))
        .lump(LumpKind::Faces, face(0, 0, sides as u16, 0, -1))
        .lump(LumpKind::Edges, edges)
        .lump(LumpKind::SurfEdges, i32s(&surfedges))
        .build()
}
