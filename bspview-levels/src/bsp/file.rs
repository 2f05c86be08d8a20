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

//! A complete level file

// Trait implementations are stored in their own files.

use log::{debug, warn};

use super::header::{BspVersion, Header, LumpKind};
use super::*;
use crate::traits::entities::Entity;
use crate::traits::faces::Face;
use crate::traits::lighting::Lighting;
use crate::traits::models::Model;
use crate::traits::planes::Plane;
use crate::traits::texinfo::TexInfo;
use crate::traits::textures::Texture;
use crate::traits::tree::{ClipNode, Leaf, Node, NodeChild};
use crate::traits::vertices::{Edge, SurfEdge, Vertex};
use crate::traits::HasFaceGeometry;
use crate::types::{ParseError, Result};

/// A parsed Quake or Half-Life level.
#[derive(Debug, Clone)]
pub struct BspFile {
    pub(crate) header: Header,
    pub(crate) entities: Box<[Entity]>,
    pub(crate) planes: Box<[Plane]>,
    pub(crate) textures: Box<[Texture]>,
    pub(crate) vertices: Box<[Vertex]>,
    pub(crate) visibility: Box<[u8]>,
    pub(crate) nodes: Box<[Node]>,
    pub(crate) texinfo: Box<[TexInfo]>,
    pub(crate) faces: Box<[Face]>,
    pub(crate) lighting: Lighting,
    pub(crate) clip_nodes: Box<[ClipNode]>,
    pub(crate) leaves: Box<[Leaf]>,
    pub(crate) mark_surfaces: Box<[u16]>,
    pub(crate) edges: Box<[Edge]>,
    pub(crate) surfedges: Box<[SurfEdge]>,
    pub(crate) models: Box<[Model]>,
    warnings: Vec<ParseError>,
}

impl BspFile {
    /// Parse `data` as a level file.
    ///
    /// Only a bad header fails outright. Problems with individual lumps or
    /// records are logged and collected in [`BspFile::warnings`]: a lump that
    /// can't be decoded is left empty, and records with bad indices are kept
    /// as they are for the queries to reject.
    pub fn parse(data: &[u8]) -> Result<BspFile> {
        let header = Header::from(data)?;
        let mut warnings = Vec::new();

        debug!("Parsing {:?} level, {} bytes", header.version, data.len());

        let entities = decode_lump(&header, data, LumpKind::Entities, &mut warnings, |lump| {
            Ok(entities::from_data(lump))
        });
        let planes = decode_lump(
            &header,
            data,
            LumpKind::Planes,
            &mut warnings,
            planes::from_data,
        );

        let mut texture_warnings = Vec::new();
        let textures = decode_lump(&header, data, LumpKind::Textures, &mut warnings, |lump| {
            let (textures, bad) = textures::from_data(lump, header.version.palette_source())?;
            texture_warnings = bad;
            Ok(textures)
        });
        warnings.extend(
            texture_warnings
                .into_iter()
                .map(|e| e.in_lump(LumpKind::Textures)),
        );

        let vertices = decode_lump(
            &header,
            data,
            LumpKind::Vertices,
            &mut warnings,
            vertices::verts_from_data,
        );
        let visibility: Box<[u8]> = decode_lump(
            &header,
            data,
            LumpKind::Visibility,
            &mut warnings,
            |lump| Ok(Box::from(lump)),
        );
        let nodes = decode_lump(
            &header,
            data,
            LumpKind::Nodes,
            &mut warnings,
            tree::nodes_from_data,
        );
        let texinfo = decode_lump(
            &header,
            data,
            LumpKind::TexInfo,
            &mut warnings,
            texinfo::from_data,
        );
        let faces = decode_lump(
            &header,
            data,
            LumpKind::Faces,
            &mut warnings,
            faces::from_data,
        );
        let light_data: Box<[u8]> = decode_lump(
            &header,
            data,
            LumpKind::Lighting,
            &mut warnings,
            |lump| Ok(Box::from(lump)),
        );
        let lighting = lighting::from_data(&light_data, header.version);
        let clip_nodes = decode_lump(
            &header,
            data,
            LumpKind::ClipNodes,
            &mut warnings,
            tree::clip_nodes_from_data,
        );
        let leaves = decode_lump(
            &header,
            data,
            LumpKind::Leaves,
            &mut warnings,
            tree::leaves_from_data,
        );
        let mark_surfaces = decode_lump(
            &header,
            data,
            LumpKind::MarkSurfaces,
            &mut warnings,
            tree::mark_surfaces_from_data,
        );
        let edges = decode_lump(
            &header,
            data,
            LumpKind::Edges,
            &mut warnings,
            vertices::edges_from_data,
        );
        let surfedges = decode_lump(
            &header,
            data,
            LumpKind::SurfEdges,
            &mut warnings,
            vertices::surfedges_from_data,
        );
        let models = decode_lump(
            &header,
            data,
            LumpKind::Models,
            &mut warnings,
            models::from_data,
        );

        let mut file = BspFile {
            header,
            entities,
            planes,
            textures,
            vertices,
            visibility,
            nodes,
            texinfo,
            faces,
            lighting,
            clip_nodes,
            leaves,
            mark_surfaces,
            edges,
            surfedges,
            models,
            warnings,
        };
        file.check_indices();

        if !file.warnings.is_empty() {
            warn!("Level parsed with {} warning(s)", file.warnings.len());
        }

        Ok(file)
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn version(&self) -> BspVersion {
        self.header.version
    }

    /// Everything that went wrong while parsing, in the order it was found.
    pub fn warnings(&self) -> &[ParseError] {
        &self.warnings
    }

    /// Look for indices that point outside the lump they refer to.
    fn check_indices(&mut self) {
        let mut found = Vec::new();
        let mut check = |lump: LumpKind, what: &str, index: i64, len: usize| {
            if index < 0 || index as usize >= len {
                found.push(ParseError::out_of_range(what, index, len).in_lump(lump));
            }
        };
        let range_end = |range: &std::ops::Range<u32>| range.end as i64 - 1;

        for edge in self.edges.iter() {
            for &v in edge.vertices.iter() {
                check(LumpKind::Edges, "vertex", v as i64, self.vertices.len());
            }
        }
        for surfedge in self.surfedges.iter() {
            check(
                LumpKind::SurfEdges,
                "edge",
                surfedge.edge_index() as i64,
                self.edges.len(),
            );
        }
        for info in self.texinfo.iter() {
            check(
                LumpKind::TexInfo,
                "texture",
                info.texture_idx as i64,
                self.textures.len(),
            );
        }
        for face in self.faces.iter() {
            check(LumpKind::Faces, "plane", face.plane_idx as i64, self.planes.len());
            check(
                LumpKind::Faces,
                "texinfo",
                face.texinfo_idx as i64,
                self.texinfo.len(),
            );
            if !face.surfedges.is_empty() {
                check(
                    LumpKind::Faces,
                    "surfedge",
                    range_end(&face.surfedges),
                    self.surfedges.len(),
                );
            }
        }
        for node in self.nodes.iter() {
            check(LumpKind::Nodes, "plane", node.plane_idx as i64, self.planes.len());
            for child in node.children.iter() {
                match *child {
                    NodeChild::Node(n) => {
                        check(LumpKind::Nodes, "node", n as i64, self.nodes.len())
                    }
                    NodeChild::Leaf(l) => {
                        check(LumpKind::Nodes, "leaf", l as i64, self.leaves.len())
                    }
                    NodeChild::Empty => {}
                }
            }
        }
        for leaf in self.leaves.iter() {
            if !leaf.marksurfaces.is_empty() {
                check(
                    LumpKind::Leaves,
                    "marksurface",
                    range_end(&leaf.marksurfaces),
                    self.mark_surfaces.len(),
                );
            }
            if let Some(offset) = leaf.vis_offset {
                check(
                    LumpKind::Leaves,
                    "visibility byte",
                    offset as i64,
                    self.visibility.len(),
                );
            }
        }
        for &face in self.mark_surfaces.iter() {
            check(LumpKind::MarkSurfaces, "face", face as i64, self.faces.len());
        }
        // Leaf 0 never has a list, so at most len - 1 leaves are covered.
        if let Some(world) = self.models.first() {
            if world.vis_leaves > 0 {
                check(
                    LumpKind::Models,
                    "visible leaf count",
                    world.vis_leaves as i64,
                    self.leaves.len(),
                );
            }
        }
        for model in self.models.iter() {
            if !model.faces.is_empty() {
                check(
                    LumpKind::Models,
                    "face",
                    range_end(&model.faces),
                    self.faces.len(),
                );
            }
        }

        for e in found.iter() {
            warn!("{}", e);
        }
        self.warnings.extend(found);
    }
}

impl HasFaceGeometry for BspFile {}

/// Decode one lump. On failure, log it, note it in `warnings` and carry on with
/// an empty lump.
fn decode_lump<T, F>(
    header: &Header,
    data: &[u8],
    kind: LumpKind,
    warnings: &mut Vec<ParseError>,
    decoder: F,
) -> Box<[T]>
where
    F: FnOnce(&[u8]) -> Result<Box<[T]>>,
{
    match header.get_lump(data, kind).and_then(decoder) {
        Ok(records) => {
            debug!("{} lump: {} record(s)", kind, records.len());
            records
        }
        Err(e) => {
            let e = e.in_lump(kind);
            warn!("{}", e);
            warnings.push(e);
            Vec::new().into_boxed_slice()
        }
    }
}
