use serde::{Deserialize, Serialize};
use std::ops::Range;

pub type FaceRef = u32;

/// A polygon, bounded by a loop of surfedges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face {
    pub plane_idx: u32,

    /// True if the face points away from its plane's normal.
    pub back_side: bool,

    /// Range into the surfedges lump.
    pub surfedges: Range<u32>,

    pub texinfo_idx: u32,

    /// Lighting styles, 255 marks an unused slot.
    pub styles: [u8; 4],

    /// Byte offset into the lighting lump, `None` if the face is unlit.
    pub lightmap_offset: Option<u32>,
}

impl Face {
    /// Number of edges around this face.
    pub fn edge_count(&self) -> u32 {
        self.surfedges.end - self.surfedges.start
    }
}

pub trait HasFaces {
    fn faces(&self) -> &[Face];

    fn get_face(&self, idx: FaceRef) -> Option<&Face> {
        self.faces().get(idx as usize)
    }
}
