use na::Vector3;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A brush model. Index 0 is the whole level, the rest are moving brush entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub mins: Vector3<f32>,
    pub maxs: Vector3<f32>,
    pub origin: Vector3<f32>,

    /// Root nodes: the draw tree followed by 3 clipping hulls.
    pub head_nodes: [i32; 4],

    /// Number of leaves covered by the visibility lists, not counting leaf 0.
    pub vis_leaves: u32,

    /// Range into the faces lump.
    pub faces: Range<u32>,
}

pub trait HasModels {
    fn models(&self) -> &[Model];

    fn get_model(&self, idx: u32) -> Option<&Model> {
        self.models().get(idx as usize)
    }
}
