use na::Vector3;
use serde::{Deserialize, Serialize};

/// Which axis a plane is aligned to, as recorded by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaneType {
    /// Perpendicular to an axis.
    X,
    Y,
    Z,

    /// Not axis aligned, closest to the given axis.
    AnyX,
    AnyY,
    AnyZ,

    /// A value outside 0..=5
    Other(u32),
}

impl PlaneType {
    pub fn from_raw(raw: u32) -> PlaneType {
        match raw {
            0 => PlaneType::X,
            1 => PlaneType::Y,
            2 => PlaneType::Z,
            3 => PlaneType::AnyX,
            4 => PlaneType::AnyY,
            5 => PlaneType::AnyZ,
            n => PlaneType::Other(n),
        }
    }
}

/// The thing used to split space in the BSP tree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Plane normal. Not always unit length in compiled levels.
    pub normal: Vector3<f32>,

    /// Distance from origin to plane along normal
    pub dist: f32,

    pub kind: PlaneType,
}

impl Plane {
    /// Signed distance from the plane to `point`, positive on the front side.
    pub fn distance_to(&self, point: &Vector3<f32>) -> f32 {
        self.normal.dot(point) - self.dist
    }
}

pub trait HasPlanes {
    fn planes(&self) -> &[Plane];

    fn get_plane(&self, idx: u32) -> Option<&Plane> {
        self.planes().get(idx as usize)
    }
}
