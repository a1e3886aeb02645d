//! Vertex types for 3D line and point rendering

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Position and color, laid out for direct upload to a vertex buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, z: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y, z],
            color,
        }
    }

    #[inline]
    pub fn at(pos: Vec3, color: [f32; 4]) -> Self {
        Self {
            position: pos.to_array(),
            color,
        }
    }

    /// Byte stride of one vertex in a buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Colors for game elements
pub mod colors {
    pub const PLANET: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
    pub const PLANET_GUARD: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const RING: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const SHIP: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
    pub const SHIP_BULLET: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const RING_BULLET: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const ARROW: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.02, 1.0];

    /// Ring debris fades from red
    pub fn ring_debris(alpha: f32) -> [f32; 4] {
        [1.0, 0.0, 0.0, alpha]
    }

    /// Ship debris fades from magenta
    pub fn ship_debris(alpha: f32) -> [f32; 4] {
        [1.0, 0.0, 1.0, alpha]
    }
}
