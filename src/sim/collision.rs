//! Circle tests used for every hit check in the game
//!
//! Gameplay happens on the z = 0 plane, so all tests are 2D. Bullets are
//! points; ships and rings are circles around their centers.

use glam::Vec2;

/// Check if `point` lies strictly inside the circle at `center`
#[inline]
pub fn circle_contains(center: Vec2, radius: f32, point: Vec2) -> bool {
    (point - center).length_squared() < radius * radius
}

/// Distance between two points on the play plane (z ignored by callers)
#[inline]
pub fn planar_distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}
