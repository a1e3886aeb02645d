//! Wireframe shape generation
//!
//! Every function returns a line list: consecutive vertex pairs are segments.

use glam::{Mat4, Vec3};
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// Push the segment `a`-`b` transformed by `model`
#[inline]
fn push_line(out: &mut Vec<Vertex>, model: &Mat4, a: Vec3, b: Vec3, color: [f32; 4]) {
    out.push(Vertex::at(model.transform_point3(a), color));
    out.push(Vertex::at(model.transform_point3(b), color));
}

/// Wireframe cube with half-extent `size` (12 edges)
pub fn wire_cube(center: Vec3, size: f32, color: [f32; 4]) -> Vec<Vertex> {
    let model = Mat4::from_translation(center);
    let mut out = Vec::with_capacity(24);

    let corner = |i: u32| {
        Vec3::new(
            if i & 1 == 0 { -size } else { size },
            if i & 2 == 0 { -size } else { size },
            if i & 4 == 0 { -size } else { size },
        )
    };

    // Edges join corners that differ in exactly one bit
    for i in 0..8u32 {
        for axis in [1u32, 2, 4] {
            if i & axis == 0 {
                push_line(&mut out, &model, corner(i), corner(i | axis), color);
            }
        }
    }

    out
}

/// Torus wireframe: one tube loop per ring segment, in the model's XY plane
pub fn wire_torus(
    model: &Mat4,
    ring_radius: f32,
    tube_radius: f32,
    ring_segments: u32,
    tube_segments: u32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let mut out = Vec::with_capacity((ring_segments * tube_segments * 4) as usize);

    let point = |phi: f32, theta: f32| {
        let r = ring_radius + tube_radius * theta.cos();
        Vec3::new(r * phi.cos(), r * phi.sin(), tube_radius * theta.sin())
    };

    for i in 0..ring_segments {
        let phi = i as f32 / ring_segments as f32 * TAU;
        let next_phi = (i + 1) as f32 / ring_segments as f32 * TAU;

        for j in 0..tube_segments {
            let theta = j as f32 / tube_segments as f32 * TAU;
            let next_theta = (j + 1) as f32 / tube_segments as f32 * TAU;

            // Around the tube, then along the ring
            push_line(&mut out, model, point(phi, theta), point(phi, next_theta), color);
            push_line(&mut out, model, point(phi, theta), point(next_phi, theta), color);
        }
    }

    out
}

const ICO_X: f32 = 0.525_731_1;
const ICO_Z: f32 = 0.850_650_8;

const ICO_VERTICES: [[f32; 3]; 12] = [
    [-ICO_X, 0.0, ICO_Z],
    [ICO_X, 0.0, ICO_Z],
    [-ICO_X, 0.0, -ICO_Z],
    [ICO_X, 0.0, -ICO_Z],
    [0.0, ICO_Z, ICO_X],
    [0.0, ICO_Z, -ICO_X],
    [0.0, -ICO_Z, ICO_X],
    [0.0, -ICO_Z, -ICO_X],
    [ICO_Z, ICO_X, 0.0],
    [-ICO_Z, ICO_X, 0.0],
    [ICO_Z, -ICO_X, 0.0],
    [-ICO_Z, -ICO_X, 0.0],
];

const ICO_FACES: [[usize; 3]; 20] = [
    [0, 4, 1],
    [0, 9, 4],
    [9, 5, 4],
    [4, 5, 8],
    [4, 8, 1],
    [8, 10, 1],
    [8, 3, 10],
    [5, 3, 8],
    [5, 2, 3],
    [2, 7, 3],
    [7, 10, 3],
    [7, 6, 10],
    [7, 11, 6],
    [11, 0, 6],
    [0, 1, 6],
    [6, 1, 10],
    [9, 0, 11],
    [9, 11, 2],
    [9, 2, 5],
    [7, 2, 11],
];

/// Once-subdivided icosphere wireframe
pub fn wire_sphere(center: Vec3, radius: f32, color: [f32; 4]) -> Vec<Vertex> {
    let model = Mat4::from_translation(center) * Mat4::from_scale(Vec3::splat(radius));
    let mut out = Vec::with_capacity(ICO_FACES.len() * 12);

    for face in ICO_FACES {
        let [a, b, c] = face.map(|i| Vec3::from_array(ICO_VERTICES[i]));
        let ab = ((a + b) * 0.5).normalize();
        let bc = ((b + c) * 0.5).normalize();
        let ca = ((c + a) * 0.5).normalize();

        push_line(&mut out, &model, a, b, color);
        push_line(&mut out, &model, b, c, color);
        push_line(&mut out, &model, c, a, color);
        push_line(&mut out, &model, ab, bc, color);
        push_line(&mut out, &model, bc, ca, color);
        push_line(&mut out, &model, ca, ab, color);
    }

    out
}

/// Cone wireframe with its apex on -Y and its base circle in the XZ plane
pub fn wire_cone(
    model: &Mat4,
    base_radius: f32,
    height: f32,
    segments: u32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let apex = Vec3::new(0.0, -height, 0.0);
    let mut out = Vec::with_capacity((segments * 4) as usize);

    let rim = |i: u32| {
        let angle = i as f32 / segments as f32 * TAU;
        Vec3::new(base_radius * angle.cos(), 0.0, base_radius * angle.sin())
    };

    for i in 0..segments {
        push_line(&mut out, model, rim(i), rim(i + 1), color);
        push_line(&mut out, model, rim(i), apex, color);
    }

    out
}

/// A single stick of `length` along the model's X axis, centered on the origin
pub fn stick(model: &Mat4, length: f32, color: [f32; 4]) -> [Vertex; 2] {
    let half = Vec3::new(length / 2.0, 0.0, 0.0);
    [
        Vertex::at(model.transform_point3(-half), color),
        Vertex::at(model.transform_point3(half), color),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    fn max_extent(verts: &[Vertex], center: Vec3) -> f32 {
        verts
            .iter()
            .map(|v| Vec3::from_array(v.position).distance(center))
            .fold(0.0, f32::max)
    }

    #[test]
    fn test_wire_cube_edges() {
        let center = Vec3::new(1.0, 2.0, 3.0);
        let verts = wire_cube(center, 2.0, WHITE);
        assert_eq!(verts.len(), 24);

        // Every edge has length 2 * size
        for pair in verts.chunks(2) {
            let a = Vec3::from_array(pair[0].position);
            let b = Vec3::from_array(pair[1].position);
            assert!((a.distance(b) - 4.0).abs() < 1e-5);
        }
        // Corners sit at size * sqrt(3) from the center
        assert!((max_extent(&verts, center) - 2.0 * 3.0f32.sqrt()).abs() < 1e-3);
    }

    #[test]
    fn test_wire_torus_bounds() {
        let verts = wire_torus(&Mat4::IDENTITY, 3.0, 1.0, 16, 8, WHITE);
        assert_eq!(verts.len(), 16 * 8 * 4);
        for v in &verts {
            let p = Vec3::from_array(v.position);
            let planar = p.truncate().length();
            assert!(planar >= 2.0 - 1e-4 && planar <= 4.0 + 1e-4);
            assert!(p.z.abs() <= 1.0 + 1e-4);
        }
    }

    #[test]
    fn test_wire_sphere_on_surface() {
        let center = Vec3::new(-5.0, 0.0, 2.0);
        let verts = wire_sphere(center, 8.0, WHITE);
        assert_eq!(verts.len(), 20 * 12);
        for v in &verts {
            let d = Vec3::from_array(v.position).distance(center);
            assert!((d - 8.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_wire_cone_apex() {
        let verts = wire_cone(&Mat4::IDENTITY, 2.0, 4.0, 12, WHITE);
        assert_eq!(verts.len(), 12 * 4);
        let apex_count = verts
            .iter()
            .filter(|v| Vec3::from_array(v.position).distance(Vec3::new(0.0, -4.0, 0.0)) < 1e-5)
            .count();
        assert_eq!(apex_count, 12);
    }

    #[test]
    fn test_stick_length() {
        let model = Mat4::from_rotation_z(1.0);
        let [a, b] = stick(&model, 5.0, WHITE);
        let len = Vec3::from_array(a.position).distance(Vec3::from_array(b.position));
        assert!((len - 5.0).abs() < 1e-5);
    }
}
