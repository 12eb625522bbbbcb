//! Procedural part primitives: box, elliptic cylinder, extruded prism
//!
//! Every primitive is centered at the origin with its height along +Z and
//! takes FULL extents (not half-extents), so the bounding box of the result
//! matches the sampled part size exactly.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use tracing::warn;

use super::MeshBuilder;

/// Radial segments used for cylinder parts
pub const CYLINDER_SEGMENTS: u32 = 32;

fn positive_or_clamp(name: &str, param: &str, value: f32) -> f32 {
    if value <= 0.0 {
        warn!("{name}: {param} must be > 0.0, clamping to 0.001");
        0.001
    } else {
        value
    }
}

/// Generate an axis-aligned box
///
/// # Arguments
/// * `size_x` - Full extent along X
/// * `size_y` - Full extent along Y
/// * `size_z` - Full extent along Z
///
/// # Returns
/// Mesh with 24 vertices (4 per face) and flat normals
pub fn generate_box<M: MeshBuilder>(size_x: f32, size_y: f32, size_z: f32) -> M {
    let hx = positive_or_clamp("generate_box", "size_x", size_x) * 0.5;
    let hy = positive_or_clamp("generate_box", "size_y", size_y) * 0.5;
    let hz = positive_or_clamp("generate_box", "size_z", size_z) * 0.5;

    let mut mesh = M::default();

    let add_quad = |mesh: &mut M, corners: [Vec3; 4], normal: Vec3| {
        let i0 = mesh.add_vertex(corners[0], normal);
        let i1 = mesh.add_vertex(corners[1], normal);
        let i2 = mesh.add_vertex(corners[2], normal);
        let i3 = mesh.add_vertex(corners[3], normal);

        mesh.add_triangle(i0, i1, i2);
        mesh.add_triangle(i0, i2, i3);
    };

    // Corners listed CCW when viewed from outside
    add_quad(
        &mut mesh,
        [
            Vec3::new(-hx, -hy, hz),
            Vec3::new(hx, -hy, hz),
            Vec3::new(hx, hy, hz),
            Vec3::new(-hx, hy, hz),
        ],
        Vec3::Z,
    );
    add_quad(
        &mut mesh,
        [
            Vec3::new(-hx, hy, -hz),
            Vec3::new(hx, hy, -hz),
            Vec3::new(hx, -hy, -hz),
            Vec3::new(-hx, -hy, -hz),
        ],
        Vec3::NEG_Z,
    );
    add_quad(
        &mut mesh,
        [
            Vec3::new(hx, -hy, -hz),
            Vec3::new(hx, hy, -hz),
            Vec3::new(hx, hy, hz),
            Vec3::new(hx, -hy, hz),
        ],
        Vec3::X,
    );
    add_quad(
        &mut mesh,
        [
            Vec3::new(-hx, -hy, hz),
            Vec3::new(-hx, hy, hz),
            Vec3::new(-hx, hy, -hz),
            Vec3::new(-hx, -hy, -hz),
        ],
        Vec3::NEG_X,
    );
    add_quad(
        &mut mesh,
        [
            Vec3::new(-hx, hy, -hz),
            Vec3::new(-hx, hy, hz),
            Vec3::new(hx, hy, hz),
            Vec3::new(hx, hy, -hz),
        ],
        Vec3::Y,
    );
    add_quad(
        &mut mesh,
        [
            Vec3::new(-hx, -hy, -hz),
            Vec3::new(hx, -hy, -hz),
            Vec3::new(hx, -hy, hz),
            Vec3::new(-hx, -hy, hz),
        ],
        Vec3::NEG_Y,
    );

    mesh
}

/// Generate a cylinder with an elliptic cross-section
///
/// # Arguments
/// * `size_x` - Diameter along X
/// * `size_y` - Diameter along Y
/// * `height` - Extent along Z
/// * `segments` - Number of radial divisions (min 3, max 256)
pub fn generate_elliptic_cylinder<M: MeshBuilder>(
    size_x: f32,
    size_y: f32,
    height: f32,
    segments: u32,
) -> M {
    let a = positive_or_clamp("generate_elliptic_cylinder", "size_x", size_x) * 0.5;
    let b = positive_or_clamp("generate_elliptic_cylinder", "size_y", size_y) * 0.5;
    let height = positive_or_clamp("generate_elliptic_cylinder", "height", height);
    let segments = segments.clamp(3, 256);

    let outline: Vec<Vec2> = (0..segments)
        .map(|i| {
            let theta = (i as f32 / segments as f32) * TAU;
            Vec2::new(a * theta.cos(), b * theta.sin())
        })
        .collect();

    // Smooth side normals follow the ellipse gradient (x/a², y/b²)
    let side_normal = |p: Vec2| {
        Vec3::new(p.x / (a * a), p.y / (b * b), 0.0).normalize_or_zero()
    };

    extrude(&outline, height, side_normal, false)
}

/// Generate a prism by extruding a convex outline along Z
///
/// The outline must be listed counter-clockwise when viewed from +Z.
/// Side faces get flat normals.
pub fn generate_prism<M: MeshBuilder>(outline: &[Vec2], height: f32) -> M {
    if outline.len() < 3 {
        warn!("generate_prism: outline needs at least 3 points, got {}", outline.len());
        return M::default();
    }
    let height = positive_or_clamp("generate_prism", "height", height);

    extrude(outline, height, |_| Vec3::ZERO, true)
}

/// Extrude a CCW outline between z = -height/2 and z = +height/2
///
/// With `flat_sides` each side quad gets its own face normal, otherwise
/// `side_normal` is evaluated per outline point.
fn extrude<M: MeshBuilder>(
    outline: &[Vec2],
    height: f32,
    side_normal: impl Fn(Vec2) -> Vec3,
    flat_sides: bool,
) -> M {
    let mut mesh = M::default();
    let hz = height * 0.5;
    let n = outline.len();

    // Side walls
    for i in 0..n {
        let p0 = outline[i];
        let p1 = outline[(i + 1) % n];

        let (n0, n1) = if flat_sides {
            let edge = p1 - p0;
            let face = Vec3::new(edge.y, -edge.x, 0.0).normalize_or_zero();
            (face, face)
        } else {
            (side_normal(p0), side_normal(p1))
        };

        let b0 = mesh.add_vertex(p0.extend(-hz), n0);
        let b1 = mesh.add_vertex(p1.extend(-hz), n1);
        let t1 = mesh.add_vertex(p1.extend(hz), n1);
        let t0 = mesh.add_vertex(p0.extend(hz), n0);

        mesh.add_triangle(b0, b1, t1);
        mesh.add_triangle(b0, t1, t0);
    }

    // Caps (fan from the centroid)
    let centroid = outline.iter().copied().sum::<Vec2>() / n as f32;

    let top_center = mesh.add_vertex(centroid.extend(hz), Vec3::Z);
    let top: Vec<u32> = outline
        .iter()
        .map(|p| mesh.add_vertex(p.extend(hz), Vec3::Z))
        .collect();
    for i in 0..n {
        mesh.add_triangle(top_center, top[i], top[(i + 1) % n]);
    }

    let bottom_center = mesh.add_vertex(centroid.extend(-hz), Vec3::NEG_Z);
    let bottom: Vec<u32> = outline
        .iter()
        .map(|p| mesh.add_vertex(p.extend(-hz), Vec3::NEG_Z))
        .collect();
    for i in 0..n {
        mesh.add_triangle(bottom_center, bottom[(i + 1) % n], bottom[i]);
    }

    mesh
}
