//! Mesh generation and OBJ export
//!
//! Parts are written as plain triangle meshes. Positions and normals are kept
//! in full-precision f32 so the exported OBJ matches the sampled sizes.

mod obj;
mod primitives;

use glam::Vec3;

pub use obj::{read_obj, write_obj};
pub use primitives::{
    CYLINDER_SEGMENTS, generate_box, generate_elliptic_cylinder, generate_prism,
};

/// Trait for mesh construction
pub trait MeshBuilder: Default {
    /// Add a vertex with position and normal, returning its index
    fn add_vertex(&mut self, position: Vec3, normal: Vec3) -> u32;

    /// Add a triangle using three vertex indices
    fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32);
}

/// Unpacked triangle mesh
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UnpackedMesh {
    /// Vertex positions as [x, y, z]
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals as [x, y, z] (empty when the source had none)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices
    pub indices: Vec<u32>,
}

impl UnpackedMesh {
    /// Create empty unpacked mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds as (min, max), `None` for an empty mesh
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut iter = self.positions.iter().map(|p| Vec3::from_array(*p));
        let first = iter.next()?;
        Some(iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }

    /// Bounding box extent along each axis
    pub fn extent(&self) -> Vec3 {
        self.bounds()
            .map(|(min, max)| max - min)
            .unwrap_or(Vec3::ZERO)
    }

    /// Translate then scale every vertex: `p' = (p + offset) * scale`
    ///
    /// Normals are rescaled with the inverse scale and renormalized.
    pub fn translate_scale(&mut self, offset: Vec3, scale: Vec3) {
        for pos in &mut self.positions {
            *pos = ((Vec3::from_array(*pos) + offset) * scale).to_array();
        }

        let inv_scale = scale.recip();
        for normal in &mut self.normals {
            *normal = (Vec3::from_array(*normal) * inv_scale)
                .normalize_or_zero()
                .to_array();
        }
    }
}

impl MeshBuilder for UnpackedMesh {
    fn add_vertex(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position.to_array());
        self.normals.push(normal.to_array());
        index
    }

    fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.push(i0);
        self.indices.push(i1);
        self.indices.push(i2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bounds() {
        let mesh = UnpackedMesh::new();
        assert!(mesh.bounds().is_none());
        assert_eq!(mesh.extent(), Vec3::ZERO);
    }

    #[test]
    fn test_translate_scale() {
        let mut mesh: UnpackedMesh = generate_box(2.0, 2.0, 2.0);
        mesh.translate_scale(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.5, 1.0, 2.0));

        let (min, max) = mesh.bounds().unwrap();
        assert!(min.abs_diff_eq(Vec3::new(0.0, -1.0, -2.0), 1e-6));
        assert!(max.abs_diff_eq(Vec3::new(1.0, 1.0, 2.0), 1e-6));

        for n in &mesh.normals {
            assert!((Vec3::from_array(*n).length() - 1.0).abs() < 1e-5);
        }
    }
}
