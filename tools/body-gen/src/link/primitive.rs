//! Procedural primitive part generators

use std::f64::consts::TAU;
use std::path::Path;

use glam::Vec2;
use rand::{Rng, RngCore};
use tracing::debug;

use super::{LinkGenerator, PartData, box_inertia, elliptic_cylinder_inertia};
use crate::config::LinkConfig;
use crate::error::Result;
use crate::mesh::{
    CYLINDER_SEGMENTS, UnpackedMesh, generate_box, generate_elliptic_cylinder, generate_prism,
};

/// Fewest sides a polygon part can have
pub const POLYGON_MIN_SIDES: usize = 3;
/// Most sides a polygon part can have
pub const POLYGON_MAX_SIDES: usize = 8;

/// Box-shaped part
#[derive(Clone, Debug)]
pub struct CubeLink {
    name: String,
    config: LinkConfig,
}

impl CubeLink {
    pub fn new(name: impl Into<String>, config: LinkConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }
}

impl LinkGenerator for CubeLink {
    fn name(&self) -> &str {
        &self.name
    }

    fn generate(&self, path: &Path, rng: &mut dyn RngCore) -> Result<PartData> {
        let data = PartData::sample(&self.name, &self.config, rng);
        let size = data.size.as_vec3();

        let mesh: UnpackedMesh = generate_box(size.x, size.y, size.z);
        data.write_mesh(path, &mesh)?;

        debug!("cube link {:?}: size={:?} mass={:.3}", data.name, data.size, data.mass);
        Ok(data)
    }
}

/// Cylinder part with an elliptic cross-section, axis along Z
#[derive(Clone, Debug)]
pub struct CylinderLink {
    name: String,
    config: LinkConfig,
}

impl CylinderLink {
    pub fn new(name: impl Into<String>, config: LinkConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }
}

impl LinkGenerator for CylinderLink {
    fn name(&self) -> &str {
        &self.name
    }

    fn generate(&self, path: &Path, rng: &mut dyn RngCore) -> Result<PartData> {
        let mut data = PartData::sample(&self.name, &self.config, rng);
        data.inertia = elliptic_cylinder_inertia(data.mass, data.size);
        let size = data.size.as_vec3();

        let mesh: UnpackedMesh =
            generate_elliptic_cylinder(size.x, size.y, size.z, CYLINDER_SEGMENTS);
        data.write_mesh(path, &mesh)?;

        debug!("cylinder link {:?}: size={:?} mass={:.3}", data.name, data.size, data.mass);
        Ok(data)
    }
}

/// Extruded convex polygon part
///
/// The outline has a random number of sides in
/// `[POLYGON_MIN_SIDES, POLYGON_MAX_SIDES]` with vertices at random angles on
/// the ellipse inscribed in the sampled `size_x * size_y` footprint.
#[derive(Clone, Debug)]
pub struct PolygonLink {
    name: String,
    config: LinkConfig,
}

impl PolygonLink {
    pub fn new(name: impl Into<String>, config: LinkConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }
}

/// Random convex outline on an ellipse, counter-clockwise
fn sample_outline(rng: &mut dyn RngCore, semi_x: f64, semi_y: f64) -> Vec<Vec2> {
    let sides = rng.random_range(POLYGON_MIN_SIDES..=POLYGON_MAX_SIDES);

    // Jitter evenly spaced angles within their sector so the polygon never
    // collapses and stays sorted
    let sector = TAU / sides as f64;
    (0..sides)
        .map(|i| {
            let theta = sector * (i as f64 + rng.random_range(0.0..0.9));
            Vec2::new((semi_x * theta.cos()) as f32, (semi_y * theta.sin()) as f32)
        })
        .collect()
}

impl LinkGenerator for PolygonLink {
    fn name(&self) -> &str {
        &self.name
    }

    fn generate(&self, path: &Path, rng: &mut dyn RngCore) -> Result<PartData> {
        let mut data = PartData::sample(&self.name, &self.config, rng);
        let outline = sample_outline(rng, data.size.x * 0.5, data.size.y * 0.5);

        let mut mesh: UnpackedMesh = generate_prism(&outline, data.size.z as f32);

        // Record the real footprint and keep the part centered on its bounds
        if let Some((min, max)) = mesh.bounds() {
            let center = (min + max) * 0.5;
            mesh.translate_scale(-center, glam::Vec3::ONE);
            data.size = (max - min).as_dvec3();
        }
        data.inertia = box_inertia(data.mass, data.size);
        data.write_mesh(path, &mesh)?;

        debug!(
            "polygon link {:?}: {} sides size={:?} mass={:.3}",
            data.name,
            outline.len(),
            data.size,
            data.mass
        );
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HEAD_CONFIG;
    use crate::link::MIN_PART_SIZE;
    use crate::mesh::read_obj;
    use glam::Vec3;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;
    use tempfile::tempdir;

    fn config() -> LinkConfig {
        LinkConfig {
            size_range: [[0.1, 0.3], [0.2, 0.4], [0.5, 1.0]],
            ..HEAD_CONFIG
        }
    }

    fn read_extent(dir: &Path, data: &PartData) -> Vec3 {
        read_obj(&data.mesh_path(dir)).unwrap().extent()
    }

    #[test]
    fn test_cube_mesh_matches_size() {
        let dir = tempdir().unwrap();
        let mut rng = Pcg64::seed_from_u64(11);
        let link = CubeLink::new("head", config());

        let data = link.generate(dir.path(), &mut rng).unwrap();
        assert_eq!(link.name(), "head");
        assert!(read_extent(dir.path(), &data).abs_diff_eq(data.size.as_vec3(), 1e-5));
        assert_eq!(data.inertia, box_inertia(data.mass, data.size));
    }

    #[test]
    fn test_cylinder_mesh_matches_size() {
        let dir = tempdir().unwrap();
        let mut rng = Pcg64::seed_from_u64(12);
        let link = CylinderLink::new("handle", config());

        let data = link.generate(dir.path(), &mut rng).unwrap();
        assert!(read_extent(dir.path(), &data).abs_diff_eq(data.size.as_vec3(), 1e-5));
        assert_eq!(data.inertia, elliptic_cylinder_inertia(data.mass, data.size));
    }

    #[test]
    fn test_polygon_fits_footprint() {
        let dir = tempdir().unwrap();
        let mut rng = Pcg64::seed_from_u64(13);
        let link = PolygonLink::new("head", config());

        for _ in 0..20 {
            let data = link.generate(dir.path(), &mut rng).unwrap();
            let extent = read_extent(dir.path(), &data);
            assert!(extent.abs_diff_eq(data.size.as_vec3(), 1e-5));
            assert!(data.size.x <= 0.3 + 1e-6 && data.size.y <= 0.4 + 1e-6);
            assert!((0.5..=1.0).contains(&data.size.z));

            let (min, max) = read_obj(&data.mesh_path(dir.path())).unwrap().bounds().unwrap();
            assert!((min + max).abs_diff_eq(Vec3::ZERO, 1e-5));
        }
    }

    #[test]
    fn test_outline_is_convex_ccw() {
        let mut rng = Pcg64::seed_from_u64(14);
        for _ in 0..50 {
            let outline = sample_outline(&mut rng, 0.5, 0.25);
            let n = outline.len();
            assert!((POLYGON_MIN_SIDES..=POLYGON_MAX_SIDES).contains(&n));
            for i in 0..n {
                let a = outline[i];
                let b = outline[(i + 1) % n];
                let c = outline[(i + 2) % n];
                assert!((b - a).perp_dot(c - b) > 0.0, "reflex corner in {outline:?}");
            }
        }
    }

    #[test]
    fn test_degenerate_size_matches_mesh() {
        let dir = tempdir().unwrap();
        let mut rng = Pcg64::seed_from_u64(16);
        let flat = LinkConfig {
            size_range: [[0.0, 0.0], [-0.2, -0.1], [0.5, 0.5]],
            ..HEAD_CONFIG
        };

        let data = CubeLink::new("head", flat).generate(dir.path(), &mut rng).unwrap();
        assert_eq!(data.size.x, MIN_PART_SIZE);
        assert_eq!(data.size.y, MIN_PART_SIZE);
        assert!(read_extent(dir.path(), &data).abs_diff_eq(data.size.as_vec3(), 1e-6));
        assert_eq!(data.inertia, box_inertia(data.mass, data.size));
    }

    #[test]
    fn test_unwritable_directory_fails() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let mut rng = Pcg64::seed_from_u64(15);

        let err = CubeLink::new("head", config())
            .generate(&missing, &mut rng)
            .unwrap_err();
        assert!(matches!(err, crate::error::GenError::Io { .. }));
    }
}
