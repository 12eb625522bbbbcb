//! Part generator backed by existing OBJ meshes

use std::path::{Path, PathBuf};

use glam::{DVec3, Vec3};
use rand::RngCore;
use rand::seq::IndexedRandom;
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::{LinkGenerator, PartData, box_inertia};
use crate::config::LinkConfig;
use crate::error::{GenError, Result};
use crate::mesh::read_obj;

/// Extents below this are treated as flat and left unscaled
const MIN_EXTENT: f32 = 1e-6;

/// Expand files and directories into the list of OBJ files they name
///
/// Directories are walked recursively in file-name order. Plain files are
/// kept as given, whatever their extension.
pub fn collect_obj_paths(sources: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for source in sources {
        if !source.is_dir() {
            paths.push(source.clone());
            continue;
        }

        for entry in WalkDir::new(source).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(source).to_path_buf();
                GenError::io(&path, e.into())
            })?;
            let is_obj = entry
                .path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("obj"));
            if entry.file_type().is_file() && is_obj {
                paths.push(entry.into_path());
            }
        }
    }

    Ok(paths)
}

/// Part sampled from a set of OBJ files
///
/// The chosen mesh is recentered on its bounding box and rescaled per axis so
/// its bounds match the sampled size.
#[derive(Clone, Debug)]
pub struct MeshLink {
    name: String,
    config: LinkConfig,
    sources: Vec<PathBuf>,
}

impl MeshLink {
    /// Create a generator from OBJ files and/or directories containing them
    pub fn new(name: impl Into<String>, sources: &[PathBuf], config: LinkConfig) -> Result<Self> {
        let sources = collect_obj_paths(sources)?;
        if sources.is_empty() {
            return Err(GenError::NoMeshSources);
        }

        Ok(Self {
            name: name.into(),
            config,
            sources,
        })
    }

    /// OBJ files this generator samples from
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }
}

impl LinkGenerator for MeshLink {
    fn name(&self) -> &str {
        &self.name
    }

    fn generate(&self, path: &Path, rng: &mut dyn RngCore) -> Result<PartData> {
        let source = self.sources.choose(rng).ok_or(GenError::NoMeshSources)?;
        let mut data = PartData::sample(&self.name, &self.config, rng);
        let mut mesh = read_obj(source)?;

        match mesh.bounds() {
            Some((min, max)) => {
                let extent = max - min;
                let target = data.size.as_vec3();
                let scale = Vec3::select(
                    extent.cmpgt(Vec3::splat(MIN_EXTENT)),
                    target / extent,
                    Vec3::ONE,
                );
                mesh.translate_scale(-(min + max) * 0.5, scale);

                // Flat axes keep their real (near zero) extent
                let scaled = mesh.extent().as_dvec3();
                let flat = extent.cmple(Vec3::splat(MIN_EXTENT));
                data.size = DVec3::select(flat, scaled, data.size);
            }
            None => warn!("mesh source {:?} has no vertices", source),
        }

        data.inertia = box_inertia(data.mass, data.size);
        data.write_mesh(path, &mesh)?;

        debug!("mesh link {:?}: source={:?} size={:?}", data.name, source, data.size);
        Ok(data)
    }
}
