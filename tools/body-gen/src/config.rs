//! Sampling ranges and run configuration
//!
//! `LinkConfig` holds the ranges a part generator samples from. The handle and
//! head defaults live in `HANDLE_CONFIG` / `HEAD_CONFIG`; a TOML `RunConfig`
//! can override either of them.

use std::path::{Path, PathBuf};

use rand::{Rng, RngCore};
use serde::Deserialize;

use crate::error::{GenError, Result};

/// Inclusive `[low, high]` range
pub type Range = [f64; 2];

pub const LATERAL_FRICTION_RANGE: Range = [0.2, 1.0];
pub const SPINNING_FRICTION_RANGE: Range = [0.2, 1.0];
pub const INERTIA_FRICTION_RANGE: Range = [0.2, 1.0];

/// Sampling ranges for a single part
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkConfig {
    pub mass_range: Range,
    /// Per-axis size ranges, x then y then z
    pub size_range: [Range; 3],
    pub lateral_friction_range: Range,
    pub spinning_friction_range: Range,
    pub inertia_friction_range: Range,
}

pub const HANDLE_CONFIG: LinkConfig = LinkConfig {
    mass_range: [0.5, 1.0],
    size_range: [[0.1, 0.1], [0.2, 0.2], [1.0, 1.0]],
    lateral_friction_range: LATERAL_FRICTION_RANGE,
    spinning_friction_range: SPINNING_FRICTION_RANGE,
    inertia_friction_range: INERTIA_FRICTION_RANGE,
};

pub const HEAD_CONFIG: LinkConfig = LinkConfig {
    mass_range: [0.5, 1.0],
    size_range: [[0.1, 0.1], [0.2, 0.2], [1.0, 1.0]],
    lateral_friction_range: LATERAL_FRICTION_RANGE,
    spinning_friction_range: SPINNING_FRICTION_RANGE,
    inertia_friction_range: INERTIA_FRICTION_RANGE,
};

/// Uniform sample from `[low, high]`; a degenerate range yields `low`
pub fn sample_range(rng: &mut dyn RngCore, range: Range) -> f64 {
    let [low, high] = range;
    if high <= low {
        low
    } else {
        rng.random_range(low..=high)
    }
}

fn default_name() -> String {
    "hammer".to_string()
}

fn default_count() -> usize {
    1
}

fn default_handle() -> LinkConfig {
    HANDLE_CONFIG
}

fn default_head() -> LinkConfig {
    HEAD_CONFIG
}

/// Batch generation settings, usually read from a TOML file
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Body name, also the URDF file stem
    #[serde(default = "default_name")]
    pub name: String,

    /// Description template path; the built-in hammer template when absent
    #[serde(default)]
    pub template: Option<PathBuf>,

    /// OBJ files or directories to sample parts from.
    /// When absent, primitive shapes are generated instead.
    #[serde(default)]
    pub mesh_sources: Option<Vec<PathBuf>>,

    /// Number of bodies to generate
    #[serde(default = "default_count")]
    pub count: usize,

    /// Seed for the random source; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default = "default_handle")]
    pub handle: LinkConfig,

    #[serde(default = "default_head")]
    pub head: LinkConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            template: None,
            mesh_sources: None,
            count: default_count(),
            seed: None,
            handle: HANDLE_CONFIG,
            head: HEAD_CONFIG,
        }
    }
}

impl RunConfig {
    /// Load configuration from file
    ///
    /// Relative `template` and `mesh_sources` paths are taken relative to the
    /// directory holding the file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
        let mut config = Self::parse(&content)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    /// Parse configuration from string
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        if let Some(template) = &mut self.template {
            resolve(template);
        }
        for source in self.mesh_sources.iter_mut().flatten() {
            resolve(source);
        }
    }
}
