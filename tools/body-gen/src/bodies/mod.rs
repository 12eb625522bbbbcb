//! Body assemblers
//!
//! A body combines sampled parts into one URDF description written next to
//! the part meshes.

mod hammer;

use std::path::{Path, PathBuf};

use rand::RngCore;

use crate::error::Result;

pub use hammer::{HAMMER_TEMPLATE, Hammer};

/// Extension of written description files
pub const URDF_EXTENSION: &str = "urdf";

/// Procedurally generated multi-part body
pub trait Body {
    /// Body name, also the description file stem
    fn name(&self) -> &str;

    /// Sample a new body and write its meshes and description into `path`
    ///
    /// Returns the path of the written description file.
    fn generate(&self, path: &Path, rng: &mut dyn RngCore) -> Result<PathBuf>;
}
