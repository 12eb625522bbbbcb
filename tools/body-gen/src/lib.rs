//! Procedural rigid-body generation
//!
//! Generates synthetic two-part bodies (a handle and a head, rigidly joined)
//! for simulation datasets. Each generated body consists of one OBJ mesh per
//! part plus a URDF description referencing both.
//!
//! # Example
//! ```no_run
//! use body_gen::bodies::{Body, Hammer};
//! use rand::SeedableRng;
//! use rand_pcg::Pcg64;
//! use std::path::Path;
//!
//! // Built-in template, primitive parts
//! let hammer = Hammer::new("hammer", None, None)?;
//! let mut rng = Pcg64::seed_from_u64(42);
//!
//! // Writes out/handle.obj, out/head.obj and out/hammer.urdf
//! hammer.generate(Path::new("out"), &mut rng)?;
//! # Ok::<(), body_gen::GenError>(())
//! ```

pub mod bodies;
pub mod config;
pub mod error;
pub mod link;
pub mod mesh;
pub mod pose;
pub mod template;
pub mod transform;

pub use error::{GenError, Result};
