//! Error type shared by body and part generation

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while generating a body
#[derive(Error, Debug)]
pub enum GenError {
    /// Template file missing or unreadable
    #[error("failed to load template {path:?}: {source}")]
    TemplateLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Template references a slot no value was provided for
    #[error("template slot {{{0}}} has no value")]
    UnknownSlot(String),

    /// Unmatched `{` or `}` in a template
    #[error("malformed template at byte {0}: unmatched brace")]
    MalformedTemplate(usize),

    /// A part role has no generator variants to choose from
    #[error("no {0} generators configured")]
    NoGenerators(&'static str),

    /// Mesh-backed generator was given no usable OBJ sources
    #[error("no OBJ mesh sources found")]
    NoMeshSources,

    /// OBJ file could not be parsed
    #[error("failed to parse OBJ {path:?} line {line}: {message}")]
    ObjParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Filesystem failure
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// URDF fragment could not be serialized
    #[error("failed to write URDF: {0}")]
    Xml(String),

    /// Run configuration could not be parsed
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl GenError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, GenError>;
