//! Error types for loading, patching and writing documents

use std::path::PathBuf;

/// Failures raised while resolving a key path against a document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("invalid key path '{path}': {reason}")]
    Syntax { path: String, reason: String },

    #[error("key '{key}' not found at '{at}'")]
    MissingKey { at: String, key: String },

    #[error("index {index} out of range at '{at}' (length {len})")]
    IndexOutOfRange { at: String, index: usize, len: usize },

    #[error("cannot index into {found} at '{at}' with {segment}")]
    NotIndexable { at: String, found: &'static str, segment: String },
}

/// Patch related errors
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    #[error("{0}")]
    Argument(String),

    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Malformed YAML, or well-formed YAML holding a value `serde_yaml`
    /// cannot represent (such as an integer wider than 64 bits).
    #[error("cannot load YAML from {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Path(#[from] PathError),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize document: {0}")]
    Serialize(#[source] serde_yaml::Error),
}

impl PatchError {
    /// Map a read failure to `NotFound` when the file is missing, `Io` otherwise.
    pub fn from_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            PatchError::NotFound(path)
        } else {
            PatchError::Io { path, source }
        }
    }
}

pub type Result<T, E = PatchError> = std::result::Result<T, E>;
