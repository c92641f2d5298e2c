//! Structured YAML documents
//!
//! Loading, key-path resolution, in-place mutation and block-style
//! serialization of YAML files.

pub mod loader;
pub mod patch;
pub mod path;
pub mod serialize;

use serde_yaml::Value;
use std::path::{Path, PathBuf};

pub use loader::{load_structured, load_text};
pub use patch::{get_path, set_path, SetOptions};
pub use path::{PatchTarget, Segment};
pub use serialize::{to_yaml_string, write};

/// A parsed YAML document and the file it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredDocument {
    source: PathBuf,
    root: Value,
}

impl StructuredDocument {
    /// Parse YAML text; `source` is only used for error reporting.
    ///
    /// Integers must fit in 64 bits. A larger literal such as
    /// `id: 123456789012345678901234567890` is valid YAML but fails with
    /// `PatchError::Parse`; quote it to keep it as a string.
    pub fn parse(source: impl Into<PathBuf>, content: &str) -> crate::error::Result<Self> {
        let source = source.into();
        let root = if content.trim().is_empty() {
            Value::Null
        } else {
            serde_yaml::from_str(content).map_err(|e| crate::error::PatchError::Parse {
                path: source.clone(),
                source: e,
            })?
        };
        Ok(Self { source, root })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Value {
        &mut self.root
    }

    pub fn into_root(self) -> Value {
        self.root
    }
}

/// Human-readable node kind for error messages.
pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
