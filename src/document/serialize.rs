//! Block-style serialization and file output

use std::fs;
use std::path::Path;

use super::StructuredDocument;
use crate::error::{PatchError, Result};

/// Serialize the document in block style.
///
/// Mapping key order is preserved; multi-line strings are emitted as
/// literal block scalars.
pub fn to_yaml_string(doc: &StructuredDocument) -> Result<String> {
    serde_yaml::to_string(doc.root()).map_err(PatchError::Serialize)
}

/// Overwrite `path` with the serialized document.
pub fn write(doc: &StructuredDocument, path: &Path) -> Result<()> {
    let rendered = to_yaml_string(doc)?;
    fs::write(path, rendered.as_bytes())
        .map_err(|e| PatchError::Io { path: path.to_path_buf(), source: e })?;
    tracing::debug!("Wrote {} bytes to {}", rendered.len(), path.display());
    Ok(())
}
