//! File loading

use std::fs;
use std::path::Path;

use super::StructuredDocument;
use crate::error::{PatchError, Result};

/// Read a file verbatim.
pub fn load_text(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path).map_err(|e| PatchError::from_read(path, e))?;
    tracing::debug!("Read {} bytes from {}", content.len(), path.display());
    Ok(content)
}

/// Read and parse a YAML file.
pub fn load_structured(path: &Path) -> Result<StructuredDocument> {
    let content = load_text(path)?;
    StructuredDocument::parse(path, &content)
}
