//! manifest-patch library
//!
//! Load a YAML document, replace the value at one key path with the raw text
//! of another file, and write the document back in block style.

pub mod config;
pub mod document;
pub mod error;
pub mod job;
pub mod model;

pub use document::{PatchTarget, StructuredDocument};
pub use error::{PatchError, PathError};
pub use job::{PatchJob, PatchOutcome, RunOptions};
