//! Settings loading and layering
//!
//! File locations and key paths for each patch job. Layered with
//! precedence Env > Settings file > Defaults.

pub mod loader;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::document::PatchTarget;
use crate::error::PathError;

pub use loader::{load_settings, ENV_PREFIX};

/// Where each job reads its payload and which document/key it patches.
///
/// Relative paths resolve against the working directory of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// ConfigMap manifest receiving the engine config
    pub configmap: PathBuf,
    /// Key path inside the ConfigMap
    pub configmap_key: String,
    /// Engine config used by the `load-test` job
    pub load_test_config: PathBuf,
    /// Name of the engine config inside a `configmap` job's config directory
    pub config_file_name: String,
    /// Argo workflow manifest
    pub argo_manifest: PathBuf,
    /// Key path inside the Argo manifest
    pub argo_key: String,
    /// Rendered kustomize output injected into the Argo manifest
    pub kustomized: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            configmap: PathBuf::from("ship_kustomize/overlays/ship/engine_configmap.yaml"),
            configmap_key: r"data.config\.yaml".to_string(),
            load_test_config: PathBuf::from("load_test/config.yaml"),
            config_file_name: "config.yaml".to_string(),
            argo_manifest: PathBuf::from("argo.yaml"),
            argo_key: "spec.templates[0].resource.manifest".to_string(),
            kustomized: PathBuf::from("kustomized.yaml"),
        }
    }
}

impl Settings {
    pub fn configmap_target(&self) -> Result<PatchTarget, PathError> {
        PatchTarget::parse(&self.configmap_key)
    }

    pub fn argo_target(&self) -> Result<PatchTarget, PathError> {
        PatchTarget::parse(&self.argo_key)
    }
}
