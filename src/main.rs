//! manifest-patch: Inject raw config files into YAML manifests
//!
//! Used by end-to-end test pipelines to place an engine config into a
//! Kubernetes ConfigMap and a kustomize build into an Argo workflow.

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
