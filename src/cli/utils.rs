//! Shared CLI utilities.

use anyhow::{Context, Result};
use std::path::Path;

use manifest_patch::config::{load_settings, Settings};
use manifest_patch::job::PatchOutcome;

/// Resolve settings against the current working directory.
pub fn resolve_settings(settings_path: Option<&Path>) -> Result<Settings> {
    let work_dir = std::env::current_dir().context("Failed to determine working directory")?;
    load_settings(&work_dir, settings_path)
}

/// Emit the rendered document on a dry run; stay quiet otherwise.
pub fn report(outcome: &PatchOutcome) {
    if !outcome.written {
        print!("{}", outcome.rendered);
    } else if !outcome.changed {
        tracing::info!("{} already up to date at {}", outcome.target.display(), outcome.key_path);
    }
}

pub fn print_settings(settings_path: Option<&Path>) -> Result<()> {
    let settings = resolve_settings(settings_path)?;
    let rendered = toml::to_string_pretty(&settings).context("Failed to render settings")?;
    print!("{}", rendered);
    Ok(())
}
