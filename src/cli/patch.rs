//! Patch command implementations

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use super::utils::{report, resolve_settings};
use manifest_patch::document::{PatchTarget, SetOptions};
use manifest_patch::job::{PatchJob, RunOptions};

#[derive(Args)]
pub struct JobArgs {
    /// Print the patched document instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

impl JobArgs {
    fn options(&self) -> RunOptions {
        RunOptions { dry_run: self.dry_run, ..RunOptions::default() }
    }
}

#[derive(Args)]
pub struct ConfigmapArgs {
    /// Commit under test (recorded in logs only)
    #[arg(value_name = "COMMIT_SHA")]
    pub commit_sha: String,

    /// Directory containing the engine config.yaml
    #[arg(value_name = "CONFIG_DIR")]
    pub config_dir: PathBuf,

    #[command(flatten)]
    pub job: JobArgs,
}

#[derive(Args)]
pub struct SetArgs {
    /// YAML file to patch in place
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Key path, e.g. 'data.config\.yaml' or 'spec.templates[0].resource.manifest'
    #[arg(value_name = "KEY_PATH")]
    pub key_path: PatchTarget,

    /// File whose raw contents become the new value
    #[arg(long, value_name = "PAYLOAD")]
    pub from: PathBuf,

    /// Create missing intermediate mappings and sequences
    #[arg(long)]
    pub create_missing: bool,

    #[command(flatten)]
    pub job: JobArgs,
}

pub fn run_configmap(args: ConfigmapArgs, settings_path: Option<&Path>) -> Result<()> {
    let settings = resolve_settings(settings_path)?;
    tracing::info!(
        commit = %args.commit_sha,
        "Injecting engine config from {}",
        args.config_dir.display()
    );
    let job = PatchJob::configmap(&settings, &args.config_dir)?;
    execute(&job, args.job.options())
}

pub fn run_load_test(args: JobArgs, settings_path: Option<&Path>) -> Result<()> {
    let settings = resolve_settings(settings_path)?;
    let job = PatchJob::load_test(&settings)?;
    execute(&job, args.options())
}

pub fn run_resource(args: JobArgs, settings_path: Option<&Path>) -> Result<()> {
    let settings = resolve_settings(settings_path)?;
    let job = PatchJob::resource(&settings)?;
    execute(&job, args.options())
}

pub fn run_set(args: SetArgs) -> Result<()> {
    let job = PatchJob::new(args.from, args.file, args.key_path);
    let mut opts = args.job.options();
    opts.set = SetOptions { create_missing: args.create_missing };
    execute(&job, opts)
}

fn execute(job: &PatchJob, opts: RunOptions) -> Result<()> {
    let outcome = job.run(opts).with_context(|| {
        format!("Failed to patch {} at '{}'", job.target.display(), job.key_path)
    })?;
    report(&outcome);
    Ok(())
}
