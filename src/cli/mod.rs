//! Command-line interface for manifest-patch
//!
//! One subcommand per pipeline step (`configmap`, `load-test`, `resource`)
//! plus generic `set`/`get` for arbitrary documents.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod get;
mod patch;
mod utils;

/// Inject raw config files into keys of YAML manifests
#[derive(Parser)]
#[command(name = "manifest-patch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file (manifest-patch.toml or manifest-patch.yaml)
    #[arg(short = 'c', long = "config", global = true, value_name = "FILE")]
    settings: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Inject <CONFIG_DIR>/config.yaml into the engine ConfigMap
    Configmap(patch::ConfigmapArgs),

    /// Inject the load-test engine config into the engine ConfigMap
    LoadTest(patch::JobArgs),

    /// Inject the kustomize output into the Argo workflow manifest
    Resource(patch::JobArgs),

    /// Set a key in any YAML file to the raw contents of another file
    Set(patch::SetArgs),

    /// Print the value at a key path
    Get(get::GetArgs),

    /// Print the effective settings as TOML
    Settings,

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run() -> Result<()> {
    // Usage errors exit with status 1; --help and --version exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            std::process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let default_level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let filter =
        EnvFilter::builder().with_default_directive(default_level.into()).from_env_lossy();
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let settings_path = cli.settings.as_deref();
    match cli.command {
        Commands::Configmap(args) => patch::run_configmap(args, settings_path),
        Commands::LoadTest(args) => patch::run_load_test(args, settings_path),
        Commands::Resource(args) => patch::run_resource(args, settings_path),
        Commands::Set(args) => patch::run_set(args),
        Commands::Get(args) => get::run(args),
        Commands::Settings => utils::print_settings(settings_path),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "manifest-patch",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}
