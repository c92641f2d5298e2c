//! Get command implementation

use anyhow::{Context, Result};
use clap::Args;
use serde_yaml::Value;
use std::path::PathBuf;

use manifest_patch::document::{get_path, load_structured, PatchTarget};

#[derive(Args)]
pub struct GetArgs {
    /// YAML file to read
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Key path to resolve
    #[arg(value_name = "KEY_PATH")]
    pub key_path: PatchTarget,
}

pub fn run(args: GetArgs) -> Result<()> {
    let doc = load_structured(&args.file)?;
    let Some(value) = get_path(&doc, &args.key_path) else {
        anyhow::bail!("Key path '{}' not found in {}", args.key_path, args.file.display());
    };

    // Strings print raw so injected payloads can be diffed against their source.
    match value {
        Value::String(text) => {
            print!("{}", text);
            if !text.ends_with('\n') {
                println!();
            }
        }
        other => {
            let rendered = serde_yaml::to_string(other).context("Failed to render value")?;
            print!("{}", rendered);
        }
    }
    Ok(())
}
