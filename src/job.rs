//! Patch jobs
//!
//! A job injects the raw text of one file into a key of a YAML document and
//! writes the document back. Every read happens before the write, so a
//! failed job never leaves a partially written target.

use serde_yaml::Value;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::document::{load_structured, load_text, set_path, to_yaml_string, write};
use crate::document::{PatchTarget, SetOptions};
use crate::error::{PatchError, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Compute the patched document but leave the target file untouched.
    pub dry_run: bool,
    pub set: SetOptions,
}

/// Result of a single job run.
#[derive(Debug, Clone)]
pub struct PatchOutcome {
    pub target: PathBuf,
    pub key_path: PatchTarget,
    /// Whether the value at `key_path` differs from what was there before.
    pub changed: bool,
    pub written: bool,
    /// The serialized document as written (or as it would be written).
    pub rendered: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchJob {
    /// File whose raw text becomes the new value
    pub payload: PathBuf,
    /// YAML document to patch in place
    pub target: PathBuf,
    pub key_path: PatchTarget,
}

impl PatchJob {
    pub fn new(
        payload: impl Into<PathBuf>,
        target: impl Into<PathBuf>,
        key_path: PatchTarget,
    ) -> Self {
        Self { payload: payload.into(), target: target.into(), key_path }
    }

    /// Engine config from `config_dir` into the ConfigMap.
    ///
    /// `config_dir` must be an existing directory.
    pub fn configmap(settings: &Settings, config_dir: &Path) -> Result<Self> {
        if !config_dir.is_dir() {
            return Err(PatchError::Argument(format!(
                "config directory does not exist: {}",
                config_dir.display()
            )));
        }
        Ok(Self::new(
            config_dir.join(&settings.config_file_name),
            &settings.configmap,
            settings.configmap_target()?,
        ))
    }

    /// Load-test engine config into the ConfigMap.
    pub fn load_test(settings: &Settings) -> Result<Self> {
        Ok(Self::new(&settings.load_test_config, &settings.configmap, settings.configmap_target()?))
    }

    /// Kustomize output into the first Argo workflow template.
    pub fn resource(settings: &Settings) -> Result<Self> {
        Ok(Self::new(&settings.kustomized, &settings.argo_manifest, settings.argo_target()?))
    }

    pub fn run(&self, opts: RunOptions) -> Result<PatchOutcome> {
        let payload = load_text(&self.payload)?;
        let mut doc = load_structured(&self.target)?;

        let new_value = Value::String(payload);
        let previous = set_path(&mut doc, &self.key_path, new_value.clone(), opts.set)?;
        let changed = previous.as_ref() != Some(&new_value);

        let rendered = to_yaml_string(&doc)?;
        if !opts.dry_run {
            write(&doc, &self.target)?;
        }

        tracing::info!(
            target_file = %self.target.display(),
            key = %self.key_path,
            changed,
            dry_run = opts.dry_run,
            "Patched {} from {}",
            self.target.display(),
            self.payload.display()
        );

        Ok(PatchOutcome {
            target: self.target.clone(),
            key_path: self.key_path.clone(),
            changed,
            written: !opts.dry_run,
            rendered,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn settings_in(root: &Path) -> Settings {
        let defaults = Settings::default();
        Settings {
            configmap: root.join(&defaults.configmap),
            load_test_config: root.join(&defaults.load_test_config),
            argo_manifest: root.join(&defaults.argo_manifest),
            kustomized: root.join(&defaults.kustomized),
            ..defaults
        }
    }

    fn write_file(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdir");
        }
        fs::write(path, content).expect("write");
    }

    #[test]
    fn test_configmap_job_injects_config() {
        let tmp = TempDir::new().expect("tmp");
        let settings = settings_in(tmp.path());
        let config_dir = tmp.path().join("conf");
        write_file(&config_dir.join("config.yaml"), "foo: bar\n");
        write_file(&settings.configmap, "kind: ConfigMap\ndata:\n  config.yaml: old\n");

        let job = PatchJob::configmap(&settings, &config_dir).expect("job");
        let outcome = job.run(RunOptions::default()).expect("run");
        assert!(outcome.changed);
        assert!(outcome.written);

        let doc = load_structured(&settings.configmap).expect("reload");
        assert_eq!(doc.root()["data"]["config.yaml"], Value::String("foo: bar\n".into()));
        assert_eq!(doc.root()["kind"], Value::String("ConfigMap".into()));
    }

    #[test]
    fn test_configmap_job_requires_existing_dir() {
        let tmp = TempDir::new().expect("tmp");
        let settings = settings_in(tmp.path());
        let err = PatchJob::configmap(&settings, &tmp.path().join("missing")).expect_err("no dir");
        assert!(matches!(err, PatchError::Argument(_)));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_missing_payload_leaves_target_untouched() {
        let tmp = TempDir::new().expect("tmp");
        let settings = settings_in(tmp.path());
        let config_dir = tmp.path().join("conf");
        fs::create_dir_all(&config_dir).expect("mkdir");
        let original = "data:\n  config.yaml: old\n";
        write_file(&settings.configmap, original);

        let job = PatchJob::configmap(&settings, &config_dir).expect("job");
        let err = job.run(RunOptions::default()).expect_err("missing config.yaml");
        assert!(matches!(err, PatchError::NotFound(_)));
        assert_eq!(fs::read_to_string(&settings.configmap).expect("read"), original);
    }

    #[test]
    fn test_resource_job_patches_first_template() {
        let tmp = TempDir::new().expect("tmp");
        let settings = settings_in(tmp.path());
        write_file(&settings.kustomized, "kind: List\n");
        write_file(
            &settings.argo_manifest,
            concat!(
                "kind: Workflow\n",
                "spec:\n",
                "  templates:\n",
                "  - name: deploy\n",
                "    resource:\n",
                "      manifest: old-manifest\n",
            ),
        );

        PatchJob::resource(&settings).expect("job").run(RunOptions::default()).expect("run");

        let doc = load_structured(&settings.argo_manifest).expect("reload");
        assert_eq!(
            doc.root()["spec"]["templates"][0]["resource"]["manifest"],
            Value::String("kind: List\n".into())
        );
        assert_eq!(doc.root()["spec"]["templates"][0]["name"], Value::String("deploy".into()));
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let tmp = TempDir::new().expect("tmp");
        let settings = settings_in(tmp.path());
        write_file(&settings.load_test_config, "services:\n  api: true\n");
        write_file(&settings.configmap, "data:\n  config.yaml: old\n");

        let job = PatchJob::load_test(&settings).expect("job");
        job.run(RunOptions::default()).expect("first run");
        let first = fs::read_to_string(&settings.configmap).expect("read");
        let outcome = job.run(RunOptions::default()).expect("second run");
        let second = fs::read_to_string(&settings.configmap).expect("read");

        assert!(!outcome.changed);
        assert_eq!(first, second);
    }

    #[test]
    fn test_dry_run_does_not_write() {
        let tmp = TempDir::new().expect("tmp");
        let settings = settings_in(tmp.path());
        write_file(&settings.kustomized, "kind: List\n");
        let original = "spec:\n  templates:\n  - resource:\n      manifest: old\n";
        write_file(&settings.argo_manifest, original);

        let opts = RunOptions { dry_run: true, ..RunOptions::default() };
        let outcome = PatchJob::resource(&settings).expect("job").run(opts).expect("run");

        assert!(!outcome.written);
        assert!(outcome.rendered.contains("kind: List"));
        assert_eq!(fs::read_to_string(&settings.argo_manifest).expect("read"), original);
    }

    #[test]
    fn test_path_error_leaves_target_untouched() {
        let tmp = TempDir::new().expect("tmp");
        let settings = settings_in(tmp.path());
        write_file(&settings.kustomized, "kind: List\n");
        let original = "spec:\n  templates: []\n";
        write_file(&settings.argo_manifest, original);

        let job = PatchJob::resource(&settings).expect("job");
        let err = job.run(RunOptions::default()).expect_err("empty templates");
        assert!(matches!(err, PatchError::Path(_)));
        assert_eq!(fs::read_to_string(&settings.argo_manifest).expect("read"), original);
    }
}
