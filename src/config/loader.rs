//! Settings file discovery and layering

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Toml, Yaml};
use figment::Figment;
use std::path::{Path, PathBuf};

use super::Settings;

/// Environment variables with this prefix override file and default values,
/// e.g. `MANIFEST_PATCH_CONFIGMAP=cm.yaml`.
pub const ENV_PREFIX: &str = "MANIFEST_PATCH_";

pub fn load_settings(work_dir: &Path, settings_path: Option<&Path>) -> Result<Settings> {
    let settings_path_provided = settings_path.is_some();

    let discovered = match settings_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_settings(work_dir),
    };

    let defaults = Figment::from(Serialized::defaults(Settings::default()));
    let env = Env::prefixed(ENV_PREFIX);

    let Some(settings_file) = discovered else {
        return extract(defaults.merge(env));
    };

    if settings_path_provided && !settings_file.is_file() {
        anyhow::bail!("Settings file not found: {}", settings_file.display());
    }

    let ext =
        settings_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();

    let layered = match ext.as_str() {
        "toml" => defaults.clone().merge(Toml::file(&settings_file)),
        "yaml" | "yml" => defaults.clone().merge(Yaml::file(&settings_file)),
        other => {
            let err = anyhow::anyhow!(
                "Unsupported settings extension '.{}' for file {}",
                other,
                settings_file.display()
            );
            if settings_path_provided {
                return Err(err);
            }
            tracing::warn!("{}", err);
            return extract(defaults.merge(env));
        }
    };

    match layered.merge(env.clone()).extract::<Settings>() {
        Ok(settings) => {
            tracing::debug!("Loaded settings from {}", settings_file.display());
            Ok(settings)
        }
        Err(e) if settings_path_provided => Err(anyhow::Error::new(e)
            .context(format!("Invalid settings file: {}", settings_file.display()))),
        Err(e) => {
            // Auto-discovered: warn and keep going with defaults
            tracing::warn!(
                "Failed to parse auto-discovered settings {}: {}",
                settings_file.display(),
                e
            );
            extract(defaults.merge(env))
        }
    }
}

fn extract(figment: Figment) -> Result<Settings> {
    figment.extract().context("Invalid settings in environment")
}

fn discover_settings(work_dir: &Path) -> Option<PathBuf> {
    let candidates = [
        "manifest-patch.toml",
        ".manifest-patch.toml",
        "manifest-patch.yaml",
        ".manifest-patch.yaml",
        "manifest-patch.yml",
        ".manifest-patch.yml",
    ];

    candidates.iter().map(|candidate| work_dir.join(candidate)).find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_no_settings_file() {
        let tmp = TempDir::new().expect("tmp");
        let settings = load_settings(tmp.path(), None).expect("settings");
        assert_eq!(settings.argo_manifest, PathBuf::from("argo.yaml"));
        assert_eq!(settings.kustomized, PathBuf::from("kustomized.yaml"));
    }

    #[test]
    fn test_discovered_toml_overrides_defaults() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join("manifest-patch.toml"),
            "configmap = 'deploy/cm.yaml'\nargo_key = 'spec.templates[1].resource.manifest'\n",
        )
        .expect("write");

        let settings = load_settings(tmp.path(), None).expect("settings");
        assert_eq!(settings.configmap, PathBuf::from("deploy/cm.yaml"));
        assert_eq!(settings.argo_key, "spec.templates[1].resource.manifest");
        // Untouched keys keep their defaults
        assert_eq!(settings.load_test_config, PathBuf::from("load_test/config.yaml"));
    }

    #[test]
    fn test_explicit_yaml_settings() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("custom.yml");
        fs::write(&path, "kustomized: out/kustomized.yaml\nconfig_file_name: engine.yaml\n")
            .expect("write");

        let settings = load_settings(tmp.path(), Some(&path)).expect("settings");
        assert_eq!(settings.kustomized, PathBuf::from("out/kustomized.yaml"));
        assert_eq!(settings.config_file_name, "engine.yaml");
    }

    #[test]
    fn test_explicit_missing_settings_file_is_err() {
        let tmp = TempDir::new().expect("tmp");
        let result = load_settings(tmp.path(), Some(&tmp.path().join("absent.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_explicit_invalid_type_is_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "configmap = [1, 2]\n").expect("write");

        assert!(load_settings(tmp.path(), Some(&path)).is_err());
    }

    #[test]
    fn test_explicit_unsupported_extension_is_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("settings.ini");
        fs::write(&path, "configmap=x\n").expect("write");

        assert!(load_settings(tmp.path(), Some(&path)).is_err());
    }

    #[test]
    fn test_auto_discovered_invalid_settings_fall_back_to_defaults() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("manifest-patch.toml"), "configmap = [1, 2]\n").expect("write");

        let settings = load_settings(tmp.path(), None).expect("should not error on discovery");
        assert_eq!(settings.configmap, Settings::default().configmap);
    }
}
