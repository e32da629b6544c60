//! Store configuration loaded from YAML/TOML and the environment

use onepush_core::{Error, KeySpace, Result};
use onepush_observability::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Root under which every bucket name is derived
    #[serde(default)]
    pub namespace: KeySpace,

    /// JSON snapshot backing the in-memory store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_path: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StoreConfig {
    /// Read a config file; `.toml` files are parsed as TOML, anything else as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let config = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::from_str(&contents)
                .map_err(|e| Error::Config(format!("Invalid TOML in {}: {}", path.display(), e)))?
        } else {
            serde_yaml::from_str(&contents)
                .map_err(|e| Error::Config(format!("Invalid YAML in {}: {}", path.display(), e)))?
        };

        Ok(config)
    }

    /// Merge environment variables into config (env vars take precedence)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("ONEPUSH_NAMESPACE")
            && !val.is_empty()
        {
            self.namespace = KeySpace::new(val);
        }

        if let Ok(val) = std::env::var("ONEPUSH_SNAPSHOT_PATH") {
            self.snapshot_path = Some(PathBuf::from(val));
        }

        // Logging settings
        if let Ok(val) = std::env::var("ONEPUSH_LOG_LEVEL") {
            self.logging.level = val;
        }

        if let Ok(val) = std::env::var("ONEPUSH_LOG_JSON") {
            match val.parse::<bool>() {
                Ok(json) => self.logging.json = json,
                Err(_) => tracing::warn!("Ignoring invalid ONEPUSH_LOG_JSON '{}'", val),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ENV_VARS: [&str; 4] = [
        "ONEPUSH_NAMESPACE",
        "ONEPUSH_SNAPSHOT_PATH",
        "ONEPUSH_LOG_LEVEL",
        "ONEPUSH_LOG_JSON",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.namespace.root(), "onepush::core");
        assert!(config.snapshot_path.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_from_yaml_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("onepush.yaml");
        std::fs::write(
            &path,
            r#"
namespace: "staging::core"
snapshot_path: "/var/lib/onepush/store.json"
logging:
  level: debug
  json: true
"#,
        )
        .unwrap();

        let config = StoreConfig::from_file(&path).unwrap();
        assert_eq!(config.namespace.root(), "staging::core");
        assert_eq!(
            config.snapshot_path,
            Some(PathBuf::from("/var/lib/onepush/store.json"))
        );
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn test_from_toml_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("onepush.toml");
        std::fs::write(
            &path,
            r#"
namespace = "prod::core"

[logging]
level = "warn"
directives = ["onepush_service=debug"]
"#,
        )
        .unwrap();

        let config = StoreConfig::from_file(&path).unwrap();
        assert_eq!(config.namespace.root(), "prod::core");
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.directives, vec!["onepush_service=debug"]);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("onepush.toml");
        std::fs::write(&path, "namespace = [").unwrap();

        assert!(matches!(
            StoreConfig::from_file(&path),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            StoreConfig::from_file("/nonexistent/onepush.yaml"),
            Err(Error::Io(_))
        ));
    }

    #[test]
    #[serial_test::serial]
    fn test_merge_env_overrides() {
        clear_env();
        unsafe {
            std::env::set_var("ONEPUSH_NAMESPACE", "env::core");
            std::env::set_var("ONEPUSH_SNAPSHOT_PATH", "/tmp/onepush.json");
            std::env::set_var("ONEPUSH_LOG_LEVEL", "trace");
            std::env::set_var("ONEPUSH_LOG_JSON", "true");
        }

        let mut config = StoreConfig::default();
        config.merge_env();

        assert_eq!(config.namespace.root(), "env::core");
        assert_eq!(
            config.snapshot_path,
            Some(PathBuf::from("/tmp/onepush.json"))
        );
        assert_eq!(config.logging.level, "trace");
        assert!(config.logging.json);

        clear_env();
    }

    #[test]
    #[serial_test::serial]
    fn test_merge_env_ignores_bad_values() {
        clear_env();
        unsafe {
            std::env::set_var("ONEPUSH_NAMESPACE", "");
            std::env::set_var("ONEPUSH_LOG_JSON", "maybe");
        }

        let mut config = StoreConfig::default();
        config.merge_env();

        assert_eq!(config.namespace.root(), "onepush::core");
        assert!(!config.logging.json);

        clear_env();
    }
}
