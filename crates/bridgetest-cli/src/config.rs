//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (YAML/JSON)
//! - Command-line arguments, which take precedence over both

use crate::cli::{Backend, OutputFormat};
use crate::error::{Error, Result};
use bridgetest_core::Tier;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the working directory
pub const PROJECT_CONFIG_YAML: &str = ".bridgetest.yaml";

/// JSON variant of [`PROJECT_CONFIG_YAML`]
pub const PROJECT_CONFIG_JSON: &str = ".bridgetest.json";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Conformance suite settings
    pub suite: SuiteConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Conformance suite configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Backend used when `--backend` is not given
    pub backend: Backend,

    /// Tier used when `--tier` is not given
    pub tier: Tier,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: OutputFormat,

    /// Use colored output by default
    pub color: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when no `-v` flag is given (trace, debug, info, warn, error)
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,

    /// Include thread IDs
    pub thread_ids: bool,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Native,
            tier: Tier::Asserted,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            color: true,
        }
    }
}

/// Serialization format implied by a file extension
fn is_yaml(path: &Path) -> Result<bool> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => Ok(true),
        Some("json") => Ok(false),
        _ => Err(Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "YAML or JSON".to_string(),
        }),
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let yaml = is_yaml(path)?;
        let content = std::fs::read_to_string(path)?;

        let config = if yaml {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };

        Ok(config)
    }

    /// Load configuration from default locations
    ///
    /// The first existing file wins. Returns the defaults if none exists.
    pub fn load() -> Result<Self> {
        match Self::default_config_paths().into_iter().find(|p| p.exists()) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading configuration");
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// The file [`Config::load_with_file`] would read, if any
    pub fn source_path(file: Option<&Path>) -> Option<PathBuf> {
        match file {
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_config_paths().into_iter().find(|p| p.exists()),
        }
    }

    /// Get default configuration file paths to check, in order
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(PROJECT_CONFIG_YAML),
            PathBuf::from(PROJECT_CONFIG_JSON),
        ];

        if let Some(path) = Self::user_config_path() {
            paths.push(path);
        }

        paths
    }

    /// User configuration file under the platform config directory
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bridgetest").join("config.yaml"))
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_yaml(path)? {
            serde_yaml::to_string(self)?
        } else {
            serde_json::to_string_pretty(self)?
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "suite:\n  backend: ffi\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.suite.backend, Backend::Ffi);
        assert_eq!(config.suite.tier, Tier::Asserted);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_json_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"suite": {"tier": "smoke"}, "output": {"format": "json-pretty", "color": false}}"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.suite.tier, Tier::Smoke);
        assert_eq!(config.output.format, OutputFormat::JsonPretty);
        assert!(!config.output.color);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.logging.level = Some("debug".to_string());

        for name in ["nested/config.yaml", "config.json"] {
            let path = dir.path().join(name);
            config.save(&path).unwrap();
            assert_eq!(Config::from_file(&path).unwrap(), config);
        }
    }

    #[test]
    fn test_missing_and_unknown_files() {
        let dir = TempDir::new().unwrap();

        let missing = dir.path().join("absent.yaml");
        assert!(matches!(
            Config::from_file(&missing),
            Err(Error::FileNotFound { .. })
        ));

        let toml = dir.path().join("config.toml");
        std::fs::write(&toml, "").unwrap();
        assert!(matches!(
            Config::from_file(&toml),
            Err(Error::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_explicit_source_path() {
        let path = Path::new("/tmp/custom.yaml");
        assert_eq!(Config::source_path(Some(path)), Some(path.to_path_buf()));
        assert_eq!(
            Config::default_config_paths()[0],
            PathBuf::from(PROJECT_CONFIG_YAML)
        );
    }
}
