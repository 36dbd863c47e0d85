//! Configuration file support for boardsense.
//!
//! boardsense reads two configuration file locations:
//! - Global: `~/.boardsense/config.toml` - User-wide defaults
//! - Project: `.boardsense/config.toml` - Workspace-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::util::process::find_arduino_cli;

/// Environment variable overriding the arduino-cli binary.
pub const CLI_ENV: &str = "BOARDSENSE_CLI";

/// boardsense configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// arduino-cli invocation settings
    pub cli: CliConfig,
}

/// How to invoke arduino-cli for property retrieval.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Path to the arduino-cli binary
    pub path: Option<PathBuf>,

    /// arduino-cli configuration file, passed as `--config-file`
    pub config_file: Option<PathBuf>,

    /// Extra arguments appended to the property query
    pub extra_args: Vec<String>,
}

impl CliConfig {
    /// Locate the arduino-cli binary.
    ///
    /// `BOARDSENSE_CLI` wins over the configured path, which wins over a
    /// `PATH` lookup.
    pub fn program(&self) -> Option<PathBuf> {
        std::env::var_os(CLI_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| self.path.clone())
            .or_else(find_arduino_cli)
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.cli.path.is_some() {
            self.cli.path = other.cli.path;
        }
        if other.cli.config_file.is_some() {
            self.cli.config_file = other.cli.config_file;
        }
        if !other.cli.extra_args.is_empty() {
            self.cli.extra_args = other.cli.extra_args;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.boardsense/config.toml)
/// 2. Global config (~/.boardsense/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: Option<&Path>) -> Config {
    let mut config = Config::default();

    for path in [global_path, project_path].into_iter().flatten() {
        if path.exists() {
            config.merge(Config::load_or_default(path));
        }
    }

    config
}

/// Get the global boardsense config directory (~/.boardsense).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".boardsense"))
}

/// Get the global config path (~/.boardsense/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.boardsense/config.toml).
pub fn project_config_path(workspace_root: &Path) -> PathBuf {
    workspace_root.join(".boardsense").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.cli.path.is_none());
        assert!(config.cli.config_file.is_none());
        assert!(config.cli.extra_args.is_empty());
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[cli]
path = "/usr/local/bin/arduino-cli"
config_file = "/etc/arduino-cli.yaml"
extra_args = ["--log-level", "warn"]
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(
            config.cli.path,
            Some(PathBuf::from("/usr/local/bin/arduino-cli"))
        );
        assert_eq!(
            config.cli.config_file,
            Some(PathBuf::from("/etc/arduino-cli.yaml"))
        );
        assert_eq!(config.cli.extra_args, vec!["--log-level", "warn"]);
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.cli.path = Some(PathBuf::from("/global/arduino-cli"));
        base.cli.extra_args = vec!["--verbose".to_string()];

        let mut override_cfg = Config::default();
        override_cfg.cli.path = Some(PathBuf::from("/project/arduino-cli"));

        base.merge(override_cfg);

        assert_eq!(base.cli.path, Some(PathBuf::from("/project/arduino-cli")));
        assert_eq!(base.cli.extra_args, vec!["--verbose"]); // Not overridden
    }

    #[test]
    fn test_load_config_project_overrides_global() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("global.toml");
        let project = tmp.path().join("project.toml");

        std::fs::write(&global, "[cli]\npath = \"/g\"\nconfig_file = \"/g.yaml\"\n").unwrap();
        std::fs::write(&project, "[cli]\npath = \"/p\"\n").unwrap();

        let config = load_config(Some(&global), Some(&project));
        assert_eq!(config.cli.path, Some(PathBuf::from("/p")));
        assert_eq!(config.cli.config_file, Some(PathBuf::from("/g.yaml")));
    }

    #[test]
    fn test_invalid_config_falls_back_to_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "this is not = [valid toml").unwrap();

        assert_eq!(Config::load_or_default(&path), Config::default());
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_project_config_path() {
        assert_eq!(
            project_config_path(Path::new("/work")),
            PathBuf::from("/work/.boardsense/config.toml")
        );
    }
}
