//! Configuration file support for tsbundle.
//!
//! tsbundle supports two configuration file locations:
//! - Global: `~/.tsbundle/config.toml` - User-wide defaults
//! - Project: `.tsbundle/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::task::LineEnding;

/// tsbundle configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Loader generation settings
    pub loader: LoaderConfig,

    /// Build settings
    pub build: BuildConfig,
}

/// Loader-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Line ending for generated loaders (`lf` or `crlf`)
    pub new_line: Option<String>,
}

/// Build-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Targets built when none are named on the command line
    pub default_targets: Vec<String>,
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
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.loader.new_line.is_some() {
            self.loader.new_line = other.loader.new_line;
        }
        if !other.build.default_targets.is_empty() {
            self.build.default_targets = other.build.default_targets;
        }
    }

    /// Parse the configured line ending, ignoring unknown values.
    pub fn line_ending(&self) -> Option<LineEnding> {
        self.loader.new_line.as_ref().and_then(|s| s.parse().ok())
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.tsbundle/config.toml)
/// 2. Global config (~/.tsbundle/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        config.merge(Config::load_or_default(global_path));
    }

    // Project config overrides global
    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global tsbundle config directory (~/.tsbundle).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".tsbundle"))
}

/// Get the project config path (.tsbundle/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".tsbundle").join("config.toml")
}
