//! Global context for tsbundle operations.
//!
//! Provides centralized access to configuration, paths, and environment.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::build_file::{find_build_file, BuildFileError};
use crate::util::config::{self, Config};

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for global tsbundle data (~/.tsbundle/)
    home: PathBuf,

    /// Whether to use colors in output
    color: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        let home = config::global_config_dir().unwrap_or_else(|| PathBuf::from(".tsbundle"));

        Ok(GlobalContext {
            cwd,
            home,
            color: true,
        })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = cwd;
        Ok(ctx)
    }

    /// Set color output.
    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Get the project configuration file path.
    pub fn project_config_path(&self) -> PathBuf {
        config::project_config_path(&self.cwd)
    }

    /// Load the merged global and project configuration.
    pub fn load_config(&self) -> Config {
        config::load_config(&self.config_path(), &self.project_config_path())
    }

    /// Check if color output is enabled.
    pub fn color(&self) -> bool {
        self.color
    }

    /// Find `Tsbundle.toml` starting from cwd and searching upward.
    pub fn find_build_file(&self) -> Result<PathBuf, BuildFileError> {
        find_build_file_in(self.cwd.ancestors()).ok_or_else(|| BuildFileError::NotFound {
            dir: self.cwd.clone(),
        })
    }
}

/// First build file found in `dirs`, searched in order.
pub fn find_build_file_in<'a>(dirs: impl IntoIterator<Item = &'a Path>) -> Option<PathBuf> {
    dirs.into_iter().find_map(find_build_file)
}
