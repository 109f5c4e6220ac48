//! Command implementations

pub mod build;
pub mod completions;
pub mod init;
pub mod loader;
pub mod refs;
pub mod tsconfig;

use std::path::PathBuf;

use anyhow::Result;

use tsbundle::util::config::{self, Config};
use tsbundle::util::JinjaTemplates;
use tsbundle::{BuildFile, GlobalContext};

/// A loaded build file and the configuration that applies to it.
pub struct Project {
    /// Directory containing Tsbundle.toml
    pub root: PathBuf,
    pub build_file: BuildFile,
    pub config: Config,
}

impl Project {
    /// Find and load the build file above the working directory.
    pub fn load(ctx: &GlobalContext) -> Result<Self> {
        let path = ctx.find_build_file()?;
        let root = path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| ctx.cwd().to_path_buf());
        let build_file = BuildFile::load(&path)?;
        let config = config::load_config(&ctx.config_path(), &config::project_config_path(&root));

        tracing::debug!("Using build file {}", path.display());
        Ok(Project {
            root,
            build_file,
            config,
        })
    }

    /// Template processor over the build file's `[vars]`.
    pub fn templates(&self) -> JinjaTemplates {
        JinjaTemplates::new(self.build_file.vars.clone())
    }
}
