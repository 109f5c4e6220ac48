//! Tsbundle.toml build file parsing and schema.
//!
//! The build file plays the role of a task runner's configuration: a
//! task-level `[options]` table shared by every target, and one
//! `[targets.<name>]` table per compilation target whose own `options`
//! table is layered on top.
//!
//! ```toml
//! [vars]
//! conf = "config"
//!
//! [options]
//! tsconfig = "{{ vars.conf }}"
//!
//! [options.compiler]
//! target = "es5"
//!
//! [targets.dev]
//! src = ["src/**/*.ts"]
//! out_dir = "build/js"
//! reference = "src/reference.ts"
//! amdloader = "build/loader.js"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::core::task::LineEnding;
use crate::core::tsconfig::TsConfigSetting;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Canonical build file name.
pub const BUILD_FILE_NAME: &str = "Tsbundle.toml";

/// Errors loading or querying the build file.
#[derive(Debug, Error)]
pub enum BuildFileError {
    #[error("no build file found in `{}` or any parent directory", .dir.display())]
    NotFound { dir: PathBuf },

    #[error("failed to read build file: {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse build file: {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown target `{name}`")]
    UnknownTarget { name: String, available: Vec<String> },
}

impl BuildFileError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            BuildFileError::NotFound { dir } => {
                Diagnostic::error(format!("could not find `{}`", BUILD_FILE_NAME))
                    .with_context(format!("searched from {}", dir.display()))
                    .with_suggestion(suggestions::NO_BUILD_FILE)
            }
            BuildFileError::Read { path, source } => {
                Diagnostic::error(format!("failed to read build file: {}", source))
                    .with_location(path)
            }
            BuildFileError::Parse { path, source } => {
                Diagnostic::error("invalid build file")
                    .with_location(path)
                    .with_context(source.to_string())
            }
            BuildFileError::UnknownTarget { name, available } => {
                let mut diag = Diagnostic::error(format!("unknown target `{}`", name));
                diag = diag.with_context(format!(
                    "available targets: {}",
                    if available.is_empty() {
                        "(none)".to_string()
                    } else {
                        available.join(", ")
                    }
                ));
                diag.with_suggestion(suggestions::TARGET_NOT_FOUND)
            }
        }
    }
}

/// Parsed Tsbundle.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildFile {
    /// Variables available to templates as `vars.<name>`
    #[serde(default)]
    pub vars: BTreeMap<String, String>,

    /// Task-level options shared by every target
    #[serde(default)]
    pub options: TaskOptions,

    /// Compilation targets by name
    #[serde(default)]
    pub targets: BTreeMap<String, TargetConfig>,
}

/// Options that may appear at task or target level.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskOptions {
    /// Location of the project configuration file
    pub tsconfig: Option<TsConfigSetting>,

    /// Line ending for generated loaders (`lf` or `crlf`)
    pub new_line: Option<String>,

    /// Compiler options, keyed by tsconfig name
    #[serde(default)]
    pub compiler: Map<String, Value>,
}

/// A single `[targets.<name>]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    /// Source glob patterns for the primary compilation task
    #[serde(default)]
    pub src: Vec<String>,

    /// Single bundled output file
    pub out: Option<String>,

    /// Output directory
    pub out_dir: Option<String>,

    /// Reference file declaring load order
    pub reference: Option<String>,

    /// Path of the AMD loader to generate
    pub amdloader: Option<String>,

    /// Reference paths produced by earlier build steps
    #[serde(default)]
    pub generated: Vec<String>,

    /// Additional compilation tasks
    #[serde(default)]
    pub files: Vec<FilesEntry>,

    /// Target-level options, layered over the task-level ones
    #[serde(default)]
    pub options: TaskOptions,
}

/// An extra compilation task declared under a target.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilesEntry {
    #[serde(default)]
    pub src: Vec<String>,
    pub out: Option<String>,
    pub out_dir: Option<String>,
}

impl BuildFile {
    /// Load a build file from disk.
    pub fn load(path: &Path) -> Result<Self, BuildFileError> {
        let contents = std::fs::read_to_string(path).map_err(|source| BuildFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    /// Parse build file contents.
    pub fn parse(contents: &str, path: &Path) -> Result<Self, BuildFileError> {
        toml::from_str(contents).map_err(|source| BuildFileError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Names of all targets, sorted.
    pub fn target_names(&self) -> Vec<String> {
        self.targets.keys().cloned().collect()
    }

    /// Look up a target by name.
    pub fn target(&self, name: &str) -> Result<&TargetConfig, BuildFileError> {
        self.targets
            .get(name)
            .ok_or_else(|| BuildFileError::UnknownTarget {
                name: name.to_string(),
                available: self.target_names(),
            })
    }

    /// Compiler options for a target: task-level keys overridden by target-level keys.
    pub fn compiler_options_for(&self, target: &TargetConfig) -> Map<String, Value> {
        let mut merged = self.options.compiler.clone();
        for (key, value) in &target.options.compiler {
            merged.insert(key.clone(), value.clone());
        }
        merged
    }

    /// Line ending requested in the build file for a target, if any.
    pub fn new_line_for(&self, target: &TargetConfig) -> Option<LineEnding> {
        target
            .options
            .new_line
            .as_ref()
            .or(self.options.new_line.as_ref())
            .and_then(|s| s.parse().ok())
    }
}

/// Find the build file in a directory.
pub fn find_build_file(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(BUILD_FILE_NAME);
    path.is_file().then_some(path)
}

/// Generate a starter build file.
pub fn generate_build_file(target: &str) -> String {
    format!(
        r#"[options]
tsconfig = true

[targets.{target}]
src = ["src/**/*.ts"]
out_dir = "build/js"
reference = "src/reference.ts"
amdloader = "build/js/loader.js"
"#
    )
}
