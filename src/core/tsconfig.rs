//! tsconfig settings and the parsed project file.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Compiler options copied from `tsconfig.json` into the option set.
pub const COMPILER_OPTION_NAMES: &[&str] = &[
    "declaration",
    "emitDecoratorMetadata",
    "experimentalDecorators",
    "isolatedModules",
    "inlineSourceMap",
    "inlineSources",
    "mapRoot",
    "module",
    "newLine",
    "noEmit",
    "noEmitHelpers",
    "noEmitOnError",
    "noImplicitAny",
    "noLib",
    "noResolve",
    "out",
    "outDir",
    "preserveConstEnums",
    "removeComments",
    "sourceMap",
    "sourceRoot",
    "suppressImplicitAnyIndexErrors",
    "target",
];

/// File name looked up when a setting names a directory.
pub const TSCONFIG_FILE_NAME: &str = "tsconfig.json";

/// A `tsconfig` option as written in the build file.
///
/// ```toml
/// tsconfig = true                       # ./tsconfig.json
/// tsconfig = "config"                   # config/tsconfig.json
/// tsconfig = { tsconfig = "a.json", ignore_settings = true }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TsConfigSetting {
    Enabled(bool),
    Path(String),
    Descriptor(TsConfigDescriptor),
}

/// Canonical tsconfig settings.
///
/// Every field is optional so that "not given" can be told apart from
/// "given as false" when task and target settings are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TsConfigDescriptor {
    /// Path to the project file; `None` in pass-through mode means `.`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tsconfig: Option<String>,

    /// Do not copy compiler options out of the project file
    #[serde(default, alias = "ignoreSettings", skip_serializing_if = "Option::is_none")]
    pub ignore_settings: Option<bool>,

    /// Allow rewriting the project file's `filesGlob`
    #[serde(default, alias = "overwriteFilesGlob", skip_serializing_if = "Option::is_none")]
    pub overwrite_files_glob: Option<bool>,

    /// Allow rewriting the project file's `files`
    #[serde(default, alias = "updateFiles", skip_serializing_if = "Option::is_none")]
    pub update_files: Option<bool>,

    /// Skip reading the project file entirely
    #[serde(default, alias = "passThrough", skip_serializing_if = "Option::is_none")]
    pub pass_through: Option<bool>,
}

impl TsConfigDescriptor {
    /// Create a descriptor pointing at a project file.
    pub fn at(path: impl Into<String>) -> Self {
        TsConfigDescriptor {
            tsconfig: Some(path.into()),
            ..Default::default()
        }
    }

    pub fn ignores_settings(&self) -> bool {
        self.ignore_settings.unwrap_or(false)
    }

    pub fn is_pass_through(&self) -> bool {
        self.pass_through.unwrap_or(false)
    }
}

/// The parts of `tsconfig.json` that resolution reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFile {
    #[serde(default)]
    files: Option<Vec<String>>,

    #[serde(default, rename = "compilerOptions")]
    compiler_options: Option<Map<String, Value>>,
}

impl ProjectFile {
    /// Files listed by the project, duplicates removed, first occurrence kept.
    pub fn unique_files(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for file in self.files.iter().flatten() {
            if !seen.contains(&file.as_str()) {
                seen.push(file);
            }
        }
        seen
    }

    /// The `compilerOptions` object, if present.
    pub fn compiler_options(&self) -> Option<&Map<String, Value>> {
        self.compiler_options.as_ref()
    }

    /// A non-empty string compiler option.
    pub fn compiler_option_str(&self, name: &str) -> Option<&str> {
        self.compiler_options
            .as_ref()
            .and_then(|co| co.get(name))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}
