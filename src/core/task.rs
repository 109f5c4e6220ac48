//! Compilation tasks and the option set resolution writes into.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::core::tsconfig::TsConfigDescriptor;

/// A unit of compilation: an ordered source list and where output goes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompilationTask {
    /// Source files, relative to the build file directory
    pub src: Vec<String>,

    /// Single bundled output file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out: Option<String>,

    /// Output directory
    #[serde(rename = "outDir", skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<String>,
}

impl CompilationTask {
    /// Create a task over the given sources.
    pub fn new(src: Vec<String>) -> Self {
        CompilationTask {
            src,
            out: None,
            out_dir: None,
        }
    }
}

/// Options for one build invocation, mutated in place by tsconfig resolution.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolvedOptions {
    /// Compiler options keyed by their tsconfig names (`target`, `module`, ...)
    #[serde(rename = "compilerOptions")]
    pub compiler_options: Map<String, Value>,

    /// Compilation tasks, in declaration order
    #[serde(rename = "compilationTasks")]
    pub compilation_tasks: Vec<CompilationTask>,

    /// Canonical tsconfig settings, once merged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tsconfig: Option<TsConfigDescriptor>,
}

impl ResolvedOptions {
    /// Create an option set from caller compiler options and tasks.
    pub fn new(compiler_options: Map<String, Value>, compilation_tasks: Vec<CompilationTask>) -> Self {
        ResolvedOptions {
            compiler_options,
            compilation_tasks,
            tsconfig: None,
        }
    }

    /// Line ending requested through the `newLine` compiler option.
    pub fn new_line(&self) -> Option<LineEnding> {
        self.compiler_options
            .get("newLine")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
    }

    /// Get the first compilation task, creating an empty one if none exist.
    pub fn first_task_mut(&mut self) -> &mut CompilationTask {
        if self.compilation_tasks.is_empty() {
            self.compilation_tasks.push(CompilationTask::default());
        }
        &mut self.compilation_tasks[0]
    }
}

/// Line ending used in generated loaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    /// The line ending of the host platform.
    pub fn platform() -> Self {
        if cfg!(windows) {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    /// The literal characters.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

impl Default for LineEnding {
    fn default() -> Self {
        Self::platform()
    }
}

impl FromStr for LineEnding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lf" => Ok(LineEnding::Lf),
            "crlf" => Ok(LineEnding::CrLf),
            other => Err(format!("unknown line ending `{}` (expected lf or crlf)", other)),
        }
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineEnding::Lf => write!(f, "lf"),
            LineEnding::CrLf => write!(f, "crlf"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_line_ending_parse() {
        assert_eq!("LF".parse::<LineEnding>().unwrap(), LineEnding::Lf);
        assert_eq!("CRLF".parse::<LineEnding>().unwrap(), LineEnding::CrLf);
        assert_eq!("crlf".parse::<LineEnding>().unwrap().as_str(), "\r\n");
        assert!("cr".parse::<LineEnding>().is_err());
    }

    #[test]
    fn test_new_line_from_compiler_options() {
        let mut opts = ResolvedOptions::default();
        assert_eq!(opts.new_line(), None);

        opts.compiler_options.insert("newLine".into(), json!("CRLF"));
        assert_eq!(opts.new_line(), Some(LineEnding::CrLf));
    }

    #[test]
    fn test_first_task_mut_creates_task() {
        let mut opts = ResolvedOptions::default();
        opts.first_task_mut().src.push("a.ts".into());
        assert_eq!(opts.compilation_tasks.len(), 1);
        assert_eq!(opts.compilation_tasks[0].src, vec!["a.ts"]);
    }
}
