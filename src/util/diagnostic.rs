//! User-friendly diagnostic messages.
//!
//! Every error shown to the user carries its root cause, the file involved
//! when there is one, and a suggested fix.

use std::fmt;
use std::path::PathBuf;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when no build file is found.
    pub const NO_BUILD_FILE: &str = "Run `tsbundle init` to create a Tsbundle.toml";

    /// Suggestion when a target is not found.
    pub const TARGET_NOT_FOUND: &str = "Check the [targets] tables in Tsbundle.toml";

    /// Suggestion when a tsconfig file cannot be found.
    pub const TSCONFIG_NOT_FOUND: &str =
        "Point `tsconfig` at an existing file or at the directory containing tsconfig.json";

    /// Suggestion when a tsconfig file cannot be parsed.
    pub const TSCONFIG_INVALID: &str = "Check that the file is valid JSON saved as UTF-8";

    /// Suggestion when loader generation is skipped.
    pub const LOADER_NEEDS_OUT_DIR: &str =
        "Set `out_dir` on the target to generate an AMD loader";
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    fn label(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }

    fn ansi(self) -> &'static str {
        match self {
            Severity::Error => "1;31",
            Severity::Warning => "1;33",
        }
    }
}

/// Wrap `text` in an ANSI style when color is on.
fn paint(text: &str, style: &str, color: bool) -> String {
    if color {
        format!("\x1b[{style}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub message: String,
    pub severity: Severity,
    /// Lines explaining where the problem came from
    pub context: Vec<String>,
    /// Suggested fixes, shown numbered
    pub suggestions: Vec<String>,
    /// File the problem is about
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    fn new(severity: Severity, message: String) -> Self {
        Diagnostic {
            message,
            severity,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message.into())
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message.into())
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Render for the terminal.
    pub fn format(&self, color: bool) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_to(&mut out, color);
        out
    }

    fn write_to(&self, out: &mut impl fmt::Write, color: bool) -> fmt::Result {
        let severity = paint(self.severity.label(), self.severity.ansi(), color);
        writeln!(out, "{}: {}", severity, self.message)?;

        if let Some(path) = &self.location {
            writeln!(out, "  --> {}", path.display())?;
        }
        for line in &self.context {
            writeln!(out, "  = {}", line)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(out)?;
            writeln!(out, "{}: consider:", paint("help", "1;32", color))?;
            for (n, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(out, "  {}. {}", n + 1, suggestion)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f, false)
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
