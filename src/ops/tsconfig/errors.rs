//! tsconfig resolution errors.

use std::io;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Name carried by errors raised for an unusable `tsconfig` setting.
pub const INVALID_SETTING: &str = "Invalid tsconfig setting";

/// Error resolving a tsconfig setting or reading the project file.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum TsConfigError {
    /// The project file does not exist.
    #[error("Could not find file \"{path}\".")]
    #[diagnostic(code(tsbundle::tsconfig::not_found))]
    NotFound { path: String },

    /// The OS refused the read.
    #[error("Error {errno} reading \"{path}\".")]
    #[diagnostic(code(tsbundle::tsconfig::io))]
    Io { path: String, errno: i32 },

    /// Any other read failure.
    #[error("Error reading \"{path}\": {detail}")]
    #[diagnostic(code(tsbundle::tsconfig::read))]
    Read { path: String, detail: String },

    /// The project file is not JSON.
    #[error("Error parsing \"{path}\".  It may not be valid JSON in UTF-8.")]
    #[diagnostic(
        code(tsbundle::tsconfig::parse),
        help("Check that the file is valid JSON saved as UTF-8")
    )]
    Parse { path: String },

    /// A `tsconfig` setting names a path that does not exist.
    #[error("no such file or directory: \"{path}\"")]
    #[diagnostic(
        code(tsbundle::tsconfig::setting_not_found),
        help("Point `tsconfig` at an existing file or directory")
    )]
    SettingNotFound {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A `tsconfig` setting could not be used.
    #[error("{message}")]
    #[diagnostic(code(tsbundle::tsconfig::invalid_setting))]
    InvalidSetting {
        name: &'static str,
        message: String,
        code: Option<io::ErrorKind>,
        errno: Option<i32>,
    },
}

impl TsConfigError {
    /// Classify a failure to read the project file.
    pub fn from_read(path: &str, err: &io::Error) -> Self {
        match (err.kind(), err.raw_os_error()) {
            (io::ErrorKind::NotFound, _) => TsConfigError::NotFound {
                path: path.to_string(),
            },
            // Non-UTF-8 bytes surface as a read error from the reader.
            (io::ErrorKind::InvalidData, None) => TsConfigError::Parse {
                path: path.to_string(),
            },
            (_, Some(errno)) => TsConfigError::Io {
                path: path.to_string(),
                errno,
            },
            (_, None) => TsConfigError::Read {
                path: path.to_string(),
                detail: err.to_string(),
            },
        }
    }

    /// Wrap a failure while interpreting a `tsconfig` setting.
    pub fn invalid_setting(details: impl std::fmt::Display, err: Option<&io::Error>) -> Self {
        TsConfigError::InvalidSetting {
            name: INVALID_SETTING,
            message: format!(
                "Exception due to invalid tsconfig setting.  Details: {}",
                details
            ),
            code: err.map(io::Error::kind),
            errno: err.and_then(io::Error::raw_os_error),
        }
    }

    /// The I/O error kind behind this error, if any.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            TsConfigError::NotFound { .. } => Some(io::ErrorKind::NotFound),
            TsConfigError::SettingNotFound { source, .. } => Some(source.kind()),
            TsConfigError::InvalidSetting { code, .. } => *code,
            _ => None,
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string());
        match self {
            TsConfigError::NotFound { path } | TsConfigError::SettingNotFound { path, .. } => diag
                .with_location(path)
                .with_suggestion(suggestions::TSCONFIG_NOT_FOUND),
            TsConfigError::Parse { path } => diag
                .with_location(path)
                .with_suggestion(suggestions::TSCONFIG_INVALID),
            TsConfigError::Io { path, .. } | TsConfigError::Read { path, .. } => {
                diag.with_location(path)
            }
            TsConfigError::InvalidSetting { name, errno, .. } => {
                let diag = diag.with_context(*name);
                match errno {
                    Some(errno) => diag.with_context(format!("errno {}", errno)),
                    None => diag,
                }
            }
        }
    }
}
