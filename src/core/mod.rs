//! Core data structures for tsbundle.
//!
//! This module contains the foundational types used throughout tsbundle:
//! - Reference buckets and the reference-file scan state
//! - Compilation tasks and the resolved option set
//! - tsconfig settings and the parsed project file
//! - The Tsbundle.toml build file

pub mod build_file;
pub mod reference;
pub mod task;
pub mod tsconfig;

pub use build_file::{BuildFile, BuildFileError, TargetConfig, BUILD_FILE_NAME};
pub use reference::{Bucket, ReferenceOrder, ScanState};
pub use task::{CompilationTask, LineEnding, ResolvedOptions};
pub use tsconfig::{ProjectFile, TsConfigDescriptor, TsConfigSetting};
