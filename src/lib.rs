//! tsbundle - TypeScript build orchestration
//!
//! This crate provides the core library functionality for tsbundle:
//! reading reference-file load order, generating AMD loaders from it, and
//! resolving tsconfig.json settings into compilation tasks.

pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and mocks for tsbundle unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides an in-memory filesystem and fixture
/// generators.
#[cfg(test)]
pub mod test_support;

pub use core::{
    build_file::BuildFile,
    reference::ReferenceOrder,
    task::{CompilationTask, LineEnding, ResolvedOptions},
};

pub use util::context::GlobalContext;
