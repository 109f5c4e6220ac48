//! High-level operations.
//!
//! This module contains the implementation of tsbundle commands.

pub mod amd_loader;
pub mod reference_order;
pub mod tsbundle_build;
pub mod tsconfig;

pub use amd_loader::{generate as generate_amd_loader, write_amd_loader, LoaderArtifacts};
pub use tsbundle_build::{build, build_target, BuildOptions, TargetOutcome};
pub use tsconfig::{resolve as resolve_tsconfig, ResolveContext, TsConfigError};
