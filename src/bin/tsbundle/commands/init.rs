//! `tsbundle init` command

use anyhow::{bail, Context, Result};

use crate::cli::InitArgs;
use tsbundle::core::build_file::{generate_build_file, BUILD_FILE_NAME};
use tsbundle::GlobalContext;

/// Validates a target name so it can be written as a bare TOML key.
///
/// Returns Ok(()) if the name is valid, otherwise returns an error message.
pub fn validate_target_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("target name cannot be empty");
    }

    if name.starts_with('-') {
        return Err("target name cannot start with a hyphen");
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err("target name contains invalid characters");
    }

    Ok(())
}

pub fn execute(args: InitArgs, ctx: &GlobalContext) -> Result<()> {
    if let Err(reason) = validate_target_name(&args.target) {
        bail!("invalid target name `{}`: {}", args.target, reason);
    }

    let dir = match args.path {
        Some(path) => ctx.cwd().join(path),
        None => ctx.cwd().to_path_buf(),
    };
    let path = dir.join(BUILD_FILE_NAME);

    if path.exists() && !args.force {
        bail!(
            "{} already exists in {} (use --force to overwrite)",
            BUILD_FILE_NAME,
            dir.display()
        );
    }

    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create directory: {}", dir.display()))?;
    std::fs::write(&path, generate_build_file(&args.target))
        .with_context(|| format!("failed to write {}", path.display()))?;

    eprintln!("     Created {} with target `{}`", BUILD_FILE_NAME, args.target);
    Ok(())
}
