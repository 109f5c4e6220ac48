//! `tsbundle loader` command
//!
//! Generates an AMD loader without a build file.

use anyhow::{bail, Result};

use crate::cli::LoaderArgs;
use tsbundle::ops::{amd_loader, reference_order};
use tsbundle::util::{paths, FileSystem, RealFs};
use tsbundle::GlobalContext;

pub async fn execute(args: LoaderArgs, ctx: &GlobalContext) -> Result<()> {
    let reference = paths::resolve(ctx.cwd(), &args.reference);
    if !RealFs.exists(&reference).await {
        bail!("Cannot generate amd loader unless a reference file is present");
    }
    let loader = paths::resolve(ctx.cwd(), &args.loader);
    let out_dir = paths::resolve(ctx.cwd(), &args.out_dir);

    let reference_dir = reference.parent().unwrap_or(ctx.cwd());
    let order = reference_order::load(&RealFs, &reference, reference_dir, &args.generated).await?;
    if order.is_empty() {
        tracing::warn!("No files in reference file: {}", reference.display());
    }

    let new_line = args
        .new_line
        .or_else(|| ctx.load_config().line_ending())
        .unwrap_or_default();

    let Some(artifacts) = amd_loader::generate(&order, &loader, Some(&out_dir), new_line) else {
        bail!("no output directory for {}", loader.display());
    };
    amd_loader::write_amd_loader(&RealFs, &loader, &artifacts).await?;

    Ok(())
}
