//! `tsbundle tsconfig` command

use anyhow::{Context, Result};

use super::Project;
use crate::cli::TsconfigArgs;
use tsbundle::ops::tsbundle_build::compilation_tasks;
use tsbundle::ops::tsconfig::{self, ResolveContext};
use tsbundle::util::RealFs;
use tsbundle::{GlobalContext, ResolvedOptions};

pub async fn execute(args: TsconfigArgs, ctx: &GlobalContext) -> Result<()> {
    let project = Project::load(ctx)?;
    let build_file = &project.build_file;
    let target = build_file.target(&args.target)?;
    let templates = project.templates();

    let options = ResolvedOptions::new(
        build_file.compiler_options_for(target),
        compilation_tasks(&project.root, target).await?,
    );
    let rctx = ResolveContext::new(&RealFs, &templates, &project.root);
    let resolved = tsconfig::resolve(
        &rctx,
        options,
        build_file.options.tsconfig.as_ref(),
        target.options.tsconfig.as_ref(),
    )
    .await
    .with_context(|| format!("failed to resolve tsconfig for target `{}`", args.target))?;

    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}
