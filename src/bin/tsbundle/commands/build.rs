//! `tsbundle build` command

use anyhow::Result;

use super::Project;
use crate::cli::BuildArgs;
use tsbundle::ops::tsbundle_build::{build, BuildOptions};
use tsbundle::util::RealFs;
use tsbundle::GlobalContext;

pub async fn execute(args: BuildArgs, ctx: &GlobalContext) -> Result<()> {
    let project = Project::load(ctx)?;
    let templates = project.templates();

    let opts = BuildOptions {
        targets: args.targets,
        default_targets: project.config.build.default_targets.clone(),
        emit_plan: args.plan,
        line_ending: project.config.line_ending(),
        color: ctx.color(),
    };

    let outcomes = build(&RealFs, &templates, &project.build_file, &project.root, &opts).await?;

    if args.plan {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
        return Ok(());
    }

    for outcome in &outcomes {
        let tasks = outcome.options.compilation_tasks.len();
        eprintln!(
            "    Resolved `{}` ({} compilation task{})",
            outcome.target,
            tasks,
            if tasks == 1 { "" } else { "s" }
        );
    }
    eprintln!("    Finished {} target(s)", outcomes.len());

    Ok(())
}
