//! `tsbundle refs` command

use anyhow::Result;

use crate::cli::RefsArgs;
use tsbundle::core::Bucket;
use tsbundle::ops::reference_order;
use tsbundle::util::{paths, RealFs};
use tsbundle::GlobalContext;

pub async fn execute(args: RefsArgs, ctx: &GlobalContext) -> Result<()> {
    let reference = paths::resolve(ctx.cwd(), &args.reference);
    let reference_dir = reference.parent().unwrap_or(ctx.cwd());

    let order = reference_order::load(&RealFs, &reference, reference_dir, &args.generated).await?;
    let order = order.map_paths(|p| paths::relative_slash(ctx.cwd(), &p).into());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&order)?);
        return Ok(());
    }

    if order.is_empty() {
        tracing::warn!("No files in reference file: {}", reference.display());
        return Ok(());
    }

    for bucket in Bucket::ALL {
        let files = order.bucket(bucket);
        if files.is_empty() {
            continue;
        }
        println!("{}:", bucket);
        for file in files {
            println!("  {}", file.display());
        }
    }

    Ok(())
}
