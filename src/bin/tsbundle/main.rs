//! tsbundle CLI - TypeScript build orchestration

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use tsbundle::core::BuildFileError;
use tsbundle::ops::TsConfigError;
use tsbundle::util::diagnostic;
use tsbundle::GlobalContext;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli, color).await {
        report(&e, color);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, color: bool) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("tsbundle=debug")
    } else {
        EnvFilter::new("tsbundle=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(color)
        .with_writer(std::io::stderr)
        .init();

    let mut ctx = GlobalContext::new()?;
    ctx.set_color(color);

    // Execute command
    match cli.command {
        Commands::Init(args) => commands::init::execute(args, &ctx),
        Commands::Build(args) => commands::build::execute(args, &ctx).await,
        Commands::Refs(args) => commands::refs::execute(args, &ctx).await,
        Commands::Loader(args) => commands::loader::execute(args, &ctx).await,
        Commands::Tsconfig(args) => commands::tsconfig::execute(args, &ctx).await,
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// Print an error, as a full diagnostic when the cause is one we know.
fn report(e: &anyhow::Error, color: bool) {
    let outer = (e.chain().count() > 1).then(|| e.to_string());

    for cause in e.chain() {
        let diag = if let Some(err) = cause.downcast_ref::<BuildFileError>() {
            err.to_diagnostic()
        } else if let Some(err) = cause.downcast_ref::<TsConfigError>() {
            err.to_diagnostic()
        } else {
            continue;
        };
        let diag = match &outer {
            Some(outer) => diag.with_context(outer.clone()),
            None => diag,
        };
        diagnostic::emit(&diag, color);
        return;
    }

    eprintln!("error: {:#}", e);
}
