//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use tsbundle::LineEnding;

/// tsbundle - TypeScript build orchestration
#[derive(Parser)]
#[command(name = "tsbundle")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a starter Tsbundle.toml
    Init(InitArgs),

    /// Resolve targets and generate their AMD loaders
    Build(BuildArgs),

    /// Show how a reference file orders its files
    Refs(RefsArgs),

    /// Generate an AMD loader from a reference file
    Loader(LoaderArgs),

    /// Show a target's resolved tsconfig settings
    Tsconfig(TsconfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Name of the starter target
    #[arg(long, default_value = "dev")]
    pub target: String,

    /// Overwrite an existing Tsbundle.toml
    #[arg(long)]
    pub force: bool,

    /// Directory to initialize (defaults to current directory)
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct BuildArgs {
    /// Targets to build (defaults to configured default targets, else all)
    pub targets: Vec<String>,

    /// Emit resolved options as JSON (writes nothing)
    #[arg(long)]
    pub plan: bool,
}

#[derive(Args)]
pub struct RefsArgs {
    /// Reference file to read
    pub reference: PathBuf,

    /// Reference paths produced by earlier build steps
    #[arg(long, value_delimiter = ',')]
    pub generated: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct LoaderArgs {
    /// Reference file to read
    pub reference: PathBuf,

    /// Path of the loader to write
    #[arg(long)]
    pub loader: PathBuf,

    /// Directory the compiled JavaScript lands in
    #[arg(long)]
    pub out_dir: PathBuf,

    /// Reference paths produced by earlier build steps
    #[arg(long, value_delimiter = ',')]
    pub generated: Vec<String>,

    /// Line ending for the loader (lf or crlf)
    #[arg(long)]
    pub new_line: Option<LineEnding>,
}

#[derive(Args)]
pub struct TsconfigArgs {
    /// Target to resolve
    pub target: String,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
