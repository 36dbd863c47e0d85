//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;

use boardsense::util::shell::ColorChoice;

/// boardsense - configure editor code intelligence for an Arduino board
#[derive(Parser)]
#[command(name = "boardsense")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write .vscode/c_cpp_properties.json for a board and update settings
    Configure(ConfigureArgs),

    /// Show what `configure` would generate, without writing anything
    Inspect(InspectArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Where the property dump comes from and which board it describes.
#[derive(Args)]
pub struct TargetArgs {
    /// Fully qualified board name (e.g. arduino:avr:uno)
    pub fqbn: String,

    /// Workspace folder (defaults to the current directory)
    #[arg(short, long)]
    pub workspace: Option<PathBuf>,

    /// Read a captured `--show-properties` dump instead of running
    /// arduino-cli ("-" for stdin)
    #[arg(long, value_name = "FILE")]
    pub properties: Option<PathBuf>,

    /// arduino-cli binary to run
    #[arg(long, env = "BOARDSENSE_CLI", value_name = "PATH")]
    pub cli_path: Option<PathBuf>,
}

#[derive(Args)]
pub struct ConfigureArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Sketch file open in the editor; its folder is used when no
    /// workspace is given
    #[arg(long, value_name = "FILE")]
    pub document: Option<PathBuf>,
}

#[derive(Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Print the configuration entry as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: CompletionShell,
}
