//! boardsense CLI - editor configuration for Arduino sketches

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use boardsense::ops::ConfigureError;
use boardsense::util::diagnostic;
use boardsense::util::shell::Shell;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let shell = Shell::from_flags(cli.quiet, cli.verbose, cli.color);

    if let Err(e) = run(cli, &shell) {
        match e.downcast_ref::<ConfigureError>() {
            Some(err) => diagnostic::emit(&err.to_report(), shell.use_color()),
            None => shell.error(format!("{:#}", e)),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli, shell: &Shell) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("boardsense=debug")
    } else if cli.quiet {
        EnvFilter::new("boardsense=error")
    } else {
        EnvFilter::new("boardsense=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        Commands::Configure(args) => commands::configure::execute(args, shell),
        Commands::Inspect(args) => commands::inspect::execute(args, shell),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
