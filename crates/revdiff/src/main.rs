mod commands;
mod config;
mod content;
mod error;
mod logging;
mod snapshot;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::commands::Commands;
use crate::config::Config;
use crate::error::{CliError, Result};

#[derive(Parser)]
#[command(name = "revdiff")]
#[command(version)]
#[command(about = "Compare project snapshots and manage version identifiers", long_about = None)]
struct Cli {
    /// Config file [default: ./revdiff.toml when present]
    #[arg(long = "config", short = 'C', global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr (-vv for trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        print_error(&e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().map_err(|source| CliError::Read {
        path: PathBuf::from("."),
        source,
    })?;
    let config = Config::load(cli.config.as_deref(), &cwd)?;
    cli.command.execute(&config)
}

fn print_error(error: &CliError) {
    eprintln!("error: {error}");

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("caused by: {cause}");
        source = std::error::Error::source(cause);
    }
}
