//! overmodel CLI
//!
//! Compiles layered model directories and applies rendered templates to
//! live files.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose)
        .map_err(|e| CliError::user(format!("Failed to initialize logging: {e}")))?;
    tracing::debug!("Verbose mode enabled");

    match cli.command {
        Some(Commands::Apply(args)) => commands::run_apply(&args),
        Some(Commands::Compile(args)) => commands::run_compile(&args),
        None => {
            println!("{} layered configuration renderer", "overmodel".green().bold());
            println!();
            println!("Run {} for available commands.", "overmodel --help".cyan());
            Ok(())
        }
    }
}
