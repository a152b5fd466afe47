//! ysenv CLI
//!
//! Prints the shell commands that set up a host or launch a container from
//! a single environment document.

mod cli;
mod commands;
mod context;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use context::DocumentLocation;
use error::Result;
use ysenv_core::{InstanceKind, Outcome};

fn main() {
    match run() {
        Ok(outcome) => {
            if outcome.is_success() {
                println!("{}", outcome.text);
            } else {
                eprintln!("{}", outcome.text);
            }
            std::process::exit(outcome.exit_code);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<Outcome> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        if tracing::subscriber::set_global_default(subscriber).is_ok() {
            tracing::debug!("Verbose mode enabled");
        }
    }

    let location = DocumentLocation::resolve(cli.config)?;

    match cli.command {
        Commands::Edit { editor } => Ok(Outcome::success(commands::run_edit(&location, &editor))),
        Commands::Host(target) => {
            commands::run_resolve(&location, InstanceKind::Host, &target, &cli.docker)
        }
        Commands::Docker(target) => {
            commands::run_resolve(&location, InstanceKind::Docker, &target, &cli.docker)
        }
    }
}
