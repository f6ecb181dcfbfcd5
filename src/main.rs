//! CLI entry point for graphwire
//!
//! Inspects definition documents: lint them, print resolved parameters and
//! list services. Building services needs the application's class registry,
//! so it happens in the host program, not here.

use anyhow::Context;
use clap::{Parser, Subcommand};
use graphwire::Document;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser, Debug)]
#[command(name = "graphwire")]
#[command(about = "Inspect service and parameter definition documents")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lint a document; exits with status 1 when errors are found
    Check {
        /// Definition document (JSON)
        file: PathBuf,
    },
    /// Print resolved parameters
    Params {
        /// Definition document (JSON)
        file: PathBuf,
        /// Print only this parameter
        name: Option<String>,
    },
    /// List services and the shape of their definitions
    Services {
        /// Definition document (JSON)
        file: PathBuf,
    },
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(args.command) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(2);
        }
    }
}

/// Returns whether the command succeeded
fn run(command: Command) -> anyhow::Result<bool> {
    let mut stdout = std::io::stdout().lock();

    match command {
        Command::Check { file } => {
            let document = load(&file)?;
            let result = graphwire::cli::run_check(&document, &mut stdout)?;
            Ok(!result.has_errors())
        }
        Command::Params { file, name } => {
            let document = load(&file)?;
            graphwire::cli::run_params(&document, name.as_deref(), &mut stdout)?;
            Ok(true)
        }
        Command::Services { file } => {
            let document = load(&file)?;
            graphwire::cli::run_services(&document, &mut stdout)?;
            Ok(true)
        }
    }
}

fn load(file: &Path) -> anyhow::Result<Document> {
    log::debug!("Loading document '{}'", file.display());
    Document::from_path(file).with_context(|| format!("Cannot use '{}'", file.display()))
}
