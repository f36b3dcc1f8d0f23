//! # sform CLI entry point
//!
//! Parses command-line arguments, loads the engine configuration and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sform_cli::check::{run_check, CheckArgs};
use sform_cli::editor::{run_editor, EditorArgs};
use sform_cli::load::load_config;
use sform_cli::normalize::{run_normalize, NormalizeArgs};

/// Schema-driven form tooling.
///
/// Prepares JSON Schemas for form editing, reports validation failures the
/// way a form shows them, and resolves the control used for each field.
#[derive(Parser, Debug)]
#[command(name = "sform", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Engine configuration file (YAML or JSON).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a schema with every optional field made nullable.
    Normalize(NormalizeArgs),

    /// Validate a document and print one message per failing field.
    Check(CheckArgs),

    /// Print the editor and empty value for the schema node at a path.
    Editor(EditorArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(2);
        }
    };
    tracing::debug!(?config, "sform starting");

    let result = match cli.command {
        Commands::Normalize(args) => run_normalize(&args, &config),
        Commands::Check(args) => run_check(&args, &config),
        Commands::Editor(args) => run_editor(&args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
