//! # Normalize Subcommand

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use sform_schema::{null_optionals_allowed_for, EngineConfig};

use crate::load::load_document;

/// Arguments for the `sform normalize` subcommand.
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Schema file (JSON or YAML).
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,
}

/// Print the normalized schema as pretty JSON. Always exits 0 on success.
///
/// The configured draft decides how keywords next to a `$ref` are kept.
pub fn run_normalize(args: &NormalizeArgs, config: &EngineConfig) -> Result<u8> {
    let schema = load_document(&args.schema)?;
    let normalized = null_optionals_allowed_for(&schema, config.draft);
    let text = serde_json::to_string_pretty(&normalized).context("failed to render schema")?;
    println!("{text}");
    Ok(0)
}
