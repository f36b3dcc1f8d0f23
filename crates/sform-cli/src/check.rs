//! # Check Subcommand
//!
//! Validates a document against a form schema and reports one message per
//! failing field, exactly as a form would display them.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use sform_schema::{EngineConfig, SchemaValidator, ValidationErrors};

use crate::load::load_document;

/// Arguments for the `sform check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Schema file (JSON or YAML).
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Document to check (JSON or YAML).
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,
}

/// Execute the check subcommand.
///
/// Returns exit code: 0 when the document is valid, 1 when any field fails.
pub fn run_check(args: &CheckArgs, config: &EngineConfig) -> Result<u8> {
    let errors = check_document(&args.schema, &args.document, config)?;

    if errors.is_empty() {
        println!("OK: {}", args.document.display());
        return Ok(0);
    }
    println!("FAIL: {}", args.document.display());
    for line in report_lines(&errors) {
        println!("  {line}");
    }
    Ok(1)
}

/// Load both files and map the document's failures to field messages.
pub fn check_document(
    schema: &Path,
    document: &Path,
    config: &EngineConfig,
) -> Result<ValidationErrors> {
    let schema_value = load_document(schema)?;
    let document_value = load_document(document)?;

    let validator = SchemaValidator::new(&schema_value, config)
        .with_context(|| format!("failed to compile {}", schema.display()))?;
    let errors = validator
        .validation_errors(&document_value)
        .with_context(|| format!("cannot describe failures of {}", document.display()))?;

    tracing::info!(
        document = %document.display(),
        failing_fields = errors.len(),
        "checked document"
    );
    Ok(errors)
}

/// `path: message` lines; the document root shows as `(root)`.
pub fn report_lines(errors: &ValidationErrors) -> Vec<String> {
    errors
        .iter()
        .map(|(path, message)| {
            let path = if path.is_empty() { "(root)" } else { path };
            format!("{path}: {message}")
        })
        .collect()
}
