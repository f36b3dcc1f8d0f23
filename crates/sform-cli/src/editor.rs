//! # Editor Subcommand
//!
//! Shows which control a form would render for a schema node, and the value
//! a freshly revealed field would start with.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use sform_core::decode;
use sform_schema::{
    editor_for_schema, empty_value, null_optionals_allowed_for, schema_at_path, EngineConfig,
};

use crate::load::load_document;

/// Arguments for the `sform editor` subcommand.
#[derive(Args, Debug)]
pub struct EditorArgs {
    /// Schema file (JSON or YAML).
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// JSON Pointer into the form value, e.g. `/lines/0/sku`. Defaults to
    /// the root.
    #[arg(value_name = "POINTER", default_value = "")]
    pub pointer: String,
}

/// Execute the editor subcommand.
pub fn run_editor(args: &EditorArgs, config: &EngineConfig) -> Result<u8> {
    let (editor, empty) = editor_at(&args.schema, &args.pointer, config)?;
    println!("editor: {editor}");
    println!("empty: {empty}");
    Ok(0)
}

/// Resolve the editor identifier and empty value at `pointer`.
pub fn editor_at(schema: &Path, pointer: &str, config: &EngineConfig) -> Result<(String, Value)> {
    let mut root = load_document(schema)?;
    if config.normalize {
        root = null_optionals_allowed_for(&root, config.draft);
    }
    let path = decode(pointer);
    let node = schema_at_path(&root, &path)
        .with_context(|| format!("no schema node at '{pointer}' in {}", schema.display()))?;
    let editor = editor_for_schema(node)?;
    Ok((editor, empty_value(Some(node))))
}
