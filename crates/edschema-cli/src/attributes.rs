//! # Attributes Subcommand
//!
//! Validates attribute batch files. Each file holds one batch as scanned
//! from a script: `{"name": "<source>", "values": [<descriptor>, ...]}`,
//! in JSON or YAML.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use edschema_attributes::{validate_batch, AttributeBatch};
use edschema_schema::load_document;

/// Arguments for `edschema attributes`.
#[derive(Args, Debug)]
pub struct AttributesArgs {
    /// Batch files to validate.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Print only the summary and failures, not the validated tables.
    #[arg(long)]
    pub quiet: bool,
}

/// Execute `edschema attributes`.
///
/// Returns exit code: 0 when every batch validated, 1 otherwise.
pub fn run_attributes(args: &AttributesArgs, out: &mut dyn Write) -> Result<u8> {
    let mut passed = 0usize;

    for file in &args.files {
        let batch = load_batch(file)?;
        match validate_batch(&batch) {
            Ok(table) => {
                passed += 1;
                tracing::info!(source = %batch.name, attributes = table.len(), "batch validated");
                if !args.quiet {
                    writeln!(out, "{}", serde_json::to_string_pretty(&table)?)?;
                }
            }
            Err(errors) => {
                writeln!(out, "FAIL: {} ({} error(s))", file.display(), errors.len())?;
                for error in errors.iter() {
                    writeln!(out, "  {error}")?;
                }
            }
        }
    }

    let total = args.files.len();
    writeln!(out, "Batches: {passed}/{total} passed")?;
    Ok(if passed == total { 0 } else { 1 })
}

fn load_batch(file: &Path) -> Result<AttributeBatch> {
    let doc = load_document(file)
        .with_context(|| format!("failed to load batch {}", file.display()))?;
    serde_json::from_value(doc)
        .with_context(|| format!("{} is not an attribute batch", file.display()))
}
