//! # edschema-cli: Command-Line Front End
//!
//! Provides the `edschema` command-line interface over the schema and
//! attribute crates.
//!
//! ## Subcommands
//!
//! - `edschema type`: derived type tag of a schema path.
//! - `edschema resolve`: the schema node at a path, as a document.
//! - `edschema defaults`: materialized defaults, optionally merged with
//!   existing record data.
//! - `edschema attributes`: validate script attribute batch files.
//!
//! ```bash
//! edschema type entity position
//! edschema --config edschema.yaml defaults settings --path render
//! edschema attributes scan/player.json scan/door.json
//! ```
//!
//! ## Exit Codes
//!
//! `0` on success, `1` when a lookup misses or validation fails, `2` on
//! operational errors (unreadable files, malformed schemas, bad config).

pub mod attributes;
pub mod config;
pub mod schema;

use std::path::{Path, PathBuf};

/// Anchor a relative path at `base`. Absolute paths are returned as-is.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
