//! # Schema Subcommands
//!
//! `type`, `resolve` and `defaults` all take a `SCHEMA` argument: a path
//! to a schema document, or the name of a schema in the configured
//! `schema_dir` (`entity` for `entity.schema.json`).

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use serde_json::{Map, Value};

use edschema_schema::{
    default_data_for_record, load_document, materialize, SchemaPath, SchemaRegistry, SchemaTree,
    StaticProviders,
};

use crate::config::CliConfig;

/// Arguments for `edschema type`.
#[derive(Args, Debug)]
pub struct TypeArgs {
    /// Schema file, or a schema name from the configured schema directory.
    #[arg(value_name = "SCHEMA")]
    pub schema: String,

    /// Dotted path, e.g. `render.materialAssets.0`.
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Exit with status 1 when the path does not resolve.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for `edschema resolve`.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Schema file, or a schema name from the configured schema directory.
    #[arg(value_name = "SCHEMA")]
    pub schema: String,

    /// Dotted path, e.g. `components.script`.
    #[arg(value_name = "PATH")]
    pub path: String,
}

/// Arguments for `edschema defaults`.
#[derive(Args, Debug)]
pub struct DefaultsArgs {
    /// Schema file, or a schema name from the configured schema directory.
    #[arg(value_name = "SCHEMA")]
    pub schema: String,

    /// Object to materialize. Defaults to the schema root.
    #[arg(long)]
    pub path: Option<String>,

    /// JSON or YAML record whose values take precedence over defaults.
    #[arg(long, value_name = "FILE")]
    pub existing: Option<PathBuf>,
}

/// Load `schema` as a file, or by name from the configured registry.
pub fn load_schema(schema: &str, config: &CliConfig) -> Result<SchemaTree> {
    let as_file = Path::new(schema);
    if as_file.is_file() {
        let doc = load_document(as_file)
            .with_context(|| format!("failed to load schema {}", as_file.display()))?;
        return SchemaTree::from_document(&doc)
            .with_context(|| format!("invalid schema {}", as_file.display()));
    }

    let Some(schema_dir) = &config.schema_dir else {
        bail!("schema {schema:?} is not a file and no schema_dir is configured");
    };
    let registry = SchemaRegistry::load_dir(schema_dir)
        .with_context(|| format!("failed to load schemas from {}", schema_dir.display()))?;
    tracing::info!(schema_count = registry.len(), "loaded schema registry");

    match registry.get(schema) {
        Some(tree) => Ok(tree.clone()),
        None => bail!(
            "unknown schema {schema:?}; available: {}",
            registry.names().join(", ")
        ),
    }
}

/// Execute `edschema type`.
///
/// Returns exit code: 0 on success, 1 on a strict-mode miss.
pub fn run_type(args: &TypeArgs, config: &CliConfig, out: &mut dyn Write) -> Result<u8> {
    let tree = load_schema(&args.schema, config)?;
    let path = SchemaPath::parse(&args.path);

    if args.strict || config.strict_paths {
        return match tree.type_at_strict(path) {
            Ok(tag) => {
                writeln!(out, "{tag}")?;
                Ok(0)
            }
            Err(miss) => {
                writeln!(out, "FAIL: {miss}")?;
                Ok(1)
            }
        };
    }

    writeln!(out, "{}", tree.type_at(path))?;
    Ok(0)
}

/// Execute `edschema resolve`.
///
/// Returns exit code: 0 on success, 1 when the path does not resolve.
pub fn run_resolve(args: &ResolveArgs, config: &CliConfig, out: &mut dyn Write) -> Result<u8> {
    let tree = load_schema(&args.schema, config)?;
    match tree.resolve(args.path.as_str()) {
        Some(node) => {
            writeln!(out, "{}", serde_json::to_string_pretty(&node.to_document())?)?;
            Ok(0)
        }
        None => {
            writeln!(out, "FAIL: schema path {:?} does not resolve", args.path)?;
            Ok(1)
        }
    }
}

/// Execute `edschema defaults`.
///
/// Returns exit code: 0 on success, 1 when `--path` does not resolve.
pub fn run_defaults(args: &DefaultsArgs, config: &CliConfig, out: &mut dyn Write) -> Result<u8> {
    let tree = load_schema(&args.schema, config)?;
    let node = match &args.path {
        Some(path) => match tree.resolve(path.as_str()) {
            Some(node) => node,
            None => {
                writeln!(out, "FAIL: schema path {path:?} does not resolve")?;
                return Ok(1);
            }
        },
        None => tree.root(),
    };

    let providers = StaticProviders::from(config.providers.clone());
    let data = match &args.existing {
        Some(file) => {
            let existing = load_record(file)?;
            default_data_for_record(node, existing, &providers)
        }
        None => materialize(node, &providers),
    };

    writeln!(out, "{}", serde_json::to_string_pretty(&Value::Object(data))?)?;
    Ok(0)
}

fn load_record(file: &Path) -> Result<Map<String, Value>> {
    let doc = load_document(file)
        .with_context(|| format!("failed to load record {}", file.display()))?;
    match doc {
        Value::Object(record) => Ok(record),
        other => bail!(
            "record {} must be an object, found {}",
            file.display(),
            edschema_core::json_kind(&other)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_schema(dir: &Path) -> PathBuf {
        let path = dir.join("light.schema.json");
        std::fs::write(
            &path,
            r#"{
                "color": {"$type": ["number"], "$length": 3, "$default": [1, 1, 1]},
                "intensity": {"$type": "number", "$default": 1},
                "cookie": {"$type": "number", "$editorType": "asset", "$default": {"$provider": "cookie"}}
            }"#,
        )
        .unwrap();
        path
    }

    #[test]
    fn load_schema_by_file_and_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_schema(dir.path());

        let config = CliConfig::default();
        assert!(load_schema(file.to_str().unwrap(), &config).is_ok());
        assert!(load_schema("light", &config).is_err());

        let config = CliConfig {
            schema_dir: Some(dir.path().to_path_buf()),
            ..CliConfig::default()
        };
        assert!(load_schema("light", &config).is_ok());
        let err = load_schema("camera", &config).unwrap_err();
        assert!(err.to_string().contains("light"));
    }

    #[test]
    fn strict_type_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_schema(dir.path());
        let args = TypeArgs {
            schema: file.display().to_string(),
            path: "missing".to_string(),
            strict: false,
        };

        let mut out = Vec::new();
        assert_eq!(run_type(&args, &CliConfig::default(), &mut out).unwrap(), 0);
        assert_eq!(String::from_utf8(out).unwrap(), "string\n");

        let strict = CliConfig {
            strict_paths: true,
            ..CliConfig::default()
        };
        let mut out = Vec::new();
        assert_eq!(run_type(&args, &strict, &mut out).unwrap(), 1);
    }

    #[test]
    fn record_must_be_an_object() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("record.json");
        std::fs::write(&file, "[1, 2]").unwrap();
        assert!(load_record(&file).is_err());
    }
}
