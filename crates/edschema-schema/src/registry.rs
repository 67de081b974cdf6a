//! # Schema Registry
//!
//! Loads every schema document in a directory into named, frozen trees.
//!
//! ## File Layout
//!
//! Schema files are named `<name>.schema.json`, `<name>.schema.yaml` or
//! `<name>.schema.yml`; the registry key is `<name>` (`scene`, `entity`,
//! `asset`, `material`, `settings`, ...). Other files are ignored.
//!
//! YAML documents are converted into the equivalent JSON value tree
//! before parsing, so both formats share one schema vocabulary.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{SchemaError, SchemaResult};
use crate::tree::SchemaTree;

const SCHEMA_SUFFIXES: &[&str] = &[".schema.json", ".schema.yaml", ".schema.yml"];

/// Named schema trees loaded from one directory.
///
/// ## Thread Safety
///
/// `SchemaRegistry` is `Send + Sync` and read-only after loading; trees
/// handed out by [`get`](Self::get) can be cloned cheaply and shared.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    /// Directory the schemas were loaded from.
    schema_dir: PathBuf,
    /// Map from schema name (file stem before `.schema`) to frozen tree.
    trees: BTreeMap<String, SchemaTree>,
}

impl SchemaRegistry {
    /// Load every schema document in `schema_dir`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::SchemaLoad` if the directory cannot be read
    /// or a schema file is not a valid document, and propagates parse
    /// errors of the schema vocabulary itself.
    pub fn load_dir(schema_dir: impl AsRef<Path>) -> SchemaResult<Self> {
        let schema_dir = schema_dir.as_ref().to_path_buf();
        let mut trees = BTreeMap::new();

        let entries = std::fs::read_dir(&schema_dir).map_err(|e| SchemaError::SchemaLoad {
            schema_name: schema_dir.display().to_string(),
            reason: format!("cannot read schema directory: {e}"),
        })?;

        for entry in entries {
            let path = entry?.path();
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(name) = SCHEMA_SUFFIXES
                .iter()
                .find_map(|suffix| file_name.strip_suffix(suffix))
            else {
                continue;
            };
            let doc = load_document(&path)?;
            let tree = SchemaTree::from_document(&doc)?;
            tracing::debug!(schema = name, path = %path.display(), "loaded schema");
            trees.insert(name.to_string(), tree);
        }

        Ok(Self { schema_dir, trees })
    }

    /// Build a registry from already-frozen trees.
    pub fn from_trees(trees: impl IntoIterator<Item = (String, SchemaTree)>) -> Self {
        Self {
            schema_dir: PathBuf::new(),
            trees: trees.into_iter().collect(),
        }
    }

    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Returns the number of loaded schemas.
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Returns the names of all loaded schemas, sorted alphabetically.
    pub fn names(&self) -> Vec<&str> {
        self.trees.keys().map(String::as_str).collect()
    }

    /// Look up a schema by name.
    pub fn get(&self, name: &str) -> Option<&SchemaTree> {
        self.trees.get(name)
    }
}

/// Read a JSON or YAML document, choosing the format by file extension.
///
/// `.yaml`/`.yml` files are parsed as YAML; everything else as JSON.
pub fn load_document(path: &Path) -> SchemaResult<Value> {
    let schema_name = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| SchemaError::SchemaLoad {
        schema_name: schema_name.clone(),
        reason: format!("cannot read file: {e}"),
    })?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
        "yaml" | "yml" => {
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(&content).map_err(|e| SchemaError::SchemaLoad {
                    schema_name: schema_name.clone(),
                    reason: format!("invalid YAML: {e}"),
                })?;
            yaml_to_json_value(&yaml).map_err(|reason| SchemaError::SchemaLoad {
                schema_name,
                reason: format!("YAML-to-JSON conversion failed: {reason}"),
            })
        }
        _ => serde_json::from_str(&content).map_err(|e| SchemaError::SchemaLoad {
            schema_name,
            reason: format!("invalid JSON: {e}"),
        }),
    }
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Schema documents use only the JSON-compatible subset of YAML. Tags are
/// dropped; non-string map keys are stringified; mapping order is kept so
/// object fields stay in declaration order.
pub fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => seq
            .iter()
            .map(yaml_to_json_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key type: {other:?}")),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_conversion_keeps_order_and_scalars() {
        let yaml_str = r#"
zeta: number
alpha:
  $type: [number]
  $length: 3
  $default: [0, 0, 1.5]
enabled: true
"#;
        let yaml: serde_yaml::Value = serde_yaml::from_str(yaml_str).unwrap();
        let json = yaml_to_json_value(&yaml).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "enabled"]);
        assert_eq!(json["alpha"]["$length"], 3);
        assert_eq!(json["alpha"]["$default"][2], 1.5);
        assert_eq!(json["enabled"], true);
    }

    #[test]
    fn yaml_numeric_keys_are_stringified() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("1: one\n").unwrap();
        let json = yaml_to_json_value(&yaml).unwrap();
        assert_eq!(json["1"], "one");
    }

    #[test]
    fn from_trees_lookup() {
        let tree = SchemaTree::from_document(&serde_json::json!({"name": "string"})).unwrap();
        let registry = SchemaRegistry::from_trees([("entity".to_string(), tree)]);
        assert_eq!(registry.len(), 1);
        assert!(registry.get("entity").is_some());
        assert!(registry.get("asset").is_none());
    }
}
