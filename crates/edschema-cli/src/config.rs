//! CLI configuration.
//!
//! Settings are layered, later layers winning:
//!
//! 1. built-in defaults;
//! 2. a YAML or JSON file named by `--config` or `EDSCHEMA_CONFIG`;
//! 3. the environment: `EDSCHEMA_STRICT_PATHS` and `EDSCHEMA_LOG`.
//!
//! A relative `schema_dir` in a config file is taken relative to the
//! file's directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "EDSCHEMA_CONFIG";
/// Environment variable overriding `strict_paths`.
pub const STRICT_PATHS_ENV: &str = "EDSCHEMA_STRICT_PATHS";
/// Environment variable overriding `log_filter`.
pub const LOG_ENV: &str = "EDSCHEMA_LOG";

/// Settings shared by every subcommand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Report unresolved paths instead of answering `string`.
    pub strict_paths: bool,
    /// `tracing` filter directive, e.g. `edschema_schema=debug`.
    pub log_filter: Option<String>,
    /// Values handed to deferred defaults, keyed by provider name.
    pub providers: BTreeMap<String, Value>,
    /// Directory of `*.schema.json|yaml` files addressable by name.
    pub schema_dir: Option<PathBuf>,
}

impl CliConfig {
    /// Load the configuration from the process environment.
    ///
    /// `file` is the `--config` argument; when absent, `EDSCHEMA_CONFIG`
    /// is consulted.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(file, |var| std::env::var(var).ok())
    }

    /// Load the configuration with an explicit environment lookup.
    pub fn load_with(
        file: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let file = file
            .map(Path::to_path_buf)
            .or_else(|| env(CONFIG_ENV).filter(|p| !p.is_empty()).map(PathBuf::from));

        let mut config = match file {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        if let Some(raw) = env(STRICT_PATHS_ENV) {
            config.strict_paths = parse_bool(&raw).ok_or(ConfigError::InvalidEnv {
                var: STRICT_PATHS_ENV,
                value: raw,
            })?;
        }
        if let Some(filter) = env(LOG_ENV).filter(|f| !f.is_empty()) {
            config.log_filter = Some(filter);
        }

        Ok(config)
    }

    /// Read a config file. Relative `schema_dir` entries are anchored at
    /// the file's directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        if let (Some(dir), Some(base)) = (config.schema_dir.take(), path.parent()) {
            config.schema_dir = Some(crate::resolve_path(&dir, base));
        }
        Ok(config)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("invalid value {value:?} for {var}: expected true or false")]
    InvalidEnv { var: &'static str, value: String },
}
