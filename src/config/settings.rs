//! ODM configuration file
//!
//! ```toml
//! iteration_order = "declaration"   # or "reverse_declaration"
//!
//! [write_defaults]
//! safe = true
//! upsert = false
//! ```
//!
//! Keys in `[write_defaults]` override the built-in write defaults; built-in
//! keys the file leaves out are kept.

use odm_roster::IterOrder;
use odm_types::Value;
use std::fs;
use std::path::Path;

use super::defaults::WriteDefaults;
use super::merge::{merge_options, Options};

/// Top-level keys accepted in a config file
const KNOWN_KEYS: &[&str] = &["iteration_order", "write_defaults"];

/// Resolved ODM configuration
#[derive(Debug, Clone, PartialEq)]
pub struct OdmConfig {
    /// State visiting order for roster queries that name no states
    pub iteration_order: IterOrder,

    /// Defaults every per-call write options object is merged over
    pub write_defaults: Options,
}

impl Default for OdmConfig {
    fn default() -> Self {
        Self {
            iteration_order: IterOrder::default(),
            write_defaults: WriteDefaults::default().to_options(),
        }
    }
}

impl OdmConfig {
    /// Parse a TOML config document
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let table: toml::Table = toml::from_str(contents)
            .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))?;

        if let Some(unknown) = table.keys().find(|k| !KNOWN_KEYS.contains(&k.as_str())) {
            return Err(ConfigError::ValidationError(format!(
                "unknown config key '{}'",
                unknown
            )));
        }

        let mut config = Self::default();

        if let Some(order) = table.get("iteration_order") {
            config.iteration_order = order.clone().try_into().map_err(|e: toml::de::Error| {
                ConfigError::ValidationError(format!("iteration_order: {}", e))
            })?;
        }

        if let Some(write) = table.get("write_defaults") {
            let toml::Value::Table(write) = write else {
                return Err(ConfigError::ValidationError(
                    "write_defaults must be a table".to_string(),
                ));
            };
            let mut from_file: Options = write
                .iter()
                .map(|(k, v)| (k.clone(), toml_to_value(v.clone())))
                .collect();
            config.write_defaults = merge_options(&config.write_defaults, Some(&mut from_file));
        }

        Ok(config)
    }

    /// Load a TOML config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }
}

/// Convert a TOML value to a document value
fn toml_to_value(toml: toml::Value) -> Value {
    match toml {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Int(i),
        toml::Value::Float(f) => Value::Double(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_value).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_value(v)))
                .collect(),
        ),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
