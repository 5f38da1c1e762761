//! Engine configuration.
//!
//! Configuration adds designated value types and capability defaults on top
//! of the built-in tables. It is read once, when an engine is built:
//!
//! ```json
//! {
//!   "value_types": ["Money"],
//!   "defaults": [
//!     { "capability": "sequence-like", "operation": "index_of",
//!       "value": { "kind": "i32", "value": -2 } }
//!   ]
//! }
//! ```
//!
//! The process-wide engine reads `SAFE_NAV_CONFIG` (path to such a file) and
//! `SAFE_NAV_VALUE_TYPES` (comma-separated type names).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use safe_nav_types::env_utils::{env_list, env_path};
use safe_nav_types::Capability;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::value::Value;

/// Path to a JSON configuration file.
pub const CONFIG_PATH_ENV: &str = "SAFE_NAV_CONFIG";
/// Comma-separated list of extra value type names.
pub const VALUE_TYPES_ENV: &str = "SAFE_NAV_VALUE_TYPES";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Extra non-wrappable type names.
    pub value_types: Vec<String>,
    /// Extra or overriding (capability, operation) defaults.
    pub defaults: Vec<DefaultOverride>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultOverride {
    pub capability: Capability,
    pub operation: String,
    pub value: DefaultLiteral,
}

/// A default value as written in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DefaultLiteral {
    Absent,
    Unit,
    Bool(bool),
    I32(i32),
    I64(i64),
    F64(f64),
    Text(String),
}

impl From<DefaultLiteral> for Value {
    fn from(literal: DefaultLiteral) -> Self {
        match literal {
            DefaultLiteral::Absent => Value::Absent,
            DefaultLiteral::Unit => Value::Unit,
            DefaultLiteral::Bool(b) => Value::Bool(b),
            DefaultLiteral::I32(n) => Value::I32(n),
            DefaultLiteral::I64(n) => Value::I64(n),
            DefaultLiteral::F64(x) => Value::F64(x),
            DefaultLiteral::Text(s) => Value::Text(s),
        }
    }
}

impl EngineConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("Failed to parse engine configuration")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read engine configuration {}", path.display()))?;
        let config = Self::from_json(&raw)
            .with_context(|| format!("Invalid engine configuration in {}", path.display()))?;
        debug!(
            path = %path.display(),
            value_types = config.value_types.len(),
            defaults = config.defaults.len(),
            "loaded engine configuration"
        );
        Ok(config)
    }

    /// Configuration from `SAFE_NAV_CONFIG` and `SAFE_NAV_VALUE_TYPES`.
    /// Missing variables yield an empty configuration.
    pub fn from_env() -> Result<Self> {
        Self::from_sources(env_path(CONFIG_PATH_ENV), env_list(VALUE_TYPES_ENV))
    }

    /// File first, then the extra value type names on top.
    pub fn from_sources(path: Option<PathBuf>, value_types: Vec<String>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(&path)?,
            None => Self::default(),
        };
        config.merge(EngineConfig {
            value_types,
            defaults: Vec::new(),
        });
        Ok(config)
    }

    /// Append `other`. Later defaults win when the engine applies them.
    pub fn merge(&mut self, other: EngineConfig) {
        for name in other.value_types {
            if !self.value_types.contains(&name) {
                self.value_types.push(name);
            }
        }
        self.defaults.extend(other.defaults);
    }
}
