//! Read-only configuration store
//!
//! A flat JSON object read once at startup. Lookups never fail: a missing or
//! mistyped key yields the caller's default.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Map, Value};

pub const HIGH_BITRATE: &str = "high_bitrate";
pub const OFFLINE_HIGH_BITRATE: &str = "offline_high_bitrate";
pub const SEARCH_RESULTS: &str = "search_results";

#[derive(Clone, Debug, Default)]
pub struct Config {
    values: Map<String, Value>,
}

impl Config {
    /// Loads `path`; a missing file gives an empty store.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(config_file = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(values) => Ok(Self { values }),
            other => anyhow::bail!("configuration must be a JSON object, got {other}"),
        }
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.values.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(other) => {
                tracing::warn!(key, value = %other, "Not a boolean, using default {}", default);
                default
            }
            None => default,
        }
    }

    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        match self.values.get(key).map(Value::as_i64) {
            Some(Some(n)) => n,
            Some(None) => {
                tracing::warn!(key, "Not an integer, using default {}", default);
                default
            }
            None => default,
        }
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }
}
