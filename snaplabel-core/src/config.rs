use std::fmt;
use std::str::FromStr;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::error::SnaplabelError;

#[derive(Debug, Deserialize, Clone)]
pub struct SnaplabelConfig {
    pub storage: StorageConfig,
    #[serde(default)]
    pub tables: TablesConfig,
    #[serde(default)]
    pub detection: DetectionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

fn default_key_prefix() -> String {
    "rekognition-input".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct TablesConfig {
    pub beta: String,
    pub prod: String,
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            beta: "beta_results".to_string(),
            prod: "prod_results".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DetectionConfig {
    pub max_labels: i32,
    pub min_confidence: f32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            max_labels: 10,
            min_confidence: 70.0,
        }
    }
}

impl SnaplabelConfig {
    /// Load from an optional TOML file, with `SNAPLABEL_*` environment
    /// overrides (e.g. `SNAPLABEL_STORAGE__BUCKET`). AWS credentials come
    /// from the standard provider chain, never from this config.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("SNAPLABEL")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        s.try_deserialize()
    }

    /// Reject configs that would only fail later, mid-run.
    pub fn validate(&self) -> Result<(), SnaplabelError> {
        if self.storage.bucket.trim().is_empty() {
            return Err(SnaplabelError::InvalidConfig(
                "storage.bucket must not be empty".to_string(),
            ));
        }
        if self.storage.region.trim().is_empty() {
            return Err(SnaplabelError::InvalidConfig(
                "storage.region must not be empty".to_string(),
            ));
        }
        if self.tables.beta.trim().is_empty() || self.tables.prod.trim().is_empty() {
            return Err(SnaplabelError::InvalidConfig(
                "table names must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Which deployment the run writes into. Threaded through the pipeline
/// explicitly; core logic never inspects the ambient environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionContext {
    Beta,
    Production,
}

impl ExecutionContext {
    /// The one piece of branching in the system: context → table, a pure
    /// mapping independent of any image content.
    pub fn table_name<'a>(&self, tables: &'a TablesConfig) -> &'a str {
        match self {
            ExecutionContext::Beta => &tables.beta,
            ExecutionContext::Production => &tables.prod,
        }
    }
}

impl fmt::Display for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionContext::Beta => write!(f, "beta"),
            ExecutionContext::Production => write!(f, "production"),
        }
    }
}

impl FromStr for ExecutionContext {
    type Err = SnaplabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beta" => Ok(ExecutionContext::Beta),
            "production" => Ok(ExecutionContext::Production),
            other => Err(SnaplabelError::InvalidConfig(format!(
                "unknown execution context '{}' (expected beta or production)",
                other
            ))),
        }
    }
}
