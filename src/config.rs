//! Configuration types for pet-value

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::resolver::DEFAULT_THRESHOLD;
use crate::telemetry::LogFormat;
use crate::valuation::{ModelTable, Revision};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub valuation: ValuationConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Valuation model configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValuationConfig {
    /// Preset model table
    #[serde(default)]
    pub revision: Revision,

    /// Model-table overrides, merged field by field over the revision preset
    #[serde(default)]
    pub model: Option<toml::Table>,
}

/// Category resolver and prompt configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Minimum similarity score (0-100) for a fuzzy match
    #[serde(default = "default_threshold")]
    pub threshold: u8,

    /// Attempts per numeric prompt before the calculation restarts
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_threshold() -> u8 {
    DEFAULT_THRESHOLD
}
fn default_max_attempts() -> u32 {
    5
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            max_attempts: 5,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.model_table()?;
        Ok(config)
    }

    /// The model table in effect: the revision preset with any
    /// `[valuation.model]` overrides applied
    pub fn model_table(&self) -> anyhow::Result<ModelTable> {
        let preset = self.valuation.revision.table();
        let Some(overrides) = &self.valuation.model else {
            return Ok(preset);
        };

        let mut merged = toml::Value::try_from(&preset)?;
        if let toml::Value::Table(base) = &mut merged {
            merge_tables(base, overrides);
        }
        let table: ModelTable = merged
            .try_into()
            .context("Invalid [valuation.model] override")?;
        Ok(table)
    }
}

/// Recursively overlay `overrides` onto `base`
///
/// A table carrying a `kind` tag selects an enum variant and replaces the
/// base entry whole.
fn merge_tables(base: &mut toml::Table, overrides: &toml::Table) {
    for (key, value) in overrides {
        if let (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) =
            (base.get_mut(key), value)
        {
            if !incoming.contains_key("kind") {
                merge_tables(existing, incoming);
                continue;
            }
        }
        base.insert(key.clone(), value.clone());
    }
}
