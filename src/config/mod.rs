//! Configuration management for twittp
//!
//! Settings come from a TOML file, from `TWITTP_*` environment variables,
//! or from the defaults below. The experiment tunables (minimum trend
//! length, lead-in windows, distance weights, sampling seed) live here so
//! runs can be reproduced with different parameters.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::feed::NameSampling;
use crate::series::{CellWeights, DEFAULT_WINDOW_SIZE};

/// Shortest positive trend kept, in windows
pub const MINIMUM_TREND_SIZE: usize = 15;

/// Unlabeled windows prepended to each positive trend
pub const LEAD_IN_WINDOWS: usize = 90;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model construction settings
    pub pipeline: PipelineConfig,

    /// Distance settings
    pub distance: DistanceConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Model construction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Window width in seconds
    pub window_size: i64,

    /// Positive trends shorter than this many windows are dropped
    pub minimum_trend_size: usize,

    /// Unlabeled windows prepended before each positive trend
    pub lead_in_windows: usize,

    /// Seed for negative line placement and weighted name sampling
    pub seed: u64,

    /// How negative names are drawn from the word-frequency model
    pub name_sampling: NameSampling,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            minimum_trend_size: MINIMUM_TREND_SIZE,
            lead_in_windows: LEAD_IN_WINDOWS,
            seed: 0,
            name_sampling: NameSampling::Greedy,
        }
    }
}

/// Distance settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistanceConfig {
    /// Per-feature multipliers of the cell distance
    pub weights: CellWeights,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env();
        Ok(config)
    }

    /// Overlay any `TWITTP_*` environment variables onto this configuration
    pub fn apply_env(&mut self) {
        if let Some(v) = env_parse("TWITTP_WINDOW_SIZE") {
            self.pipeline.window_size = v;
        }
        if let Some(v) = env_parse("TWITTP_MINIMUM_TREND_SIZE") {
            self.pipeline.minimum_trend_size = v;
        }
        if let Some(v) = env_parse("TWITTP_LEAD_IN_WINDOWS") {
            self.pipeline.lead_in_windows = v;
        }
        if let Some(v) = env_parse("TWITTP_SEED") {
            self.pipeline.seed = v;
        }
        if let Some(v) = std::env::var("TWITTP_NAME_SAMPLING")
            .ok()
            .and_then(|v| NameSampling::parse(&v))
        {
            self.pipeline.name_sampling = v;
        }
        if let Ok(level) = std::env::var("TWITTP_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("TWITTP_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.pipeline.window_size <= 0 {
            anyhow::bail!("window_size must be positive");
        }

        if self.pipeline.minimum_trend_size == 0 {
            anyhow::bail!("minimum_trend_size must be greater than 0");
        }

        if !self.distance.weights.is_valid() {
            anyhow::bail!("distance weights must be finite and non-negative");
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            anyhow::bail!("log format must be 'text' or 'json'");
        }

        Ok(())
    }
}
