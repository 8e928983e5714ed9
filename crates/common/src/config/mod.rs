//! Configuration management for bibgraph
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config/default, config/{APP_ENV}, config/local)
//! - Default values

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Corpus loading configuration
    #[serde(default)]
    pub loader: LoaderConfig,

    /// Dataset output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoaderConfig {
    /// Substring a file path must contain to be treated as source markup
    #[serde(default = "default_source_marker")]
    pub source_marker: String,

    /// Maximum number of files read and extracted at the same time
    #[serde(default = "default_max_concurrent_files")]
    pub max_concurrent_files: usize,

    /// Log and skip files that fail to parse instead of aborting the run
    #[serde(default)]
    pub skip_malformed: bool,

    /// Require a non-empty title and author list before a record enters
    /// the citation dataset
    #[serde(default = "default_require_complete")]
    pub require_complete_records: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Pretty-print JSON output
    #[serde(default)]
    pub pretty: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logging: bool,

    /// File receiving the metrics snapshot of a run
    #[serde(default)]
    pub metrics_output: Option<String>,
}

// Default value functions
fn default_source_marker() -> String { crate::DEFAULT_SOURCE_MARKER.to_string() }
fn default_max_concurrent_files() -> usize { 64 }
fn default_require_complete() -> bool { true }
fn default_log_level() -> String { "info".to_string() }

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            source_marker: default_source_marker(),
            max_concurrent_files: default_max_concurrent_files(),
            skip_malformed: false,
            require_complete_records: default_require_complete(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: false,
            metrics_output: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            loader: LoaderConfig::default(),
            output: OutputConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Start with defaults
            .set_default("loader.source_marker", crate::DEFAULT_SOURCE_MARKER)?
            .set_default("loader.max_concurrent_files", 64)?

            // Load base config file
            .add_source(File::with_name("config/default").required(false))

            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))

            // Load local overrides
            .add_source(File::with_name("config/local").required(false))

            // e.g., APP__LOADER__SKIP_MALFORMED=true
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
            )

            .build()?;

        let loaded: Self = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Load from a specific config file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
            )
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject values the loader cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.loader.max_concurrent_files == 0 {
            return Err(ConfigError::Message(
                "loader.max_concurrent_files must be at least 1".to_string(),
            ));
        }
        if self.loader.source_marker.is_empty() {
            return Err(ConfigError::Message(
                "loader.source_marker must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
