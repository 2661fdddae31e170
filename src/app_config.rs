/*!
 * Application configuration.
 *
 * Configuration lives in a JSON file that is created with defaults when
 * missing. Every field has a serde default, so partial files load. Validation
 * failures are reported as `AppError::Config`.
 */

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::errors::AppError;
use crate::language_utils;

/// Settings shared by every translating subcommand
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Default source language code (ISO) or `auto`
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Default target language code (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Translation provider config
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Pipeline tuning
    #[serde(default)]
    pub pipeline: PipelineSettings,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Provider configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier, looked up in the provider registry
    #[serde(rename = "type", default = "default_provider_type")]
    pub provider_type: String,

    // @field: Service URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: HTTP timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Confidence assumed when the service reports none
    #[serde(default = "default_confidence")]
    pub default_confidence: f64,

    // @field: Providers tried in order when this one gives no usable result
    #[serde(default)]
    pub fallbacks: Vec<ProviderConfig>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: default_provider_type(),
            endpoint: default_endpoint(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            default_confidence: default_confidence(),
            fallbacks: Vec::new(),
        }
    }
}

impl ProviderConfig {
    /// Validate this provider and its fallbacks
    pub fn validate(&self) -> Result<(), AppError> {
        if self.provider_type.trim().is_empty() {
            return Err(AppError::Config("Provider type must not be empty".to_string()));
        }

        if self.provider_type.eq_ignore_ascii_case("libretranslate") {
            Url::parse(&self.endpoint).map_err(|e| {
                AppError::Config(format!("Invalid provider endpoint '{}': {}", self.endpoint, e))
            })?;
        }

        if !(0.0..=1.0).contains(&self.default_confidence) {
            return Err(AppError::Config(format!(
                "default_confidence must be within 0.0 - 1.0, got {}",
                self.default_confidence
            )));
        }

        if self.timeout_secs == 0 {
            return Err(AppError::Config("Provider timeout must be at least 1 second".to_string()));
        }

        for fallback in &self.fallbacks {
            fallback.validate()?;
        }

        Ok(())
    }
}

/// Pipeline tuning parameters
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PipelineSettings {
    /// Maximum translation attempts per request, first attempt included
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Bound on a single provider call, in seconds
    #[serde(default = "default_provider_timeout_secs")]
    pub provider_timeout_secs: u64,

    /// Maximum pipeline runs in flight for a batch
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,

    /// Maximum number of texts accepted in one batch
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            provider_timeout_secs: default_provider_timeout_secs(),
            max_concurrent_requests: default_max_concurrent_requests(),
            max_batch_size: default_max_batch_size(),
        }
    }
}

impl PipelineSettings {
    /// Provider call timeout, clamped to 1 - 60 seconds
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs.clamp(1, 60))
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching `log` filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    language_utils::AUTO_DETECT.to_string()
}

fn default_target_language() -> String {
    "es".to_string()
}

fn default_provider_type() -> String {
    "libretranslate".to_string()
}

fn default_endpoint() -> String {
    "https://libretranslate.com/".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_confidence() -> f64 {
    0.8
}

fn default_max_attempts() -> u32 {
    3
}

fn default_provider_timeout_secs() -> u64 {
    10
}

fn default_max_concurrent_requests() -> usize {
    5
}

fn default_max_batch_size() -> usize {
    50
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), AppError> {
        language_utils::validate_source_language(&self.source_language).map_err(|e| {
            AppError::Config(format!("Invalid source language '{}': {}", self.source_language, e))
        })?;
        language_utils::validate_language_code(&self.target_language).map_err(|e| {
            AppError::Config(format!("Invalid target language '{}': {}", self.target_language, e))
        })?;

        self.provider.validate()?;

        if self.pipeline.max_attempts == 0 {
            return Err(AppError::Config("max_attempts must be at least 1".to_string()));
        }
        if self.pipeline.max_concurrent_requests == 0 {
            return Err(AppError::Config("max_concurrent_requests must be at least 1".to_string()));
        }
        if self.pipeline.max_batch_size == 0 {
            return Err(AppError::Config("max_batch_size must be at least 1".to_string()));
        }

        Ok(())
    }

    /// Load a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save the configuration as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Load the configuration, writing a default one if the file is missing
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::from_file(path);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            provider: ProviderConfig::default(),
            pipeline: PipelineSettings::default(),
            log_level: LogLevel::default(),
        }
    }
}
