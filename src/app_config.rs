/*!
 * Application configuration.
 *
 * Handles loading, validating, and saving configuration settings from a JSON
 * file (`conf.json` by default). Missing fields fall back to defaults so a
 * partial config file stays usable across upgrades.
 */

use std::path::Path;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::corpus::classify::ClassifyPolicy;
use crate::providers::OpenAiClient;

/// Provider kind for the chat-completion service
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChatProviderKind {
    /// OpenAI API
    #[default]
    OpenAI,
    /// LM Studio or another OpenAI-compatible local server
    LMStudio,
}

impl ChatProviderKind {
    /// Capitalized provider name for display
    pub fn display_name(&self) -> &str {
        match self {
            Self::OpenAI => "OpenAI",
            Self::LMStudio => "LM Studio",
        }
    }
}

impl std::fmt::Display for ChatProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenAI => write!(f, "openai"),
            Self::LMStudio => write!(f, "lmstudio"),
        }
    }
}

impl std::str::FromStr for ChatProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "lmstudio" => Ok(Self::LMStudio),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level
    Error,
    /// Warning level
    Warn,
    /// Info level
    #[default]
    Info,
    /// Debug level
    Debug,
    /// Trace level
    Trace,
}

impl LogLevel {
    /// Convert to a log crate level filter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    1000
}

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Provider kind
    #[serde(default)]
    pub provider: ChatProviderKind,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// API key for the service
    #[serde(default)]
    pub api_key: String,

    /// Service endpoint URL (empty means the provider's public API)
    #[serde(default)]
    pub endpoint: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens per completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Transport-level retry attempts
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Base backoff in milliseconds between transport retries
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Sentence/word classification policy
    #[serde(default)]
    pub classify: ClassifyPolicy,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ChatProviderKind::default(),
            model: default_model(),
            api_key: String::new(),
            endpoint: String::new(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
            classify: ClassifyPolicy::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow!("Failed to read config file: {}", e))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, or create the file with defaults if it
    /// does not exist yet
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            let config = Self::default();
            config.save(&path)?;
            Ok(config)
        }
    }

    /// Save configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| anyhow!("Failed to serialize config: {}", e))?;
        std::fs::write(&path, content)
            .map_err(|e| anyhow!("Failed to write config file: {}", e))?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(anyhow!("Model name cannot be empty"));
        }

        if !self.endpoint.is_empty() {
            url::Url::parse(&self.endpoint)
                .map_err(|e| anyhow!("Invalid endpoint URL '{}': {}", self.endpoint, e))?;
        }

        // The public API needs a key; a local server usually does not.
        if self.provider == ChatProviderKind::OpenAI
            && self.endpoint.is_empty()
            && self.api_key.trim().is_empty()
        {
            return Err(anyhow!("API key is required for the OpenAI provider"));
        }

        Ok(())
    }

    /// Build a provider client from this configuration
    pub fn client(&self) -> OpenAiClient {
        // LM Studio often doesn't require an API key; use a placeholder
        let api_key = if self.provider == ChatProviderKind::LMStudio && self.api_key.is_empty() {
            "lm-studio".to_string()
        } else {
            self.api_key.clone()
        };

        OpenAiClient::new_with_config(
            api_key,
            self.endpoint.clone(),
            self.model.clone(),
            self.temperature,
            self.max_tokens,
            self.retry_count,
            self.retry_backoff_ms,
            self.timeout_secs,
        )
    }
}
