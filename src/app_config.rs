use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Which provider to bind for the run
    #[serde(default)]
    pub provider: CheckProvider,

    /// Provider-specific model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Target natural language for prompts and responses
    #[serde(default)]
    pub language: Language,

    /// Maximum number of reattempts for a failed provider call
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Fixed delay between retry attempts, in seconds
    #[serde(default = "default_retry_delay")]
    pub retry_delay: f64,

    /// Number of paragraphs processed before the session is refreshed
    #[serde(default = "default_session_refresh_interval")]
    pub session_refresh_interval: usize,

    /// Free-text supplementary check requirements, applied in order
    #[serde(default)]
    pub additional_checks: Vec<String>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Custom API endpoint; empty string means the provider's public API
    #[serde(default)]
    pub endpoint: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Check provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CheckProvider {
    // @provider: OpenAI
    #[default]
    OpenAI,
    // @provider: Gemini
    Gemini,
}

impl CheckProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::OpenAI => "OpenAI",
            Self::Gemini => "Gemini",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::OpenAI => "openai".to_string(),
            Self::Gemini => "gemini".to_string(),
        }
    }

    // @returns: Environment variable holding this provider's API key
    pub fn api_key_env_var(&self) -> &'static str {
        match self {
            Self::OpenAI => "OPENAI_API_KEY",
            Self::Gemini => "GEMINI_API_KEY",
        }
    }

    // @returns: Default model identifier for this provider
    pub fn default_model(&self) -> String {
        match self {
            Self::OpenAI => "gpt-3.5-turbo".to_string(),
            Self::Gemini => "gemini-pro".to_string(),
        }
    }
}

// Implement Display trait for CheckProvider
impl std::fmt::Display for CheckProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for CheckProvider
impl std::str::FromStr for CheckProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "gemini" => Ok(Self::Gemini),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Target natural language for check prompts
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Chinese,
    English,
}

impl Language {
    // @returns: Human-readable language name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Chinese => "Chinese",
            Self::English => "English",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "chinese" | "zh" | "中文" => Ok(Self::Chinese),
            "english" | "en" => Ok(Self::English),
            _ => Err(anyhow!("Invalid language: {}", s)),
        }
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

fn default_model() -> String {
    CheckProvider::default().default_model()
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay() -> f64 {
    1.0
}

fn default_session_refresh_interval() -> usize {
    3
}

fn default_timeout_secs() -> u64 {
    60
}

impl Config {
    /// Load a configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            anyhow!(
                "Failed to open config file {}: {}",
                path.as_ref().display(),
                e
            )
        })?;
        let config: Config = serde_json::from_str(&content).map_err(|e| {
            anyhow!(
                "Failed to parse config file {}: {}",
                path.as_ref().display(),
                e
            )
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content).map_err(|e| {
            anyhow!(
                "Failed to write config file {}: {}",
                path.as_ref().display(),
                e
            )
        })?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.session_refresh_interval == 0 {
            return Err(anyhow!("session_refresh_interval must be at least 1"));
        }
        if self.retry_delay < 0.0 {
            return Err(anyhow!("retry_delay must not be negative"));
        }
        if self.model.trim().is_empty() {
            return Err(anyhow!("model must not be empty"));
        }
        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            provider: CheckProvider::default(),
            model: default_model(),
            language: Language::default(),
            max_retries: default_max_retries(),
            retry_delay: default_retry_delay(),
            session_refresh_interval: default_session_refresh_interval(),
            additional_checks: Vec::new(),
            timeout_secs: default_timeout_secs(),
            endpoint: String::new(),
            log_level: LogLevel::default(),
        }
    }
}
