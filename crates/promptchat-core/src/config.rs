//! Configuration types for the promptchat runtime.
//!
//! Defaults reproduce the plain behaviour (model `gpt-4o-mini`, the OpenAI
//! endpoint, token read from `api_key.txt`). An optional `promptchat.toml`
//! may override any of them; templates themselves are not configurable.

use crate::client::ClientOptions;
use crate::error::{ChatError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default API base URL (without the `/chat/completions` suffix).
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Main promptchat configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChatConfig {
    /// Model identifier sent with each request.
    pub model: String,

    /// Base URL of the chat completion API.
    pub base_url: String,

    /// Path to the plain-text credential file.
    pub credential_path: PathBuf,

    /// Sampling temperature; provider default when unset.
    pub temperature: Option<f32>,

    /// Maximum tokens in the reply; provider default when unset.
    pub max_tokens: Option<u32>,

    /// Request timeout in seconds; transport default when unset.
    pub timeout_secs: Option<u64>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            credential_path: PathBuf::from(crate::Credential::DEFAULT_FILE),
            temperature: None,
            max_tokens: None,
            timeout_secs: None,
        }
    }
}

impl ChatConfig {
    /// Default config file name, looked up in the working directory.
    pub const DEFAULT_FILE: &'static str = "promptchat.toml";

    /// Loads configuration from a TOML file.
    ///
    /// A missing file yields the defaults; present fields override them.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::ConfigRead`] if the file exists but cannot be read,
    /// [`ChatError::ConfigParse`] for invalid TOML or unknown fields, and
    /// [`ChatError::InvalidConfig`] for out of range values.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ChatError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml(&content)?;
        debug!(path = %path.display(), model = %config.model, "loaded config");
        Ok(config)
    }

    /// Parses and validates configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Same as [`ChatConfig::load`], minus the IO error.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| ChatError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::InvalidConfig`] describing the first bad field.
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(ChatError::InvalidConfig("model must not be empty".into()));
        }
        if self.base_url.trim().is_empty() {
            return Err(ChatError::InvalidConfig("base_url must not be empty".into()));
        }
        if let Some(t) = self.temperature
            && !(0.0..=2.0).contains(&t)
        {
            return Err(ChatError::InvalidConfig(format!(
                "temperature must be between 0 and 2, got {t}"
            )));
        }
        if self.max_tokens == Some(0) {
            return Err(ChatError::InvalidConfig("max_tokens must be positive".into()));
        }
        if self.timeout_secs == Some(0) {
            return Err(ChatError::InvalidConfig("timeout_secs must be positive".into()));
        }
        Ok(())
    }

    /// Request options derived from this configuration.
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}
