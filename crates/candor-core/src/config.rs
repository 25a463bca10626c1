//! Configuration for the moderation and rewrite services and the review policy.
//!
//! Configuration is a JSON file with every field optional, overlaid by
//! environment variables:
//!
//! - `OPENAI_API_KEY`
//! - `CANDOR_OPENAI_BASE_URL`
//! - `CANDOR_OPENAI_MODEL`

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CandorError, Result};

/// Default OpenAI-compatible API base URL.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model for rewrite suggestions.
pub const DEFAULT_REWRITE_MODEL: &str = "gpt-4o-mini";

/// Default output bound for rewrite completions.
pub const DEFAULT_REWRITE_MAX_TOKENS: u32 = 500;

/// Default sampling temperature for rewrite completions.
pub const DEFAULT_REWRITE_TEMPERATURE: f32 = 0.7;

/// Default score above which hate, harassment, or violence forces review.
pub const DEFAULT_SEVERITY_THRESHOLD: f32 = 0.8;

/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_API_KEY: &str = "OPENAI_API_KEY";
const ENV_BASE_URL: &str = "CANDOR_OPENAI_BASE_URL";
const ENV_MODEL: &str = "CANDOR_OPENAI_MODEL";

/// Settings for the OpenAI-compatible moderation and completion endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// API key sent as a bearer token.
    pub api_key: Option<String>,
    /// Base URL, without a trailing slash.
    pub base_url: String,
    /// Chat model used for rewrites.
    pub rewrite_model: String,
    /// Moderation model; the service default is used when unset.
    pub moderation_model: Option<String>,
    /// Maximum output tokens per rewrite completion.
    pub rewrite_max_tokens: u32,
    /// Sampling temperature for rewrite completions.
    pub rewrite_temperature: f32,
    /// HTTP timeout for each outbound call.
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            rewrite_model: DEFAULT_REWRITE_MODEL.to_string(),
            moderation_model: None,
            rewrite_max_tokens: DEFAULT_REWRITE_MAX_TOKENS,
            rewrite_temperature: DEFAULT_REWRITE_TEMPERATURE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl OpenAiConfig {
    /// Creates a config pointing at a specific base URL (e.g. a local mock).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Sets the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Returns true if an API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    /// Joins an endpoint path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Builds the HTTP client shared by the moderation and completion adapters.
    pub fn build_client(&self) -> Result<reqwest::Client> {
        let client = reqwest::Client::builder()
            .user_agent(format!("Candor/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()?;
        Ok(client)
    }
}

/// Review policy settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Scores strictly above this force review (0.0 to 1.0).
    pub severity_threshold: f32,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            severity_threshold: DEFAULT_SEVERITY_THRESHOLD,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandorConfig {
    pub openai: OpenAiConfig,
    pub policy: PolicyConfig,
}

impl CandorConfig {
    /// Returns the default config file location for this platform.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "candor", "Candor").map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Loads and validates a config file. Environment overrides are not applied.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            CandorError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config: CandorConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolves configuration the way the binary does.
    ///
    /// An explicit path must exist. Without one, the platform default path is
    /// used if present, otherwise built-in defaults. Environment overrides are
    /// applied last.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::load(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => {
                    debug!("Loading config from {:?}", path);
                    Self::load(path)?
                }
                None => Self::default(),
            },
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Applies overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from an arbitrary key lookup.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(ENV_API_KEY).filter(|v| !v.is_empty()) {
            self.openai.api_key = Some(key);
        }
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.is_empty()) {
            self.openai.base_url = url;
        }
        if let Some(model) = lookup(ENV_MODEL).filter(|v| !v.is_empty()) {
            self.openai.rewrite_model = model;
        }
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<()> {
        let threshold = self.policy.severity_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(CandorError::Config(format!(
                "severity_threshold must be within 0.0..=1.0, got {}",
                threshold
            )));
        }

        let temperature = self.openai.rewrite_temperature;
        if !(0.0..=2.0).contains(&temperature) {
            return Err(CandorError::Config(format!(
                "rewrite_temperature must be within 0.0..=2.0, got {}",
                temperature
            )));
        }

        if self.openai.rewrite_max_tokens == 0 {
            return Err(CandorError::Config(
                "rewrite_max_tokens must be positive".to_string(),
            ));
        }

        if self.openai.base_url.trim().is_empty() {
            return Err(CandorError::Config("base_url must not be empty".to_string()));
        }

        Ok(())
    }
}
