//! Rewrite suggestions for flagged text.
//!
//! One completion call per request. Failures never surface as errors: the
//! caller gets a [`RewriteResult`] with no rewrites and falls back to manual
//! editing.

mod completion;
mod parse;
mod prompt;

pub use completion::{CompletionRequest, OpenAiCompletion, TextCompletion};
pub use parse::{parse_rewrites, MAX_REWRITES};
pub use prompt::{category_guidance, user_prompt, REWRITE_SYSTEM_PROMPT};

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::TriggerCategory;
use crate::config::{OpenAiConfig, DEFAULT_REWRITE_MAX_TOKENS, DEFAULT_REWRITE_TEMPERATURE};
use crate::error::Result;

const NO_RESPONSE: &str = "No response from AI service";
const UNPARSEABLE: &str = "Could not parse rewrites from response";
const FAILED: &str = "Failed to generate rewrites";

/// Suggested rewrites. Success carries one to three rewrites, failure none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteResult {
    pub rewrites: Vec<String>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RewriteResult {
    /// Returns `None` unless there are one to three rewrites.
    pub fn succeeded(rewrites: Vec<String>) -> Option<Self> {
        if rewrites.is_empty() || rewrites.len() > MAX_REWRITES {
            return None;
        }
        Some(Self {
            rewrites,
            success: true,
            error: None,
        })
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            rewrites: Vec::new(),
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Produces category-scoped rewrites through a [`TextCompletion`].
#[derive(Clone)]
pub struct RewriteGenerator {
    completion: Arc<dyn TextCompletion>,
    max_tokens: u32,
    temperature: f32,
}

impl RewriteGenerator {
    /// Creates a generator with the default output bound and temperature.
    pub fn new(completion: Arc<dyn TextCompletion>) -> Self {
        Self {
            completion,
            max_tokens: DEFAULT_REWRITE_MAX_TOKENS,
            temperature: DEFAULT_REWRITE_TEMPERATURE,
        }
    }

    pub fn with_limits(mut self, max_tokens: u32, temperature: f32) -> Self {
        self.max_tokens = max_tokens;
        self.temperature = temperature;
        self
    }

    /// Creates a generator backed by [`OpenAiCompletion`].
    pub fn from_config(config: &OpenAiConfig) -> Result<Self> {
        let completion = OpenAiCompletion::from_config(config)?;
        Ok(Self::new(Arc::new(completion))
            .with_limits(config.rewrite_max_tokens, config.rewrite_temperature))
    }

    /// Builds the request sent for `text` flagged under `category`.
    pub fn build_request(&self, text: &str, category: TriggerCategory) -> CompletionRequest {
        CompletionRequest {
            system: REWRITE_SYSTEM_PROMPT.to_string(),
            user: user_prompt(text, category),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }

    /// Requests up to three rewrites. Never fails.
    pub async fn suggest(&self, text: &str, category: TriggerCategory) -> RewriteResult {
        let request = self.build_request(text, category);

        let content = match self.completion.complete(&request).await {
            Ok(Some(content)) if !content.is_empty() => content,
            Ok(_) => return RewriteResult::failed(NO_RESPONSE),
            Err(e) => {
                warn!("Rewrite generation failed for {}: {}", category, e);
                return RewriteResult::failed(FAILED);
            }
        };

        let rewrites = parse_rewrites(&content);
        debug!(category = %category, count = rewrites.len(), "Parsed rewrites");

        RewriteResult::succeeded(rewrites).unwrap_or_else(|| RewriteResult::failed(UNPARSEABLE))
    }
}
