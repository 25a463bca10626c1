//! External moderation: the adapter trait, the OpenAI implementation, and the
//! severity override.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::OpenAiConfig;
use crate::error::{CandorError, Result};

const NO_RESULT: &str = "No moderation result returned";
const FAILED: &str = "Failed to moderate content";

/// Per-axis boolean flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationCategories {
    pub hate: bool,
    pub harassment: bool,
    pub sexual: bool,
    pub violence: bool,
    #[serde(rename = "self-harm")]
    pub self_harm: bool,
}

/// Per-axis scores in 0.0..=1.0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ModerationScores {
    pub hate: f32,
    pub harassment: f32,
    pub sexual: f32,
    pub violence: f32,
    #[serde(rename = "self-harm")]
    pub self_harm: f32,
}

/// Moderation verdict for one text. The default value is the all-clear shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ModerationFlags {
    pub flagged: bool,
    pub categories: ModerationCategories,
    pub category_scores: ModerationScores,
}

impl ModerationFlags {
    /// True if the hate, harassment, or violence score is strictly above `threshold`.
    pub fn is_severely_flagged(&self, threshold: f32) -> bool {
        let s = &self.category_scores;
        s.hate > threshold || s.harassment > threshold || s.violence > threshold
    }
}

/// See [`ModerationFlags::is_severely_flagged`].
pub fn is_severely_flagged(flags: &ModerationFlags, threshold: f32) -> bool {
    flags.is_severely_flagged(threshold)
}

/// Outcome of one moderation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationResult {
    pub flags: ModerationFlags,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ModerationResult {
    pub fn ok(flags: ModerationFlags) -> Self {
        Self {
            flags,
            success: true,
            error: None,
        }
    }

    /// Degraded result: all-clear flags with `success = false`.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            flags: ModerationFlags::default(),
            success: false,
            error: Some(error.into()),
        }
    }
}

/// A moderation service.
///
/// Implementations never fail: errors degrade to [`ModerationResult::failed`].
#[async_trait]
pub trait ContentModerator: Send + Sync {
    async fn moderate(&self, text: &str) -> ModerationResult;
}

// === OpenAI wire format ===

#[derive(Debug, Serialize)]
struct ModerationRequest<'a> {
    input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ModerationResponse {
    #[serde(default)]
    results: Vec<WireResult>,
}

#[derive(Debug, Deserialize)]
struct WireResult {
    flagged: bool,
    categories: WireCategories,
    category_scores: WireScores,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireCategories {
    hate: bool,
    #[serde(rename = "hate/threatening")]
    hate_threatening: bool,
    harassment: bool,
    #[serde(rename = "harassment/threatening")]
    harassment_threatening: bool,
    sexual: bool,
    #[serde(rename = "sexual/minors")]
    sexual_minors: bool,
    violence: bool,
    #[serde(rename = "violence/graphic")]
    violence_graphic: bool,
    #[serde(rename = "self-harm")]
    self_harm: bool,
    #[serde(rename = "self-harm/intent")]
    self_harm_intent: bool,
    #[serde(rename = "self-harm/instructions")]
    self_harm_instructions: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireScores {
    hate: f32,
    harassment: f32,
    sexual: f32,
    violence: f32,
    #[serde(rename = "self-harm")]
    self_harm: f32,
}

impl From<WireResult> for ModerationFlags {
    fn from(r: WireResult) -> Self {
        let c = r.categories;
        let s = r.category_scores;
        Self {
            flagged: r.flagged,
            categories: ModerationCategories {
                hate: c.hate || c.hate_threatening,
                harassment: c.harassment || c.harassment_threatening,
                sexual: c.sexual || c.sexual_minors,
                violence: c.violence || c.violence_graphic,
                self_harm: c.self_harm || c.self_harm_intent || c.self_harm_instructions,
            },
            category_scores: ModerationScores {
                hate: s.hate,
                harassment: s.harassment,
                sexual: s.sexual,
                violence: s.violence,
                self_harm: s.self_harm,
            },
        }
    }
}

/// Moderator backed by an OpenAI-compatible `/moderations` endpoint.
pub struct OpenAiModerator {
    client: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiModerator {
    pub fn new(config: OpenAiConfig, client: reqwest::Client) -> Self {
        Self { client, config }
    }

    /// Creates a moderator with its own HTTP client.
    pub fn from_config(config: &OpenAiConfig) -> Result<Self> {
        Ok(Self::new(config.clone(), config.build_client()?))
    }

    /// Calls the service, surfacing every failure.
    pub async fn try_moderate(&self, text: &str) -> Result<ModerationFlags> {
        let body = ModerationRequest {
            input: text,
            model: self.config.moderation_model.as_deref(),
        };

        let mut request = self
            .client
            .post(self.config.endpoint("moderations"))
            .json(&body);
        if let Some(key) = self.config.api_key.as_deref().filter(|k| !k.is_empty()) {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        let raw = response.text().await?;
        if !status.is_success() {
            return Err(CandorError::Status {
                status: status.as_u16(),
                body: raw,
            });
        }

        let parsed: ModerationResponse = serde_json::from_str(&raw)?;
        let result = parsed
            .results
            .into_iter()
            .next()
            .ok_or_else(|| CandorError::InvalidResponse(NO_RESULT.to_string()))?;

        let flags = ModerationFlags::from(result);
        debug!(flagged = flags.flagged, "Moderation complete");
        Ok(flags)
    }
}

#[async_trait]
impl ContentModerator for OpenAiModerator {
    async fn moderate(&self, text: &str) -> ModerationResult {
        match self.try_moderate(text).await {
            Ok(flags) => ModerationResult::ok(flags),
            Err(e) => {
                warn!("Moderation unavailable, treating as clear: {}", e);
                match e {
                    CandorError::InvalidResponse(msg) => ModerationResult::failed(msg),
                    _ => ModerationResult::failed(FAILED),
                }
            }
        }
    }
}
