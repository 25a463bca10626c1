//! The screener: scanner, moderator, policy, and rewriter wired together.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::TriggerCategory;
use crate::config::CandorConfig;
use crate::error::Result;
use crate::moderation::{ContentModerator, ModerationResult, OpenAiModerator};
use crate::policy::{ReviewDecision, ReviewPolicy};
use crate::rewrite::{RewriteGenerator, RewriteResult};
use crate::scanner::{ContentAnalysisResult, ContentScanner};

/// Everything recorded alongside a submitted post.
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningOutcome {
    pub analysis: ContentAnalysisResult,
    pub moderation: ModerationResult,
    pub decision: ReviewDecision,
}

/// Result of the pre-submission preview.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewOutcome {
    pub analysis: ContentAnalysisResult,
    pub requires_review: bool,
}

/// Screens post text for publication.
pub struct PostScreener {
    scanner: &'static ContentScanner,
    moderator: Arc<dyn ContentModerator>,
    rewriter: RewriteGenerator,
    policy: ReviewPolicy,
}

impl PostScreener {
    pub fn new(
        moderator: Arc<dyn ContentModerator>,
        rewriter: RewriteGenerator,
        policy: ReviewPolicy,
    ) -> Self {
        Self {
            scanner: ContentScanner::shared(),
            moderator,
            rewriter,
            policy,
        }
    }

    /// Builds a screener backed by the OpenAI adapters.
    pub fn from_config(config: &CandorConfig) -> Result<Self> {
        if !config.openai.has_api_key() {
            warn!("No OpenAI API key configured; moderation and rewrites will degrade");
        }

        let client = config.openai.build_client()?;
        let moderator = OpenAiModerator::new(config.openai.clone(), client.clone());
        let completion = crate::rewrite::OpenAiCompletion::new(config.openai.clone(), client);
        let rewriter = RewriteGenerator::new(Arc::new(completion)).with_limits(
            config.openai.rewrite_max_tokens,
            config.openai.rewrite_temperature,
        );

        Ok(Self::new(
            Arc::new(moderator),
            rewriter,
            ReviewPolicy::from_config(&config.policy),
        ))
    }

    pub fn policy(&self) -> &ReviewPolicy {
        &self.policy
    }

    /// Scans only. No network.
    pub fn analyze(&self, text: &str) -> ContentAnalysisResult {
        let analysis = self.scanner.scan(text);
        debug!(
            matches = analysis.matches.len(),
            blocking = analysis.has_blocking_triggers,
            "Content scanned"
        );
        analysis
    }

    async fn scan_and_moderate(&self, text: &str) -> (ContentAnalysisResult, ModerationResult) {
        tokio::join!(async { self.analyze(text) }, self.moderator.moderate(text))
    }

    /// Analysis-only check. Scores alone never force review here.
    pub async fn preview(&self, text: &str) -> PreviewOutcome {
        let (analysis, moderation) = self.scan_and_moderate(text).await;
        let requires_review = self.policy.preview(&analysis, &moderation);
        PreviewOutcome {
            analysis,
            requires_review,
        }
    }

    /// Full submission check.
    pub async fn screen(&self, text: &str) -> ScreeningOutcome {
        let (analysis, moderation) = self.scan_and_moderate(text).await;
        let decision = self.policy.decide(&analysis, &moderation);

        info!(
            matches = analysis.matches.len(),
            moderation_ok = moderation.success,
            status = decision.status().as_str(),
            "Post screened"
        );

        ScreeningOutcome {
            analysis,
            moderation,
            decision,
        }
    }

    /// On-demand rewrites for one flagged category.
    pub async fn suggest_rewrites(&self, text: &str, category: TriggerCategory) -> RewriteResult {
        self.rewriter.suggest(text, category).await
    }
}
