//! Publish vs. hold-for-review decisions.

use serde::{Deserialize, Serialize};

use crate::config::{PolicyConfig, DEFAULT_SEVERITY_THRESHOLD};
use crate::moderation::ModerationResult;
use crate::scanner::ContentAnalysisResult;

const NOTICE_PENDING: &str =
    "This post has been flagged for review. Our team will take a look shortly.";
const NOTICE_PUBLISHED: &str = "Your experience has been shared.";

/// Post status produced by the policy. There is no rejection path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Published,
    PendingReview,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Published => "published",
            PostStatus::PendingReview => "pending_review",
        }
    }
}

/// The policy's verdict. `requires_review` is true iff `status` is pending review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReviewDecision {
    status: PostStatus,
    requires_review: bool,
}

impl ReviewDecision {
    pub fn from_requires_review(requires_review: bool) -> Self {
        let status = if requires_review {
            PostStatus::PendingReview
        } else {
            PostStatus::Published
        };
        Self {
            status,
            requires_review,
        }
    }

    pub fn status(&self) -> PostStatus {
        self.status
    }

    pub fn requires_review(&self) -> bool {
        self.requires_review
    }

    /// User-facing message for this outcome.
    pub fn notice(&self) -> &'static str {
        match self.status {
            PostStatus::PendingReview => NOTICE_PENDING,
            PostStatus::Published => NOTICE_PUBLISHED,
        }
    }
}

/// Combines scan and moderation results into a decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewPolicy {
    severity_threshold: f32,
}

impl Default for ReviewPolicy {
    fn default() -> Self {
        Self {
            severity_threshold: DEFAULT_SEVERITY_THRESHOLD,
        }
    }
}

impl ReviewPolicy {
    /// Creates a policy. The threshold is clamped to 0.0..=1.0.
    pub fn new(severity_threshold: f32) -> Self {
        Self {
            severity_threshold: severity_threshold.clamp(0.0, 1.0),
        }
    }

    pub fn from_config(config: &PolicyConfig) -> Self {
        Self::new(config.severity_threshold)
    }

    pub fn severity_threshold(&self) -> f32 {
        self.severity_threshold
    }

    /// Full submission rule: blocking triggers, a moderation flag, or a
    /// severe score each force review.
    pub fn decide(
        &self,
        analysis: &ContentAnalysisResult,
        moderation: &ModerationResult,
    ) -> ReviewDecision {
        let flags = &moderation.flags;
        let requires_review = analysis.has_blocking_triggers
            || flags.flagged
            || flags.is_severely_flagged(self.severity_threshold);
        ReviewDecision::from_requires_review(requires_review)
    }

    /// Preview rule. Omits the severity-score override.
    pub fn preview(&self, analysis: &ContentAnalysisResult, moderation: &ModerationResult) -> bool {
        analysis.has_blocking_triggers || moderation.flags.flagged
    }
}
