//! Candor Core - Trigger scanning, review policy, and rewrite suggestions.
//!
//! This crate provides the content-safety pipeline for first-person
//! experience posts:
//!
//! - [`catalog`]: the static trigger-pattern and tooltip tables
//! - [`scanner`]: multi-pattern scanning into position-ordered matches
//! - [`moderation`]: the external moderation adapter and severity override
//! - [`policy`]: publish vs. hold-for-review decisions
//! - [`rewrite`]: category-scoped rewrite suggestions from a generative service
//! - [`pipeline`]: the screener that wires everything together

pub mod catalog;
pub mod config;
pub mod error;
pub mod moderation;
pub mod pipeline;
pub mod policy;
pub mod rewrite;
pub mod scanner;
pub mod submission;

pub use catalog::{PatternRule, Severity, Tooltip, TriggerCategory};
pub use config::{CandorConfig, OpenAiConfig, PolicyConfig};
pub use error::{CandorError, Result};
pub use moderation::{
    ContentModerator, ModerationCategories, ModerationFlags, ModerationResult,
    ModerationScores, OpenAiModerator,
};
pub use pipeline::{PostScreener, PreviewOutcome, ScreeningOutcome};
pub use policy::{PostStatus, ReviewDecision, ReviewPolicy};
pub use rewrite::{OpenAiCompletion, RewriteGenerator, RewriteResult, TextCompletion};
pub use scanner::{ContentAnalysisResult, ContentScanner, TooltipHint, TriggerMatch};
pub use submission::{
    AnalyzeRequest, Confirmations, FieldError, PostSubmission, RewriteRequest, ValidationErrors,
};
