//! Request validation for post submission, rewrite, and analysis inputs.
//!
//! Every check runs; `validate()` reports all violations together.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::catalog::TriggerCategory;

/// Minimum post length in characters.
pub const MIN_POST_CHARS: usize = 50;

/// Maximum post length in characters.
pub const MAX_POST_CHARS: usize = 5000;

static FIRST_PERSON: Lazy<Regex> = Lazy::new(|| {
    // Literal pattern, covered by tests.
    Regex::new(r"(?i)\b(I|my|me)\b").expect("Invalid first-person pattern")
});

/// A single failed check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Dotted field path, e.g. `confirmations.first_person`.
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// All failed checks for one request. Never empty when returned as an error.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if any error is reported for `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    fn push(&mut self, field: &str, message: &str) {
        self.0.push(FieldError::new(field, message));
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// The author's acknowledgements required before a post is accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Confirmations {
    #[serde(alias = "firstPerson")]
    pub first_person: bool,
    #[serde(alias = "noHarassment")]
    pub no_harassment: bool,
    #[serde(alias = "understandsPublic")]
    pub understands_public: bool,
}

impl Confirmations {
    /// All three acknowledgements given.
    pub fn all() -> Self {
        Self {
            first_person: true,
            no_harassment: true,
            understands_public: true,
        }
    }
}

/// A post as submitted for publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSubmission {
    pub text: String,
    #[serde(default)]
    pub confirmations: Confirmations,
}

impl PostSubmission {
    pub fn new(text: impl Into<String>, confirmations: Confirmations) -> Self {
        Self {
            text: text.into(),
            confirmations,
        }
    }

    /// Checks length, first-person language, and confirmations.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let chars = self.text.chars().count();
        if chars < MIN_POST_CHARS {
            errors.push("text", "Posts must be at least 50 characters");
        } else if chars > MAX_POST_CHARS {
            errors.push("text", "Posts cannot exceed 5000 characters");
        }

        if !FIRST_PERSON.is_match(&self.text) {
            errors.push("text", "Posts should use first-person language (I, my, me)");
        }

        if !self.confirmations.first_person {
            errors.push(
                "confirmations.first_person",
                "Please confirm this reflects your personal experience",
            );
        }
        if !self.confirmations.no_harassment {
            errors.push(
                "confirmations.no_harassment",
                "Please agree not to harass or threaten",
            );
        }
        if !self.confirmations.understands_public {
            errors.push(
                "confirmations.understands_public",
                "Please acknowledge this may be read by the subject",
            );
        }

        errors.into_result()
    }
}

/// A request for rewrite suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRequest {
    pub text: String,
    #[serde(alias = "triggerCategory")]
    pub trigger_category: TriggerCategory,
}

impl RewriteRequest {
    pub fn new(text: impl Into<String>, trigger_category: TriggerCategory) -> Self {
        Self {
            text: text.into(),
            trigger_category,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if self.text.is_empty() {
            errors.push("text", "Text is required");
        }
        errors.into_result()
    }
}

/// A request to analyze draft text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

impl AnalyzeRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if self.text.is_empty() {
            errors.push("text", "Text is required");
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_TEXT: &str =
        "I met him for coffee on March 3rd and he kept interrupting me the whole time.";

    #[test]
    fn valid_submission_passes() {
        let post = PostSubmission::new(GOOD_TEXT, Confirmations::all());
        assert!(post.validate().is_ok());
    }

    #[test]
    fn short_text_fails() {
        let post = PostSubmission::new("I was stood up.", Confirmations::all());
        let errors = post.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.0[0].message.contains("at least 50"));
    }

    #[test]
    fn long_text_fails() {
        let text = format!("I {}", "a".repeat(MAX_POST_CHARS));
        let post = PostSubmission::new(text, Confirmations::all());
        let errors = post.validate().unwrap_err();
        assert!(errors.0[0].message.contains("5000"));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 49 two-byte characters plus "I" is 50 chars, 99 bytes
        let text = format!("I{}", "é".repeat(49));
        let post = PostSubmission::new(text, Confirmations::all());
        // Passes length but "Ié..." has no word boundary after I
        let errors = post.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.0[0].message.contains("first-person"));
    }

    #[test]
    fn third_person_text_fails() {
        let text = "He showed up late to dinner and was rude to the waiter the entire evening.";
        let post = PostSubmission::new(text, Confirmations::all());
        let errors = post.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.has_field("text"));
    }

    #[test]
    fn first_person_is_case_insensitive() {
        let text = "The restaurant was loud and MY date talked over the waiter all evening long.";
        let post = PostSubmission::new(text, Confirmations::all());
        assert!(post.validate().is_ok());
    }

    #[test]
    fn every_violation_is_reported() {
        let post = PostSubmission::new("short", Confirmations::default());
        let errors = post.validate().unwrap_err();

        // length, first-person, and three confirmations
        assert_eq!(errors.len(), 5);
        assert!(errors.has_field("confirmations.first_person"));
        assert!(errors.has_field("confirmations.no_harassment"));
        assert!(errors.has_field("confirmations.understands_public"));
    }

    #[test]
    fn confirmations_accept_camel_case() {
        let json = r#"{"text": "x", "confirmations": {"firstPerson": true, "noHarassment": true, "understandsPublic": true}}"#;
        let post: PostSubmission = serde_json::from_str(json).unwrap();
        assert_eq!(post.confirmations, Confirmations::all());
    }

    #[test]
    fn missing_confirmations_default_to_false() {
        let post: PostSubmission = serde_json::from_str(r#"{"text": "x"}"#).unwrap();
        assert_eq!(post.confirmations, Confirmations::default());
    }

    #[test]
    fn rewrite_request_requires_text() {
        let req = RewriteRequest::new("", TriggerCategory::Threats);
        assert!(req.validate().unwrap_err().has_field("text"));

        let req = RewriteRequest::new("he is a creep", TriggerCategory::CharacterAttacks);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn rewrite_request_parses_category() {
        let json = r#"{"text": "he's a psycho", "triggerCategory": "diagnoses"}"#;
        let req: RewriteRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.trigger_category, TriggerCategory::Diagnoses);

        let bad = r#"{"text": "x", "trigger_category": "gossip"}"#;
        assert!(serde_json::from_str::<RewriteRequest>(bad).is_err());
    }

    #[test]
    fn analyze_request_requires_text() {
        assert!(AnalyzeRequest::new("").validate().is_err());
        assert!(AnalyzeRequest::new(" ").validate().is_ok());
    }

    #[test]
    fn display_joins_errors() {
        let post = PostSubmission::new(GOOD_TEXT, Confirmations::default());
        let msg = post.validate().unwrap_err().to_string();
        assert!(msg.contains("confirmations.first_person: Please confirm"));
        assert_eq!(msg.matches("; ").count(), 2);
    }
}
