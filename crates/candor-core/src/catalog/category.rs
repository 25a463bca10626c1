//! Trigger categories and rule severities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Categories of risky language a post can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerCategory {
    /// Mental-health labels applied to the subject.
    Diagnoses,
    /// Accusations of crimes or abuse.
    CriminalAllegations,
    /// Insults and name-calling.
    CharacterAttacks,
    /// Claims about the subject's hidden intent.
    MindReading,
    /// Hearsay and second-hand stories.
    RumorAmplification,
    /// "Always", "never", and other absolutes.
    AbsoluteClaims,
    /// Phone numbers, addresses, workplaces, handles.
    Doxxing,
    /// Encouraging readers to act against the subject.
    CallsToAction,
    /// Threats and revenge language.
    Threats,
    /// Claims about the subject's relationships.
    RelationshipAccusations,
}

impl TriggerCategory {
    /// Returns all categories in scan order.
    pub fn all() -> &'static [TriggerCategory] {
        &[
            TriggerCategory::Diagnoses,
            TriggerCategory::CriminalAllegations,
            TriggerCategory::CharacterAttacks,
            TriggerCategory::MindReading,
            TriggerCategory::RumorAmplification,
            TriggerCategory::AbsoluteClaims,
            TriggerCategory::Doxxing,
            TriggerCategory::CallsToAction,
            TriggerCategory::Threats,
            TriggerCategory::RelationshipAccusations,
        ]
    }

    /// Returns the wire name (snake_case) of this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerCategory::Diagnoses => "diagnoses",
            TriggerCategory::CriminalAllegations => "criminal_allegations",
            TriggerCategory::CharacterAttacks => "character_attacks",
            TriggerCategory::MindReading => "mind_reading",
            TriggerCategory::RumorAmplification => "rumor_amplification",
            TriggerCategory::AbsoluteClaims => "absolute_claims",
            TriggerCategory::Doxxing => "doxxing",
            TriggerCategory::CallsToAction => "calls_to_action",
            TriggerCategory::Threats => "threats",
            TriggerCategory::RelationshipAccusations => "relationship_accusations",
        }
    }

    /// Returns a human-readable name for this category.
    pub fn name(&self) -> &'static str {
        match self {
            TriggerCategory::Diagnoses => "Diagnoses",
            TriggerCategory::CriminalAllegations => "Criminal Allegations",
            TriggerCategory::CharacterAttacks => "Character Attacks",
            TriggerCategory::MindReading => "Mind Reading",
            TriggerCategory::RumorAmplification => "Rumor Amplification",
            TriggerCategory::AbsoluteClaims => "Absolute Claims",
            TriggerCategory::Doxxing => "Doxxing",
            TriggerCategory::CallsToAction => "Calls to Action",
            TriggerCategory::Threats => "Threats",
            TriggerCategory::RelationshipAccusations => "Relationship Accusations",
        }
    }
}

impl fmt::Display for TriggerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known trigger category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown trigger category: {0}")]
pub struct ParseCategoryError(pub String);

impl FromStr for TriggerCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TriggerCategory::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// How strongly a matched rule affects publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Flag the text but let it through.
    #[default]
    Warn,
    /// Force the post into manual review.
    Block,
}

impl Severity {
    /// Returns a human-readable name for this severity.
    pub fn name(&self) -> &'static str {
        match self {
            Severity::Warn => "Warn",
            Severity::Block => "Block",
        }
    }

    /// Returns true for [`Severity::Block`].
    pub fn is_block(&self) -> bool {
        matches!(self, Severity::Block)
    }
}
