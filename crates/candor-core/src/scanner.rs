//! Regex-based trigger scanner.
//!
//! Runs every catalog rule over the input and reports all matches in text
//! order, along with one guidance tooltip per category that fired.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder, RegexSet, RegexSetBuilder};
use serde::{Deserialize, Serialize};

use crate::catalog::{self, Severity, TriggerCategory};

/// A single trigger hit in the scanned text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerMatch {
    /// Category of the rule that matched.
    pub category: TriggerCategory,
    /// The matched substring, verbatim.
    pub matched_text: String,
    /// Offset of the match start, in characters.
    pub position: usize,
    /// Severity of the rule that matched.
    pub severity: Severity,
}

/// Guidance for the first occurrence of a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipHint {
    pub category: TriggerCategory,
    pub message: String,
    pub rewrite_options: Vec<String>,
    pub matched_text: String,
    pub position: usize,
}

/// Result of scanning a text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentAnalysisResult {
    /// All matches, ascending by position.
    pub matches: Vec<TriggerMatch>,
    /// Whether any match has [`Severity::Block`].
    pub has_blocking_triggers: bool,
    /// One hint per category, in order of first appearance.
    pub tooltips: Vec<TooltipHint>,
}

impl ContentAnalysisResult {
    /// Creates an empty (clean) result.
    pub fn clean() -> Self {
        Self::default()
    }

    /// Builds a result from position-sorted matches.
    fn from_sorted_matches(matches: Vec<TriggerMatch>) -> Self {
        let has_blocking_triggers = matches.iter().any(|m| m.severity.is_block());

        let mut seen = HashSet::new();
        let tooltips = matches
            .iter()
            .filter(|m| seen.insert(m.category))
            .map(|m| {
                let tooltip = catalog::tooltip(m.category);
                TooltipHint {
                    category: m.category,
                    message: tooltip.message.to_string(),
                    rewrite_options: tooltip
                        .rewrite_options
                        .iter()
                        .map(|s| s.to_string())
                        .collect(),
                    matched_text: m.matched_text.clone(),
                    position: m.position,
                }
            })
            .collect();

        Self {
            matches,
            has_blocking_triggers,
            tooltips,
        }
    }

    /// Returns true if nothing matched.
    pub fn is_clean(&self) -> bool {
        self.matches.is_empty()
    }

    /// Returns the distinct categories that matched, in order of first appearance.
    pub fn categories(&self) -> Vec<TriggerCategory> {
        self.tooltips.iter().map(|t| t.category).collect()
    }

    /// Returns matches for a specific category.
    pub fn matches_for(&self, category: TriggerCategory) -> Vec<&TriggerMatch> {
        self.matches
            .iter()
            .filter(|m| m.category == category)
            .collect()
    }
}

/// Compiled rules for one category.
struct CategoryPatterns {
    category: TriggerCategory,
    /// Regex set for fast multi-pattern matching.
    regex_set: RegexSet,
    /// Individual regexes, in catalog order, for locating matches.
    rules: Vec<(Regex, Severity)>,
}

/// Trigger scanner over the static catalog.
///
/// Scanning is pure: the compiled rules are read-only, so one scanner can be
/// shared across threads without locking.
pub struct ContentScanner {
    patterns: Vec<CategoryPatterns>,
}

static SHARED: Lazy<ContentScanner> = Lazy::new(ContentScanner::new);

impl ContentScanner {
    /// Compiles the catalog into a new scanner.
    pub fn new() -> Self {
        Self {
            patterns: TriggerCategory::all()
                .iter()
                .map(|c| Self::build_category_patterns(*c))
                .collect(),
        }
    }

    /// Returns the process-wide scanner, compiled on first use.
    pub fn shared() -> &'static ContentScanner {
        &SHARED
    }

    /// Scans the text and returns every trigger match.
    pub fn scan(&self, text: &str) -> ContentAnalysisResult {
        if text.is_empty() {
            return ContentAnalysisResult::clean();
        }

        // (byte offset, category, matched text, severity)
        let mut found: Vec<(usize, TriggerCategory, &str, Severity)> = Vec::new();

        for cat_patterns in &self.patterns {
            // Fast check: which rules match at all?
            let hits = cat_patterns.regex_set.matches(text);
            if !hits.matched_any() {
                continue;
            }

            // SetMatches yields indices in ascending (catalog) order.
            for idx in hits.iter() {
                let (regex, severity) = &cat_patterns.rules[idx];
                for m in regex.find_iter(text) {
                    found.push((m.start(), cat_patterns.category, m.as_str(), *severity));
                }
            }
        }

        // Stable: same-position matches keep discovery order.
        found.sort_by_key(|(start, ..)| *start);

        let mut matches = Vec::with_capacity(found.len());
        let mut last_byte = 0;
        let mut chars_before = 0;
        for (start, category, matched, severity) in found {
            chars_before += text[last_byte..start].chars().count();
            last_byte = start;
            matches.push(TriggerMatch {
                category,
                matched_text: matched.to_string(),
                position: chars_before,
                severity,
            });
        }

        ContentAnalysisResult::from_sorted_matches(matches)
    }

    /// Returns true if the text contains any blocking trigger.
    pub fn has_blocking_content(&self, text: &str) -> bool {
        self.scan(text).has_blocking_triggers
    }

    /// Returns the distinct categories found in the text.
    pub fn matched_categories(&self, text: &str) -> Vec<TriggerCategory> {
        self.scan(text).categories()
    }

    fn build_category_patterns(category: TriggerCategory) -> CategoryPatterns {
        let rules = catalog::patterns_for(category);
        let sources: Vec<&str> = rules.iter().map(|r| r.pattern).collect();

        // Catalog patterns are static and compiled in tests.
        let regex_set = RegexSetBuilder::new(&sources)
            .case_insensitive(true)
            .build()
            .expect("Invalid regex patterns");
        let rules = rules
            .iter()
            .map(|r| {
                let regex = RegexBuilder::new(r.pattern)
                    .case_insensitive(true)
                    .build()
                    .expect("Invalid regex pattern");
                (regex, r.severity)
            })
            .collect();

        CategoryPatterns {
            category,
            regex_set,
            rules,
        }
    }
}

impl Default for ContentScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner() -> &'static ContentScanner {
        ContentScanner::shared()
    }

    fn has_category(result: &ContentAnalysisResult, category: TriggerCategory) -> bool {
        result.matches.iter().any(|m| m.category == category)
    }

    // === Reference Cases ===

    #[test]
    fn diagnoses_are_warned_and_deduplicated() {
        let text = "He is such a narcissist and I think he's bipolar too";
        let result = scanner().scan(text);

        let diagnoses = result.matches_for(TriggerCategory::Diagnoses);
        assert_eq!(diagnoses.len(), 2);
        assert_eq!(diagnoses[0].matched_text, "narcissist");
        assert_eq!(diagnoses[0].position, text.find("narcissist").unwrap());
        assert_eq!(diagnoses[1].matched_text, "bipolar");
        assert_eq!(diagnoses[1].position, text.find("bipolar").unwrap());

        let diag_tooltips: Vec<_> = result
            .tooltips
            .iter()
            .filter(|t| t.category == TriggerCategory::Diagnoses)
            .collect();
        assert_eq!(diag_tooltips.len(), 1);
        assert_eq!(diag_tooltips[0].matched_text, "narcissist");

        assert!(!result.has_blocking_triggers);
    }

    #[test]
    fn calls_to_action_block() {
        let result = scanner().scan("Let's find him and get him fired");

        let fired = result
            .matches
            .iter()
            .find(|m| m.matched_text == "get him fired")
            .unwrap();
        assert_eq!(fired.category, TriggerCategory::CallsToAction);
        assert_eq!(fired.severity, Severity::Block);
        assert!(result.has_blocking_triggers);
    }

    #[test]
    fn empty_text_is_clean() {
        let result = scanner().scan("");
        assert_eq!(result, ContentAnalysisResult::clean());
        assert!(result.matches.is_empty());
        assert!(!result.has_blocking_triggers);
        assert!(result.tooltips.is_empty());
    }

    #[test]
    fn neutral_text_is_clean() {
        let result =
            scanner().scan("We met for coffee on Tuesday and I left after about an hour.");
        assert!(result.is_clean());
        assert!(!result.has_blocking_triggers);
    }

    // === Ordering and Determinism ===

    #[test]
    fn matches_are_sorted_by_position() {
        let result = scanner().scan(
            "Apparently he is a creep who always lies, I heard he's married, call 555-123-4567",
        );
        assert!(result.matches.len() >= 5);
        for pair in result.matches.windows(2) {
            assert!(pair[0].position <= pair[1].position);
        }
    }

    #[test]
    fn scanning_is_deterministic() {
        let text = "He's gaslighting everyone, I'll ruin him, everyone knows he's a psycho";
        assert_eq!(scanner().scan(text), scanner().scan(text));
        assert_eq!(ContentScanner::new().scan(text), scanner().scan(text));
    }

    #[test]
    fn same_position_ties_keep_rule_order() {
        // The phone and email rules both start at offset 0 here.
        let result = scanner().scan("5551234567@example.com");
        assert_eq!(result.matches.len(), 2);
        assert_eq!(result.matches[0].position, 0);
        assert_eq!(result.matches[1].position, 0);
        assert_eq!(result.matches[0].matched_text, "5551234567");
        assert_eq!(result.matches[1].matched_text, "5551234567@example.com");
    }

    #[test]
    fn earlier_match_wins_across_categories() {
        let result = scanner().scan("make sure everyone knows");
        assert_eq!(result.matches[0].category, TriggerCategory::Threats);
        assert_eq!(result.matches[1].category, TriggerCategory::RumorAmplification);
    }

    #[test]
    fn all_occurrences_are_reported() {
        let result = scanner().scan("never, never, never again");
        assert_eq!(result.matches_for(TriggerCategory::AbsoluteClaims).len(), 3);
        assert_eq!(result.tooltips.len(), 1);
    }

    // === Tooltips ===

    #[test]
    fn tooltips_follow_first_appearance() {
        let text = "I heard he's a loser who is always late, and a loser again";
        let result = scanner().scan(text);

        let categories = result.categories();
        assert_eq!(
            categories,
            vec![
                TriggerCategory::RumorAmplification,
                TriggerCategory::CharacterAttacks,
                TriggerCategory::AbsoluteClaims,
            ]
        );

        let attack = &result.tooltips[1];
        assert_eq!(attack.matched_text, "loser");
        assert_eq!(attack.position, text.find("loser").unwrap());
        assert_eq!(
            attack.message,
            catalog::tooltip(TriggerCategory::CharacterAttacks).message
        );
    }

    #[test]
    fn tooltip_categories_equal_distinct_match_categories() {
        let result = scanner().scan(
            "My friend said he's abusive, he works at the bank, report him, he's cheating",
        );
        let mut from_matches: Vec<_> = Vec::new();
        for m in &result.matches {
            if !from_matches.contains(&m.category) {
                from_matches.push(m.category);
            }
        }
        assert_eq!(result.categories(), from_matches);
    }

    // === Case Insensitivity and Boundaries ===

    #[test]
    fn matching_is_case_insensitive_and_verbatim() {
        let result = scanner().scan("He is a NARCISSIST");
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].matched_text, "NARCISSIST");
    }

    #[test]
    fn word_boundaries_prevent_partial_hits() {
        // "skill" must not match "kill", "evildoer" must not match "evil".
        let result = scanner().scan("His cooking skill impressed me, and the evildoer film was fun");
        assert!(!has_category(&result, TriggerCategory::Threats));
        assert!(!has_category(&result, TriggerCategory::CharacterAttacks));
    }

    #[test]
    fn optional_apostrophe_variants_match() {
        assert!(has_category(
            &scanner().scan("hes trying to get back at me"),
            TriggerCategory::MindReading
        ));
        assert!(has_category(
            &scanner().scan("he's trying to get back at me"),
            TriggerCategory::MindReading
        ));
    }

    // === Doxxing ===

    #[test]
    fn phone_numbers_block() {
        for text in ["call 555-123-4567", "call 555.123.4567", "call 5551234567"] {
            let result = scanner().scan(text);
            assert!(has_category(&result, TriggerCategory::Doxxing), "{}", text);
            assert!(result.has_blocking_triggers, "{}", text);
        }
    }

    #[test]
    fn email_blocks_without_handle_double_count() {
        let result = scanner().scan("his email is john.doe@example.com");
        let doxxing = result.matches_for(TriggerCategory::Doxxing);
        assert_eq!(doxxing.len(), 1);
        assert_eq!(doxxing[0].matched_text, "john.doe@example.com");
        assert_eq!(doxxing[0].severity, Severity::Block);
    }

    #[test]
    fn social_handle_warns() {
        let result = scanner().scan("look him up at @johnny_d");
        let doxxing = result.matches_for(TriggerCategory::Doxxing);
        assert_eq!(doxxing.len(), 1);
        assert_eq!(doxxing[0].matched_text, "@johnny_d");
        assert_eq!(doxxing[0].severity, Severity::Warn);
        assert!(!result.has_blocking_triggers);
    }

    #[test]
    fn street_address_blocks() {
        let result = scanner().scan("he lives at 42 Maple Street");
        let doxxing = result.matches_for(TriggerCategory::Doxxing);
        assert_eq!(doxxing.len(), 1);
        assert_eq!(doxxing[0].matched_text, "42 Maple Street");
        assert!(result.has_blocking_triggers);
    }

    // === Positions ===

    #[test]
    fn positions_count_characters_not_bytes() {
        let text = "Café première: he's a creep";
        let result = scanner().scan(text);
        assert_eq!(result.matches.len(), 1);
        let expected = text.chars().count() - "creep".len();
        assert_eq!(result.matches[0].position, expected);
        assert_ne!(result.matches[0].position, text.find("creep").unwrap());
    }

    #[test]
    fn non_ascii_pattern_matches() {
        let result = scanner().scan("He introduced his fiancé to me later");
        assert!(has_category(&result, TriggerCategory::RelationshipAccusations));
    }

    // === Helpers ===

    #[test]
    fn has_blocking_content_mirrors_scan() {
        assert!(scanner().has_blocking_content("he'll pay for this"));
        assert!(!scanner().has_blocking_content("he was late twice"));
    }

    #[test]
    fn matched_categories_are_distinct() {
        let categories = scanner().matched_categories("creep, creep, monster, I was told");
        assert_eq!(
            categories,
            vec![
                TriggerCategory::CharacterAttacks,
                TriggerCategory::RumorAmplification
            ]
        );
    }
}
