//! Trigger pattern tables.
//!
//! Every pattern is compiled case-insensitively by the scanner. Most are
//! word-boundary anchored literals; the doxxing table also carries a few
//! structural patterns (phone numbers, emails, street addresses, handles).

use super::{Severity, TriggerCategory};
use TriggerCategory::*;

/// A single regex rule belonging to one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternRule {
    /// The category this rule reports.
    pub category: TriggerCategory,
    /// Regex source, matched case-insensitively.
    pub pattern: &'static str,
    /// Severity copied onto every match of this rule.
    pub severity: Severity,
}

const fn warn(category: TriggerCategory, pattern: &'static str) -> PatternRule {
    PatternRule {
        category,
        pattern,
        severity: Severity::Warn,
    }
}

const fn block(category: TriggerCategory, pattern: &'static str) -> PatternRule {
    PatternRule {
        category,
        pattern,
        severity: Severity::Block,
    }
}

static DIAGNOSES: &[PatternRule] = &[
    warn(Diagnoses, r"\b(narcissist|narcissistic)\b"),
    warn(Diagnoses, r"\b(sociopath|sociopathic)\b"),
    warn(Diagnoses, r"\b(psychopath|psychopathic)\b"),
    warn(Diagnoses, r"\bbipolar\b"),
    warn(Diagnoses, r"\bborderline\b"),
    warn(Diagnoses, r"\bmentally ill\b"),
    warn(Diagnoses, r"\bpersonality disorder\b"),
    warn(Diagnoses, r"\bNPD\b"),
    warn(Diagnoses, r"\bBPD\b"),
];

static CRIMINAL_ALLEGATIONS: &[PatternRule] = &[
    warn(CriminalAllegations, r"\babusive\b"),
    warn(CriminalAllegations, r"\babuse[rd]?\b"),
    block(CriminalAllegations, r"\brapist\b"),
    warn(CriminalAllegations, r"\b(assaulted|assault)\b"),
    warn(CriminalAllegations, r"\bpredator\b"),
    warn(CriminalAllegations, r"\bgrooming\b"),
    warn(CriminalAllegations, r"\bstalker\b"),
    warn(CriminalAllegations, r"\bstalking\b"),
    block(CriminalAllegations, r"\btrafficker\b"),
    warn(CriminalAllegations, r"\bviolent\b"),
    warn(CriminalAllegations, r"\bthreatening\b"),
    warn(CriminalAllegations, r"\bdomestic violence\b"),
];

static CHARACTER_ATTACKS: &[PatternRule] = &[
    warn(CharacterAttacks, r"\bcreep\b"),
    warn(CharacterAttacks, r"\bmonster\b"),
    warn(CharacterAttacks, r"\bpsycho\b"),
    warn(CharacterAttacks, r"\bloser\b"),
    warn(CharacterAttacks, r"\bpathetic\b"),
    warn(CharacterAttacks, r"\bdisgusting\b"),
    warn(CharacterAttacks, r"\btrash\b"),
    warn(CharacterAttacks, r"\bevil\b"),
    warn(CharacterAttacks, r"\bscum\b"),
    warn(CharacterAttacks, r"\bfreak\b"),
    warn(CharacterAttacks, r"\bincel\b"),
];

static MIND_READING: &[PatternRule] = &[
    warn(MindReading, r"\bhe'?s trying to\b"),
    warn(MindReading, r"\bhe wants to\b"),
    warn(MindReading, r"\bhe only dates to\b"),
    warn(MindReading, r"\bhe targets women\b"),
    warn(MindReading, r"\bhe uses women\b"),
    warn(MindReading, r"\bhe manipulates everyone\b"),
    warn(MindReading, r"\bhe'?s love bombing\b"),
    warn(MindReading, r"\bhe'?s gaslighting\b"),
];

static RUMOR_AMPLIFICATION: &[PatternRule] = &[
    warn(RumorAmplification, r"\beveryone knows\b"),
    warn(RumorAmplification, r"\bI heard\b"),
    warn(RumorAmplification, r"\bapparently\b"),
    warn(RumorAmplification, r"\brumor\b"),
    warn(RumorAmplification, r"\bpeople say\b"),
    warn(RumorAmplification, r"\bmy friend said\b"),
    warn(RumorAmplification, r"\bI was told\b"),
    warn(RumorAmplification, r"\bsupposedly\b"),
];

static ABSOLUTE_CLAIMS: &[PatternRule] = &[
    warn(AbsoluteClaims, r"\balways\b"),
    warn(AbsoluteClaims, r"\bnever\b"),
    warn(AbsoluteClaims, r"\bevery time\b"),
    warn(AbsoluteClaims, r"\ball women\b"),
    warn(AbsoluteClaims, r"\bhe does this to everyone\b"),
    warn(AbsoluteClaims, r"\bguaranteed\b"),
    // `%` is not a word character, so the rule ends at the sign itself.
    warn(AbsoluteClaims, r"\b100%"),
];

static DOXXING: &[PatternRule] = &[
    block(Doxxing, r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b"),
    block(Doxxing, r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b"),
    block(
        Doxxing,
        r"\b\d+\s+[A-Za-z]+\s+(St|Street|Ave|Avenue|Rd|Road|Dr|Drive|Ln|Lane|Blvd|Boulevard)\b",
    ),
    warn(Doxxing, r"\b(works at|employed at|his job at)\b"),
    block(Doxxing, r"\b(license plate|plate number)\b"),
    // Handles only; `\B` keeps the local part of an email from matching.
    warn(Doxxing, r"\B@[A-Za-z0-9_]+\b"),
];

static CALLS_TO_ACTION: &[PatternRule] = &[
    warn(CallsToAction, r"\breport him\b"),
    block(CallsToAction, r"\bget him fired\b"),
    block(CallsToAction, r"\bmessage his job\b"),
    warn(CallsToAction, r"\btell his wife\b"),
    warn(CallsToAction, r"\bblast him\b"),
    warn(CallsToAction, r"\bexpose him\b"),
    block(CallsToAction, r"\bruin him\b"),
    warn(CallsToAction, r"\bgo comment\b"),
    block(CallsToAction, r"\bspam him\b"),
    block(CallsToAction, r"\blet'?s find him\b"),
];

static THREATS: &[PatternRule] = &[
    block(Threats, r"\bI'?ll ruin him\b"),
    block(Threats, r"\bhe'?ll pay\b"),
    warn(Threats, r"\bI hope he\b"),
    block(Threats, r"\bkill\b"),
    block(Threats, r"\bhurt him\b"),
    block(Threats, r"\bdox\b"),
    warn(Threats, r"\bdestroy\b"),
    warn(Threats, r"\bmake sure everyone knows\b"),
];

static RELATIONSHIP_ACCUSATIONS: &[PatternRule] = &[
    warn(RelationshipAccusations, r"\bcheating\b"),
    warn(RelationshipAccusations, r"\bmarried\b"),
    warn(RelationshipAccusations, r"\bhas a wife\b"),
    warn(RelationshipAccusations, r"\bgirlfriend\b"),
    warn(RelationshipAccusations, r"\bfiancé\b"),
    warn(RelationshipAccusations, r"\baffair\b"),
    warn(RelationshipAccusations, r"\bpregnant partner\b"),
    warn(RelationshipAccusations, r"\bbaby mama\b"),
];

/// Returns the rules for a category, in match-discovery order.
pub fn patterns_for(category: TriggerCategory) -> &'static [PatternRule] {
    match category {
        Diagnoses => DIAGNOSES,
        CriminalAllegations => CRIMINAL_ALLEGATIONS,
        CharacterAttacks => CHARACTER_ATTACKS,
        MindReading => MIND_READING,
        RumorAmplification => RUMOR_AMPLIFICATION,
        AbsoluteClaims => ABSOLUTE_CLAIMS,
        Doxxing => DOXXING,
        CallsToAction => CALLS_TO_ACTION,
        Threats => THREATS,
        RelationshipAccusations => RELATIONSHIP_ACCUSATIONS,
    }
}

/// Iterates every rule in the catalog, category by category.
pub fn all_patterns() -> impl Iterator<Item = &'static PatternRule> {
    TriggerCategory::all()
        .iter()
        .flat_map(|category| patterns_for(*category).iter())
}
