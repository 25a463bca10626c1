//! Guidance tooltips shown next to flagged text.

use super::TriggerCategory;

/// Guidance for one category: a short message and example rephrasings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tooltip {
    pub message: &'static str,
    pub rewrite_options: &'static [&'static str],
}

static DIAGNOSES: Tooltip = Tooltip {
    message: "Avoid diagnoses. Describe what they did instead.",
    rewrite_options: &[
        "What happened was…",
        "The behavior I observed was…",
        "It made me feel unsafe when…",
    ],
};

static CRIMINAL_ALLEGATIONS: Tooltip = Tooltip {
    message: "Serious allegation. Please stick to specific actions you personally experienced.",
    rewrite_options: &[
        "I felt unsafe because…",
        "They did/said ___, so I ended contact.",
        "I'm sharing what happened on [date]…",
    ],
};

static CHARACTER_ATTACKS: Tooltip = Tooltip {
    message: "Stick to facts. Insults get removed—actions help others.",
    rewrite_options: &[
        "The specific issue was…",
        "On our [#] date, they…",
        "A boundary was crossed when…",
    ],
};

static MIND_READING: Tooltip = Tooltip {
    message: "Avoid guessing intent. Share what you saw or heard.",
    rewrite_options: &[
        "What I noticed was…",
        "They said ___.",
        "They did ___ after I ___.",
    ],
};

static RUMOR_AMPLIFICATION: Tooltip = Tooltip {
    message: "No hearsay. Only post what you directly experienced.",
    rewrite_options: &[
        "In my own experience…",
        "I can only speak to what happened to me…",
        "I don't have firsthand info on that.",
    ],
};

static ABSOLUTE_CLAIMS: Tooltip = Tooltip {
    message: "Avoid absolutes. Keep it time-bound and specific.",
    rewrite_options: &[
        "In my experience on [date]…",
        "During our [#] interactions…",
        "From what I saw…",
    ],
};

static DOXXING: Tooltip = Tooltip {
    message: "Personal info isn't allowed. Remove identifying details (address, phone, workplace, etc.).",
    rewrite_options: &[
        "(removed personal details)",
        "We met on [app] in [general area].",
        "I'm not sharing identifying info.",
    ],
};

static CALLS_TO_ACTION: Tooltip = Tooltip {
    message: "No harassment. Don't encourage others to contact or punish anyone.",
    rewrite_options: &[
        "I'm sharing for awareness only.",
        "I chose to stop seeing him after…",
        "Use your judgment and stay safe.",
    ],
};

static THREATS: Tooltip = Tooltip {
    message: "Not allowed. Threats or revenge language will be removed.",
    rewrite_options: &[
        "I'm posting to share my experience.",
        "I'm not comfortable continuing contact.",
        "This is what happened to me.",
    ],
};

static RELATIONSHIP_ACCUSATIONS: Tooltip = Tooltip {
    message: "Be careful with relationship claims. Share only what you personally confirmed.",
    rewrite_options: &[
        "He told me he was single, but I later saw evidence he wasn't.",
        "I'm unsure of his status—sharing what I observed.",
        "I ended contact after learning conflicting info.",
    ],
};

/// Returns the tooltip for a category.
pub fn tooltip(category: TriggerCategory) -> &'static Tooltip {
    match category {
        TriggerCategory::Diagnoses => &DIAGNOSES,
        TriggerCategory::CriminalAllegations => &CRIMINAL_ALLEGATIONS,
        TriggerCategory::CharacterAttacks => &CHARACTER_ATTACKS,
        TriggerCategory::MindReading => &MIND_READING,
        TriggerCategory::RumorAmplification => &RUMOR_AMPLIFICATION,
        TriggerCategory::AbsoluteClaims => &ABSOLUTE_CLAIMS,
        TriggerCategory::Doxxing => &DOXXING,
        TriggerCategory::CallsToAction => &CALLS_TO_ACTION,
        TriggerCategory::Threats => &THREATS,
        TriggerCategory::RelationshipAccusations => &RELATIONSHIP_ACCUSATIONS,
    }
}
