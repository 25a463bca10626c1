//! Prompt text for rewrite suggestions.

use crate::catalog::TriggerCategory;

/// System instructions sent with every rewrite request.
pub const REWRITE_SYSTEM_PROMPT: &str = r#"You are a writing assistant for Candor, a platform where people share personal dating experiences.

Your role is to help users rewrite their posts to be:
- First-person and personal ("I experienced..." not "He is...")
- Focused on specific actions and observations
- Time-bound and contextual
- Free of diagnostic labels, character judgments, or criminal allegations
- Neutral in tone, not moralizing

Guidelines:
- Keep the core facts and feelings intact
- Replace labels with observable behaviors
- Replace certainty with subjectivity ("I felt..." instead of "He is...")
- Remove any calls to action or harassment
- Anchor statements in specific dates or timeframes when possible

Do NOT:
- Make the rewrite sound clinical or legal
- Remove genuine emotional impact
- Add words like "allegedly" or "reportedly"
- Make it sound like you're defending the subject

The goal is to help the user share their experience clearly and fairly, without legal risk.

Provide exactly 3 alternative rewrites, one per line, numbered 1-3.
Each rewrite should feel natural, like a diary entry, not a courtroom statement."#;

/// One sentence of rewrite guidance per category.
pub fn category_guidance(category: TriggerCategory) -> &'static str {
    use TriggerCategory::*;

    match category {
        Diagnoses => "Remove mental health labels. Replace with specific behaviors that made the user uncomfortable.",
        CriminalAllegations => "Replace allegations with specific actions the user personally witnessed or experienced.",
        CharacterAttacks => "Remove insults and replace with factual descriptions of what happened.",
        MindReading => "Replace assumptions about intent with observations of what was said or done.",
        RumorAmplification => "Focus only on first-hand experience. Remove hearsay or \"I heard\" language.",
        AbsoluteClaims => "Replace \"always/never\" with specific instances and timeframes.",
        Doxxing => "Remove all identifying information. Keep location general (city level at most).",
        CallsToAction => "Remove any suggestions to contact, report, or take action against the subject.",
        Threats => "Remove all threatening language. Focus on the user's decision to end contact.",
        RelationshipAccusations => "Focus on what the user was told vs. what they later observed, without making accusations.",
    }
}

/// Builds the user message: category, guidance, and the quoted text.
pub fn user_prompt(text: &str, category: TriggerCategory) -> String {
    format!(
        "The following text triggered our \"{}\" filter.\n\n\
         Specific guidance for this category: {}\n\n\
         Please rewrite this to be clearer and safer while keeping the core experience intact:\n\n\
         \"{}\"\n\n\
         Provide exactly 3 alternative rewrites, numbered 1-3.",
        category.as_str(),
        category_guidance(category),
        text
    )
}
