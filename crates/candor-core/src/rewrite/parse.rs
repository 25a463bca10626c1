//! Extraction of rewrites from a free-form completion.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum number of rewrites kept.
pub const MAX_REWRITES: usize = 3;

/// Cleaned lines must be longer than this many characters.
const MIN_REWRITE_CHARS: usize = 10;

static NUMBER_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+[.):\s]+").expect("Invalid number prefix pattern"));

static EDGE_QUOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^["']|["']$"#).expect("Invalid quote pattern"));

/// Pulls up to three rewrites out of a numbered list.
///
/// Blank lines are skipped. Each line loses its number prefix and one
/// surrounding quote on either end, then is kept only if longer than ten
/// characters.
pub fn parse_rewrites(response: &str) -> Vec<String> {
    let mut rewrites = Vec::with_capacity(MAX_REWRITES);

    for line in response.split('\n').filter(|l| !l.trim().is_empty()) {
        let unnumbered = NUMBER_PREFIX.replace(line, "");
        let unquoted = EDGE_QUOTE.replace_all(&unnumbered, "");
        let cleaned = unquoted.trim();

        if cleaned.chars().count() > MIN_REWRITE_CHARS {
            rewrites.push(cleaned.to_string());
        }
        if rewrites.len() >= MAX_REWRITES {
            break;
        }
    }

    rewrites
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_numbering_and_short_lines() {
        let response = "1. I felt unsafe when he raised his voice.\n2) \"He didn't respect my boundaries.\"\n3 - ok";
        assert_eq!(
            parse_rewrites(response),
            vec![
                "I felt unsafe when he raised his voice.",
                "He didn't respect my boundaries.",
            ]
        );
    }

    #[test]
    fn stops_after_three() {
        let response = "1. First rewrite goes here.\n\n2. Second rewrite goes here.\n3. Third rewrite goes here.\n4. Fourth rewrite goes here.";
        let rewrites = parse_rewrites(response);
        assert_eq!(rewrites.len(), 3);
        assert_eq!(rewrites[2], "Third rewrite goes here.");
    }

    #[test]
    fn unnumbered_lines_are_kept() {
        let response = "Here are three options:\n'On our second date he yelled at me.'";
        assert_eq!(
            parse_rewrites(response),
            vec!["Here are three options:", "On our second date he yelled at me."]
        );
    }

    #[test]
    fn only_one_quote_removed_per_side() {
        assert_eq!(
            parse_rewrites("1. \"\"He said it twice to me.\"\""),
            vec!["\"He said it twice to me.\""]
        );
    }

    #[test]
    fn length_counts_characters() {
        // ten two-byte characters is not enough
        assert!(parse_rewrites("1. éééééééééé").is_empty());
        assert_eq!(parse_rewrites("1. ééééééééééé").len(), 1);
    }

    #[test]
    fn empty_and_blank_input() {
        assert!(parse_rewrites("").is_empty());
        assert!(parse_rewrites("\n   \n\t\n").is_empty());
    }
}
