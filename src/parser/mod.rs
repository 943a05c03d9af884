//! Review response parser.
//!
//! The review prompt instructs the model to answer under three literal
//! headings (`Errors:`, `Suggestions:`, `Revised Code:`). The model is
//! asked to follow that format exactly, but the format is a social
//! contract, not a grammar: this parser anchors on the headings
//! case-insensitively, takes the first match for each, and falls back to
//! a sentinel default for any section that fails to materialise. It
//! never returns an error.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::ParsedReview;

// Each section runs from its heading to the next recognised heading (in
// the fixed order Errors -> Suggestions -> Revised Code) or end of text.
// `(?is)`: case-insensitive, dot matches newline. The terminator is
// consumed by the match but excluded from the capture group.
static ERRORS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)Errors:\s*(.*?)(?:Suggestions:|Revised\s+Code:|\z)").unwrap()
});

static SUGGESTIONS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)Suggestions:\s*(.*?)(?:Revised\s+Code:|\z)").unwrap());

static REVISED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)Revised\s+Code:\s*(.*)").unwrap());

/// Extract the three review sections from a raw model response.
///
/// Whitespace at both ends of each captured section is trimmed. A missing
/// heading yields that section's sentinel default.
pub fn parse_review(raw: &str) -> ParsedReview {
    let defaults = ParsedReview::default();

    ParsedReview {
        errors: capture(&ERRORS_RE, raw).unwrap_or(defaults.errors),
        suggestions: capture(&SUGGESTIONS_RE, raw).unwrap_or(defaults.suggestions),
        revised_code: capture(&REVISED_RE, raw).unwrap_or(defaults.revised_code),
    }
}

/// First-match capture, trimmed. `None` when the heading is absent.
fn capture(re: &Regex, raw: &str) -> Option<String> {
    re.captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}
