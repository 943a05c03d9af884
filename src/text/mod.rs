//! Text sanitization and truncation for prompt assembly.
//!
//! Everything embedded into an LLM prompt passes through here first:
//! [`sanitize`] keeps prompt size and encoding predictable by collapsing
//! anything outside printable ASCII, and [`truncate`] caps text at a
//! character budget with an explicit marker.

use crate::constants::TRUNCATION_MARKER;

/// Returns `true` for bytes allowed through the sanitizer.
///
/// Printable ASCII plus the line-structure characters. Newlines must
/// survive: the truncation marker, the heading parser, and the bullet
/// re-flow all anchor on line boundaries.
fn is_allowed(c: char) -> bool {
    matches!(c, ' '..='~' | '\n' | '\r' | '\t')
}

/// Strip characters outside the 7-bit printable range.
///
/// Each run of disallowed characters is replaced by a single space.
/// Idempotent: a second pass finds nothing left to replace.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if is_allowed(c) {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push(' ');
            in_run = true;
        }
    }
    out
}

/// Cap `text` at `max_chars` characters.
///
/// Text at or under the cap is returned unchanged. Longer text is cut at
/// the cap and suffixed with the truncation marker, so the caller (and
/// the model) can see that content was dropped. `max_chars == 0` yields
/// the bare marker.
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((byte_idx, _)) => {
            let mut out = String::with_capacity(byte_idx + TRUNCATION_MARKER.len());
            out.push_str(&text[..byte_idx]);
            out.push_str(TRUNCATION_MARKER);
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn sanitize_passes_plain_ascii_through() {
        let text = "fn main() {\n\tprintln!(\"hi\");\n}";
        assert_eq!(sanitize(text), text);
    }

    #[test]
    fn sanitize_replaces_non_ascii_run_with_single_space() {
        assert_eq!(sanitize("a\u{2014}\u{2014}b"), "a b");
        assert_eq!(sanitize("caf\u{e9}s"), "caf s");
    }

    #[test]
    fn sanitize_replaces_control_bytes() {
        assert_eq!(sanitize("a\u{0}\u{1}\u{2}b"), "a b");
    }

    #[test]
    fn sanitize_keeps_line_structure() {
        let text = "line one\r\nline two\n\tindented";
        assert_eq!(sanitize(text), text);
    }

    #[test]
    fn sanitize_is_idempotent() {
        let samples = [
            "plain text",
            "sm\u{f6}rg\u{e5}sbord",
            "\u{1F980} crab \u{1F980}",
            "mixed\u{0} content\u{2713} here",
            "",
        ];
        for sample in samples {
            let once = sanitize(sample);
            assert_eq!(sanitize(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn truncate_is_identity_below_cap() {
        let text = "short text";
        assert_eq!(truncate(text, 100), text);
        assert_eq!(truncate(text, text.chars().count()), text);
    }

    #[test]
    fn truncate_cuts_and_appends_marker() {
        let text = "abcdefghij";
        let cut = truncate(text, 4);
        assert_eq!(cut, format!("abcd{TRUNCATION_MARKER}"));
        assert_eq!(
            cut.chars().count(),
            4 + TRUNCATION_MARKER.chars().count()
        );
    }

    #[test]
    fn truncate_starts_with_prefix_of_input() {
        let text = "x".repeat(20_000);
        let cut = truncate(&text, 15_000);
        assert!(cut.starts_with(&text[..15_000]));
        assert!(cut.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn truncate_zero_cap_yields_bare_marker() {
        assert_eq!(truncate("anything", 0), TRUNCATION_MARKER);
    }

    #[test]
    fn truncate_empty_input_is_identity() {
        assert_eq!(truncate("", 0), "");
        assert_eq!(truncate("", 100), "");
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        // Multi-byte characters: the cut must land on a char boundary.
        let text = "\u{3042}".repeat(10);
        let cut = truncate(&text, 4);
        assert!(cut.starts_with(&"\u{3042}".repeat(4)));
        assert!(cut.ends_with(TRUNCATION_MARKER));
    }
}
