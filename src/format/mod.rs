//! Output formatting for the review page.
//!
//! Review text comes straight out of an LLM and echoes user code back, so
//! nothing here may reach the page unescaped. Both pipelines escape
//! first and only then insert their own markup: the error pipeline adds
//! paragraph spacing around bullets, the suggestion pipeline additionally
//! splits the text into items and emphasises a fixed keyword set.

use std::sync::LazyLock;

use regex::Regex;

/// Bullet marker inserted before list-shaped lines.
const BULLET: &str = "- ";

/// Keywords wrapped in a highlight tag inside suggestion items. Matched
/// case-insensitively, anywhere in a word.
static KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(optimize|improve|naming|security|performance|readability|refactor|standard|bug|error|unused)",
    )
    .unwrap()
});

/// Matches a line that already starts with a bullet (`- ` or `1.`-style).
static BULLET_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:-\s|\d+\.\s?)").unwrap());

/// Escape text for HTML embedding.
///
/// Covers the five characters that can open markup or break out of an
/// attribute. Everything rendered into the page goes through this before
/// any markup is added.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Format the errors section for display.
///
/// Escapes the text, then inserts a blank line before every bullet so the
/// list reads as separate paragraphs.
pub fn format_errors(text: &str) -> String {
    escape_html(text).replace("\n- ", "\n\n- ")
}

/// Format the suggestions section for display.
///
/// The stricter pipeline: newlines are normalised, the text is escaped,
/// split into suggestion items (bullet starts and blank-line boundaries),
/// and each item gets keyword emphasis, a bullet prefix where missing,
/// and a trailing paragraph break. The result is safe to insert into the
/// page as-is: the only unescaped markup is what this function adds.
pub fn highlight_suggestions(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let escaped = escape_html(&normalized);

    let mut out = String::with_capacity(escaped.len());
    for item in split_items(&escaped) {
        let highlighted = KEYWORD_RE.replace_all(&item, "<mark>$1</mark>");
        if !BULLET_START_RE.is_match(&item) {
            out.push_str(BULLET);
        }
        out.push_str(&highlighted);
        out.push_str("<br><br>");
    }
    out
}

/// Split escaped suggestion text into items.
///
/// A new item starts at a line beginning with a bullet marker (`- ` or
/// `N.`) and at any blank-line boundary. Empty items are dropped.
fn split_items(text: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || BULLET_START_RE.is_match(trimmed) {
            if !current.trim().is_empty() {
                items.push(current.trim().to_string());
            }
            current.clear();
        }
        if !trimmed.is_empty() {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(trimmed);
        }
    }
    if !current.trim().is_empty() {
        items.push(current.trim().to_string());
    }

    items
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn escape_html_covers_markup_chars() {
        assert_eq!(
            escape_html(r#"<script>alert("x&y")</script>"#),
            "&lt;script&gt;alert(&quot;x&amp;y&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("it's"), "it&#39;s");
    }

    #[test]
    fn escape_html_passes_plain_text_through() {
        assert_eq!(escape_html("plain text, no markup"), "plain text, no markup");
    }

    #[test]
    fn format_errors_inserts_blank_line_before_bullets() {
        let text = "Found issues:\n- first\n- second";
        assert_eq!(
            format_errors(text),
            "Found issues:\n\n- first\n\n- second"
        );
    }

    #[test]
    fn format_errors_escapes_before_spacing() {
        let text = "\n- use <vector> instead";
        assert_eq!(format_errors(text), "\n\n- use &lt;vector&gt; instead");
    }

    #[test]
    fn highlight_wraps_keywords_preserving_case() {
        let out = highlight_suggestions("- Improve the naming here");
        assert!(out.contains("<mark>Improve</mark>"));
        assert!(out.contains("<mark>naming</mark>"));
    }

    #[test]
    fn highlight_matches_keyword_inside_words() {
        // "any occurrence": substring matches count, e.g. "errors".
        let out = highlight_suggestions("- fix all errors");
        assert!(out.contains("<mark>error</mark>s"));
    }

    #[test]
    fn highlight_prefixes_missing_bullet() {
        let out = highlight_suggestions("add more tests");
        assert_eq!(out, "- add more tests<br><br>");
    }

    #[test]
    fn highlight_keeps_numbered_items() {
        let out = highlight_suggestions("1. first point\n2. second point");
        assert_eq!(out, "1. first point<br><br>2. second point<br><br>");
    }

    #[test]
    fn highlight_splits_on_blank_lines() {
        let out = highlight_suggestions("first thought\n\nsecond thought");
        assert_eq!(out, "- first thought<br><br>- second thought<br><br>");
    }

    #[test]
    fn highlight_drops_empty_items() {
        let out = highlight_suggestions("- one\n\n\n\n- two\n\n");
        assert_eq!(out, "- one<br><br>- two<br><br>");
    }

    #[test]
    fn highlight_normalises_newline_variants() {
        let out = highlight_suggestions("- a\r\n- b\r- c");
        assert_eq!(out, "- a<br><br>- b<br><br>- c<br><br>");
    }

    #[test]
    fn highlight_joins_continuation_lines_into_one_item() {
        let out = highlight_suggestions("- a point\nthat continues");
        assert_eq!(out, "- a point\nthat continues<br><br>");
    }

    #[test]
    fn highlight_never_emits_unescaped_angle_brackets_from_input() {
        let hostile = "- <img src=x onerror=alert(1)>\n- <b>bold</b> security fix";
        let out = highlight_suggestions(hostile);

        // Strip the markup this pipeline inserts; nothing else may
        // contain raw angle brackets.
        let stripped = out
            .replace("<mark>", "")
            .replace("</mark>", "")
            .replace("<br><br>", "");
        assert!(!stripped.contains('<'), "unescaped '<' in {out}");
        assert!(!stripped.contains('>'), "unescaped '>' in {out}");
    }

    #[test]
    fn highlight_empty_input_is_empty() {
        assert_eq!(highlight_suggestions(""), "");
        assert_eq!(highlight_suggestions("\n\n\n"), "");
    }
}
