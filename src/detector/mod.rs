//! Language and domain detection.
//!
//! Two short classification prompts against the LLM: one closed-set
//! (language key, validated against [`LanguageKey`]) and one open-ended
//! (application domain, advisory only). Both are single-shot; a failed
//! call propagates to the orchestrator instead of being swallowed.

use std::sync::LazyLock;

use regex::Regex;
use tracing::info;

use crate::constants::DETECT_SAMPLE_CHARS;
use crate::models::LanguageKey;
use crate::providers::{CompletionProvider, ProviderError};

/// Result of a language classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// The reply (or the heuristic) resolved to a supported key.
    Known(LanguageKey),
    /// The normalized reply did not match any supported key. Carries the
    /// reply so the orchestrator can name it in the abort message.
    Unknown(String),
}

/// C# `using <Identifier>;` directive, e.g. `using System.Linq;`.
static USING_DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"using\s+[A-Za-z_][A-Za-z0-9_.]*\s*;").unwrap());

const SYSTEM_PROMPT: &str = "You are a precise source-code classification assistant.";

/// Detector over a completion provider.
pub struct Detector<'a> {
    provider: &'a dyn CompletionProvider,
}

impl<'a> Detector<'a> {
    pub fn new(provider: &'a dyn CompletionProvider) -> Self {
        Self { provider }
    }

    /// Classify the main programming language of `code`.
    ///
    /// Sends the first 1000 characters with a one-word closed-set
    /// instruction, then normalizes (trim + lowercase) and validates the
    /// reply. An out-of-set reply goes through the `.NET` heuristic
    /// before being reported as unknown.
    pub async fn detect_language(&self, code: &str) -> Result<Detection, ProviderError> {
        let sample = head(code, DETECT_SAMPLE_CHARS);
        let prompt = format!(
            "Identify the main programming language of the following code. \
             Respond with only one word, the language name \
             (e.g. python, java, php, c, dotnet, android, ios):\n\n{sample}"
        );

        let reply = self.provider.complete(SYSTEM_PROMPT, &prompt).await?;
        let normalized = reply.trim().to_lowercase();
        info!(detected = %normalized, "language classification reply");

        Ok(resolve_language(&normalized, code))
    }

    /// Classify the application domain of `code`.
    ///
    /// Open-ended: the trimmed reply is returned verbatim. The domain is
    /// advisory only: it enriches the review prompt and is never
    /// matched against a closed set.
    pub async fn detect_domain(&self, code: &str) -> Result<String, ProviderError> {
        let sample = head(code, DETECT_SAMPLE_CHARS);
        let prompt = format!(
            "In one short phrase, identify the application domain of the \
             following code (for example: banking, e-commerce, healthcare, \
             embedded, games):\n\n{sample}"
        );

        let reply = self.provider.complete(SYSTEM_PROMPT, &prompt).await?;
        Ok(reply.trim().to_string())
    }
}

/// First `max_chars` characters of `text`.
fn head(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Map a normalized reply onto the supported key set.
///
/// An unmatched reply triggers the heuristic override: code carrying a
/// `using <Identifier>;` directive, or the literal `ActionResult` or
/// `namespace`, classifies as `dotnet`. The heuristic never overrides a
/// reply that already parsed to a valid key, even a wrong one; that gap
/// is inherited behavior, kept as-is.
fn resolve_language(normalized: &str, code: &str) -> Detection {
    if let Ok(key) = normalized.parse::<LanguageKey>() {
        return Detection::Known(key);
    }

    if USING_DIRECTIVE_RE.is_match(code)
        || code.contains("ActionResult")
        || code.contains("namespace")
    {
        return Detection::Known(LanguageKey::Dotnet);
    }

    Detection::Unknown(normalized.to_string())
}
