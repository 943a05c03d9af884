//! Shared types used across all modules.
//!
//! This module defines the language-key table, the provider selection
//! enum, and the request-scoped review structures. Other modules import
//! from here rather than reaching into each other's internals.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::constants;

/// Canonical identifier for a supported language.
///
/// The set is closed: it mirrors the coding-standards documents shipped
/// with the app, and the detector validates the LLM's classification
/// reply against it. `ios` and `android` are platform keys rather than
/// languages proper, but they select their own standards documents.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LanguageKey {
    Php,
    Java,
    Ios,
    Dotnet,
    Android,
    C,
    Python,
}

impl LanguageKey {
    /// All supported keys in selector order.
    pub fn all() -> Vec<LanguageKey> {
        LanguageKey::iter().collect()
    }
}

/// Supported LLM provider backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderName {
    #[default]
    Gemini,
    Anthropic,
    #[serde(rename = "openai")]
    OpenAI,
    /// Any OpenAI-compatible API (e.g. Ollama, Together, local servers).
    #[serde(rename = "openai-compatible")]
    OpenAICompatible,
}

impl fmt::Display for ProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderName::Gemini => write!(f, "gemini"),
            ProviderName::Anthropic => write!(f, "anthropic"),
            ProviderName::OpenAI => write!(f, "openai"),
            ProviderName::OpenAICompatible => write!(f, "openai-compatible"),
        }
    }
}

impl std::str::FromStr for ProviderName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(ProviderName::Gemini),
            "anthropic" => Ok(ProviderName::Anthropic),
            "openai" => Ok(ProviderName::OpenAI),
            "openai-compatible" => Ok(ProviderName::OpenAICompatible),
            other => Err(format!(
                "unsupported provider: '{other}'. Supported: gemini, anthropic, openai, \
                 openai-compatible"
            )),
        }
    }
}

impl ProviderName {
    /// Returns the provider-specific environment variable name for the API key.
    ///
    /// These match the env var names used by rig-core's `from_env()` implementations.
    pub fn api_key_env_var(self) -> &'static str {
        match self {
            ProviderName::Gemini => "GEMINI_API_KEY",
            ProviderName::Anthropic => "ANTHROPIC_API_KEY",
            ProviderName::OpenAI | ProviderName::OpenAICompatible => "OPENAI_API_KEY",
        }
    }
}

/// The three sections extracted from a raw review response.
///
/// Every field is always populated: when a section is absent from the
/// response, the parser substitutes the matching sentinel default, so no
/// absent state ever reaches the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReview {
    pub errors: String,
    pub suggestions: String,
    pub revised_code: String,
}

impl Default for ParsedReview {
    fn default() -> Self {
        Self {
            errors: constants::SENTINEL_ERRORS.to_string(),
            suggestions: constants::SENTINEL_SUGGESTIONS.to_string(),
            revised_code: constants::SENTINEL_REVISED.to_string(),
        }
    }
}

/// The full field set handed to the view for one request.
///
/// `errors` and `suggestions` hold pre-escaped HTML fragments from the
/// output formatter and are inserted into the page as-is; `code_input`
/// and `revised_code` hold raw text and are escaped at render time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderFields {
    pub code_input: String,
    pub errors: String,
    pub suggestions: String,
    pub revised_code: String,
    pub code_domain: String,
    pub selected_language: Option<LanguageKey>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_key_display() {
        assert_eq!(LanguageKey::Php.to_string(), "php");
        assert_eq!(LanguageKey::Dotnet.to_string(), "dotnet");
        assert_eq!(LanguageKey::C.to_string(), "c");
    }

    #[test]
    fn language_key_from_str() {
        assert_eq!("python".parse::<LanguageKey>(), Ok(LanguageKey::Python));
        assert_eq!("ios".parse::<LanguageKey>(), Ok(LanguageKey::Ios));
        assert!("rust".parse::<LanguageKey>().is_err());
        assert!("".parse::<LanguageKey>().is_err());
    }

    #[test]
    fn language_key_all_is_closed_set() {
        let all = LanguageKey::all();
        assert_eq!(all.len(), 7);
        assert_eq!(all[0], LanguageKey::Php);
        assert_eq!(all[6], LanguageKey::Python);
    }

    #[test]
    fn provider_name_display_roundtrip() {
        for name in [
            ProviderName::Gemini,
            ProviderName::Anthropic,
            ProviderName::OpenAI,
            ProviderName::OpenAICompatible,
        ] {
            assert_eq!(name.to_string().parse::<ProviderName>(), Ok(name));
        }
    }

    #[test]
    fn provider_name_from_str_case_insensitive() {
        assert_eq!("Gemini".parse::<ProviderName>(), Ok(ProviderName::Gemini));
        assert_eq!(
            "ANTHROPIC".parse::<ProviderName>(),
            Ok(ProviderName::Anthropic)
        );
    }

    #[test]
    fn provider_name_from_str_invalid() {
        let err = "invalid".parse::<ProviderName>().unwrap_err();
        assert!(err.contains("unsupported provider"));
    }

    #[test]
    fn provider_name_default_is_gemini() {
        assert_eq!(ProviderName::default(), ProviderName::Gemini);
    }

    #[test]
    fn parsed_review_default_is_all_sentinels() {
        let review = ParsedReview::default();
        assert_eq!(review.errors, "No errors found.");
        assert_eq!(review.suggestions, "No suggestions found.");
        assert_eq!(review.revised_code, "No revised code provided.");
    }

    #[test]
    fn render_fields_default_is_empty() {
        let fields = RenderFields::default();
        assert!(fields.code_input.is_empty());
        assert!(fields.errors.is_empty());
        assert!(fields.selected_language.is_none());
    }
}
