//! Coding-standards repository.
//!
//! Maps each language key to its on-disk reference document(s), extracts
//! text from them, and returns one sanitized, budget-capped blob for the
//! review prompt. Documents are re-read and re-extracted on every
//! request; nothing is cached, so a swapped-out standards file takes
//! effect immediately.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use thiserror::Error;
use tracing::warn;

use crate::constants::MAX_PROMPT_CHARS;
use crate::models::LanguageKey;
use crate::text::{sanitize, truncate};

/// Errors from the standards repository.
#[derive(Error, Debug)]
pub enum StandardsError {
    #[error("no coding standard registered for language '{0}'")]
    UnknownLanguage(String),
}

/// Text extraction from a reference document.
///
/// The PDF machinery is an external collaborator behind this seam; tests
/// substitute a mock that returns canned text or fails on demand.
pub trait TextExtractor: Send + Sync {
    /// Extract the plain text of one document.
    fn extract(&self, path: &Path) -> Result<String, String>;
}

/// Extractor backed by the `pdf-extract` crate.
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> Result<String, String> {
        pdf_extract::extract_text(path).map_err(|e| e.to_string())
    }
}

/// Repository of per-language coding-standards documents.
///
/// The key → filename table is static and ordered; it must be kept in
/// sync with the files shipped in the standards directory. A missing or
/// corrupt file degrades to a placeholder at load time, it does not make
/// registration fail.
pub struct StandardsRepository {
    dir: PathBuf,
    extractor: Box<dyn TextExtractor>,
    table: IndexMap<LanguageKey, Vec<&'static str>>,
}

impl StandardsRepository {
    /// Create a repository rooted at `dir` using the given extractor.
    pub fn new(dir: impl Into<PathBuf>, extractor: Box<dyn TextExtractor>) -> Self {
        let mut table = IndexMap::new();
        table.insert(LanguageKey::Php, vec!["Coding_Standards_PHP.pdf"]);
        table.insert(LanguageKey::Java, vec!["Coding_Standards_Java.pdf"]);
        table.insert(LanguageKey::Ios, vec!["Coding_Standards_iOS.pdf"]);
        table.insert(
            LanguageKey::Dotnet,
            vec![
                "Coding_Standards_Dot_Net.pdf",
                "Coding_Standards_Dot_Net_Web.pdf",
            ],
        );
        table.insert(LanguageKey::Android, vec!["Coding_Standards_Android.pdf"]);
        table.insert(LanguageKey::C, vec!["Coding_Standards_C.pdf"]);
        table.insert(LanguageKey::Python, vec!["Coding_Standards_Python.pdf"]);

        Self {
            dir: dir.into(),
            extractor,
            table,
        }
    }

    /// Load the standards text for one language.
    ///
    /// Extracts every registered document for the key, joins them with
    /// newlines, then sanitizes and truncates the result to the prompt
    /// budget. A document that fails to extract contributes an error
    /// placeholder instead of blocking the others.
    pub fn load(&self, key: LanguageKey) -> Result<String, StandardsError> {
        let files = self
            .table
            .get(&key)
            .ok_or_else(|| StandardsError::UnknownLanguage(key.to_string()))?;

        let mut parts = Vec::with_capacity(files.len());
        for file in files {
            let path = self.dir.join(file);
            match self.extractor.extract(&path) {
                Ok(text) => parts.push(text),
                Err(e) => {
                    warn!(file = %file, error = %e, "failed to extract standards document");
                    parts.push(format!("Error reading {file}: {e}"));
                }
            }
        }

        Ok(truncate(&sanitize(&parts.join("\n")), MAX_PROMPT_CHARS))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    /// Extractor with per-filename canned results.
    struct MockExtractor {
        texts: HashMap<String, Result<String, String>>,
    }

    impl MockExtractor {
        fn new(entries: impl IntoIterator<Item = (&'static str, Result<String, String>)>) -> Self {
            Self {
                texts: entries
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect(),
            }
        }
    }

    impl TextExtractor for MockExtractor {
        fn extract(&self, path: &Path) -> Result<String, String> {
            let name = path.file_name().unwrap().to_string_lossy().to_string();
            self.texts
                .get(&name)
                .cloned()
                .unwrap_or_else(|| Err("no such file".to_string()))
        }
    }

    #[test]
    fn loads_single_document_text() {
        let extractor = MockExtractor::new([(
            "Coding_Standards_Python.pdf",
            Ok("Use snake_case for functions.".to_string()),
        )]);
        let repo = StandardsRepository::new("standards", Box::new(extractor));
        let text = repo.load(LanguageKey::Python).unwrap();
        assert_eq!(text, "Use snake_case for functions.");
    }

    #[test]
    fn concatenates_multiple_documents_with_newline() {
        let extractor = MockExtractor::new([
            ("Coding_Standards_Dot_Net.pdf", Ok("core rules".to_string())),
            (
                "Coding_Standards_Dot_Net_Web.pdf",
                Ok("web rules".to_string()),
            ),
        ]);
        let repo = StandardsRepository::new("standards", Box::new(extractor));
        let text = repo.load(LanguageKey::Dotnet).unwrap();
        assert_eq!(text, "core rules\nweb rules");
    }

    #[test]
    fn failed_document_degrades_to_placeholder() {
        let extractor = MockExtractor::new([
            (
                "Coding_Standards_Dot_Net.pdf",
                Err("file is corrupt".to_string()),
            ),
            (
                "Coding_Standards_Dot_Net_Web.pdf",
                Ok("web rules".to_string()),
            ),
        ]);
        let repo = StandardsRepository::new("standards", Box::new(extractor));
        let text = repo.load(LanguageKey::Dotnet).unwrap();
        assert_eq!(
            text,
            "Error reading Coding_Standards_Dot_Net.pdf: file is corrupt\nweb rules"
        );
    }

    #[test]
    fn result_is_sanitized_and_truncated() {
        let long = "a".repeat(20_000);
        let extractor = MockExtractor::new([(
            "Coding_Standards_C.pdf",
            Ok(format!("caf\u{e9}\n{long}")),
        )]);
        let repo = StandardsRepository::new("standards", Box::new(extractor));
        let text = repo.load(LanguageKey::C).unwrap();
        assert!(text.starts_with("caf "));
        assert!(text.ends_with("\n... [truncated]"));
        assert_eq!(
            text.chars().count(),
            MAX_PROMPT_CHARS + "\n... [truncated]".chars().count()
        );
    }

    #[test]
    fn every_language_key_is_registered() {
        let extractor = MockExtractor::new([]);
        let repo = StandardsRepository::new("standards", Box::new(extractor));
        for key in LanguageKey::all() {
            // Extraction fails (mock has no entries), but registration
            // must hold for the whole closed set.
            let text = repo.load(key).unwrap();
            assert!(text.contains("Error reading"), "missing table entry for {key}");
        }
    }
}
