//! App-wide constants.
//!
//! Centralises the app name, environment variable names, prompt budgets,
//! and the review format contract so a rename only requires changing
//! this file.

/// Display name of the app (lowercase).
pub const APP_NAME: &str = "stickler";

/// Local config filename (e.g. `.stickler.toml` in the working directory).
pub const CONFIG_FILENAME: &str = ".stickler.toml";

/// Directory name under `~/.config/` for global config.
pub const CONFIG_DIR: &str = "stickler";

/// Default bind address for the HTTP server.
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Default directory holding per-language coding-standards documents.
pub const DEFAULT_STANDARDS_DIR: &str = "coding_standards";

// ── Environment variable names ──────────────────────────────────────

pub const ENV_PROVIDER: &str = "STICKLER_PROVIDER";
pub const ENV_MODEL: &str = "STICKLER_MODEL";
pub const ENV_API_KEY: &str = "STICKLER_API_KEY";
pub const ENV_BASE_URL: &str = "STICKLER_BASE_URL";
pub const ENV_BIND: &str = "STICKLER_BIND";
pub const ENV_STANDARDS_DIR: &str = "STICKLER_STANDARDS_DIR";

// ── Prompt budgets ──────────────────────────────────────────────────

/// Character cap applied to the extracted standards text and to the user
/// code before either is embedded in the review prompt.
pub const MAX_PROMPT_CHARS: usize = 15_000;

/// How many leading characters of the code are sent to the classification
/// prompts (language and domain detection).
pub const DETECT_SAMPLE_CHARS: usize = 1_000;

/// Marker appended when text is cut at a character budget.
pub const TRUNCATION_MARKER: &str = "\n... [truncated]";

// ── Review format contract ──────────────────────────────────────────
//
// The review prompt instructs the model to answer under these exact
// headings and the response parser anchors on them (case-insensitively).
// Changing one side breaks the other.

pub const HEADING_ERRORS: &str = "Errors:";
pub const HEADING_SUGGESTIONS: &str = "Suggestions:";
pub const HEADING_REVISED: &str = "Revised Code:";

/// Defaults substituted when a section is absent from the response.
pub const SENTINEL_ERRORS: &str = "No errors found.";
pub const SENTINEL_SUGGESTIONS: &str = "No suggestions found.";
pub const SENTINEL_REVISED: &str = "No revised code provided.";
