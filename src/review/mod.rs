//! Review prompt assembly and submission.
//!
//! The prompt fixes a strict three-heading output contract that the
//! response parser anchors on, embeds the domain-consistency check, and
//! carries the standards text plus the (already truncated) user code.

use crate::constants::{HEADING_ERRORS, HEADING_REVISED, HEADING_SUGGESTIONS};
use crate::providers::{CompletionProvider, ProviderError};

/// System preamble for the review call.
pub const REVIEW_SYSTEM_PROMPT: &str = "You are a strict code review assistant.";

/// Assemble the review prompt.
///
/// Deterministic: the same inputs always produce the same prompt. The
/// heading strings are a hard contract with the parser; do not reword
/// them here without changing the parser's anchors.
pub fn build_prompt(standards: &str, domain: &str, code: &str) -> String {
    format!(
        "Always output in the exact format:\n\n\
         {HEADING_ERRORS}\n- List each error or violation here\n\n\
         {HEADING_SUGGESTIONS}\n- List each suggestion or improvement here\n\n\
         {HEADING_REVISED}\n```<language>\n<corrected code>\n```\n\n\
         The code belongs to the '{domain}' application domain. Flag any \
         identifiers whose vocabulary contradicts that domain.\n\n\
         Here is the coding standard:\n{standards}\n\n\
         Here is the user's code:\n{code}\n\n\
         Check for violations, suggest improvements, and provide a \
         corrected version of the code."
    )
}

/// Submit the review prompt and return the raw response text.
///
/// Single-shot: transport, quota, and auth failures surface as
/// [`ProviderError`] for the orchestrator to convert into a user-visible
/// message. Never retried.
pub async fn submit_review(
    provider: &dyn CompletionProvider,
    prompt: &str,
) -> Result<String, ProviderError> {
    provider.complete(REVIEW_SYSTEM_PROMPT, prompt).await
}
