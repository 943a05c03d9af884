//! CompletionProvider trait and LLM integration.
//!
//! Provides an abstraction layer over rig-core to decouple the
//! codebase from the specific LLM library. The detector and the review
//! requester both go through this trait, and tests substitute scripted
//! mocks for it.

pub mod rig;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the completion provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("LLM API error: {0}")]
    ApiError(String),

    #[error("provider not configured: {0}")]
    NotConfigured(String),
}

/// Trait for single-shot LLM completions.
///
/// Implementations send one prompt and return the raw response text.
/// Every call is attempted exactly once: failures are reported to the
/// caller, never retried.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send a prompt under a system preamble and return the raw reply.
    async fn complete(&self, system: &str, user: &str) -> Result<String, ProviderError>;
}
