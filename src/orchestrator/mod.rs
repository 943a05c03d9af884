//! Request orchestrator: sequences one review request end-to-end.
//!
//! One submission flows Idle -> LanguageDetected -> DomainDetected ->
//! StandardsLoaded -> ReviewRequested -> Parsed -> Rendered, strictly in
//! order, with an abort path reachable from every step. All failures are
//! converted into user-visible render fields here; nothing propagates to
//! the transport layer as an error.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::constants::MAX_PROMPT_CHARS;
use crate::detector::{Detection, Detector};
use crate::format::{escape_html, format_errors, highlight_suggestions};
use crate::models::RenderFields;
use crate::parser::parse_review;
use crate::providers::CompletionProvider;
use crate::review::{build_prompt, submit_review};
use crate::standards::StandardsRepository;
use crate::text::{sanitize, truncate};

/// The form's action discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Analyze,
    Clear,
}

/// Pipeline stage, tracked for logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Idle,
    LanguageDetected,
    DomainDetected,
    StandardsLoaded,
    ReviewRequested,
    Parsed,
    Rendered,
}

/// Orchestrates a single review request.
///
/// Owns the provider and standards repository behind `Arc` so the axum
/// handlers can share one instance across requests; each request is
/// still processed sequentially end-to-end with no shared mutable state.
pub struct Orchestrator {
    provider: Arc<dyn CompletionProvider>,
    standards: Arc<StandardsRepository>,
}

impl Orchestrator {
    pub fn new(provider: Arc<dyn CompletionProvider>, standards: Arc<StandardsRepository>) -> Self {
        Self {
            provider,
            standards,
        }
    }

    /// Process one form submission into the full render field set.
    ///
    /// Infallible by design: every failure path produces fields with a
    /// user-visible error string instead.
    pub async fn handle(&self, action: ReviewAction, code: &str) -> RenderFields {
        match action {
            // Clear short-circuits straight to Rendered with everything
            // reset; no detection or review runs.
            ReviewAction::Clear => {
                debug!("clear action, resetting fields");
                RenderFields::default()
            }
            ReviewAction::Analyze => self.analyze(code.trim()).await,
        }
    }

    async fn analyze(&self, code: &str) -> RenderFields {
        let mut stage = Stage::Idle;

        // Empty submission is not an error: stay Idle, render empty.
        if code.is_empty() {
            debug!("empty code submitted, nothing to analyze");
            return RenderFields::default();
        }

        let clean = sanitize(code);
        let detector = Detector::new(self.provider.as_ref());

        let key = match detector.detect_language(&clean).await {
            Ok(Detection::Known(key)) => key,
            Ok(Detection::Unknown(reply)) => {
                warn!(detected = %reply, "detected language is not supported");
                return abort(
                    code,
                    &format!("Unable to match detected language '{reply}' with any coding standard."),
                );
            }
            Err(e) => return abort_upstream(code, &e.to_string()),
        };
        advance(&mut stage, Stage::LanguageDetected);
        info!(language = %key, "language detected");

        let domain = match detector.detect_domain(&clean).await {
            Ok(domain) => domain,
            Err(e) => return abort_upstream(code, &e.to_string()),
        };
        advance(&mut stage, Stage::DomainDetected);
        info!(domain = %domain, "domain detected");

        let standards = match self.standards.load(key) {
            Ok(text) => text,
            Err(e) => return abort_upstream(code, &e.to_string()),
        };
        advance(&mut stage, Stage::StandardsLoaded);

        let code_trunc = truncate(&clean, MAX_PROMPT_CHARS);
        let prompt = build_prompt(&standards, &domain, &code_trunc);
        let raw = match submit_review(self.provider.as_ref(), &prompt).await {
            Ok(raw) => raw,
            Err(e) => return abort_upstream(code, &e.to_string()),
        };
        advance(&mut stage, Stage::ReviewRequested);

        let parsed = parse_review(raw.trim());
        advance(&mut stage, Stage::Parsed);

        let fields = RenderFields {
            code_input: code.to_string(),
            errors: format_errors(&parsed.errors),
            suggestions: highlight_suggestions(&parsed.suggestions),
            revised_code: parsed.revised_code,
            code_domain: domain,
            selected_language: Some(key),
        };
        advance(&mut stage, Stage::Rendered);
        fields
    }
}

fn advance(stage: &mut Stage, next: Stage) {
    debug!(from = ?stage, to = ?next, "stage transition");
    *stage = next;
}

/// Abort with an explanatory message, keeping the submitted code.
///
/// The message may echo model output (e.g. the unmatched language reply),
/// so it is escaped before being stored as the errors fragment. All
/// other review fields are discarded.
fn abort(code: &str, message: &str) -> RenderFields {
    RenderFields {
        code_input: code.to_string(),
        errors: escape_html(message),
        ..RenderFields::default()
    }
}

/// Abort for a failed upstream call (detector, standards, review).
///
/// The error's own rendering ("LLM API error: ...") is the user-visible
/// message; suggestions and revised code stay empty.
fn abort_upstream(code: &str, message: &str) -> RenderFields {
    warn!(error = %message, "request aborted on upstream failure");
    abort(code, message)
}
