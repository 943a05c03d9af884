//! HTTP surface: one route serving the review form.
//!
//! GET renders the empty form; POST accepts the submitted code plus an
//! action discriminator (`analyze` | `clear`) and hands off to the
//! orchestrator. The page is a single self-contained HTML document;
//! dynamic text is escaped here, except the errors/suggestions fields
//! which arrive as pre-escaped fragments from the output formatter.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Form, Router};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::format::escape_html;
use crate::models::{LanguageKey, RenderFields};
use crate::orchestrator::{Orchestrator, ReviewAction};

/// Shared application state.
pub struct AppContext {
    pub orchestrator: Orchestrator,
}

/// Run the server on `bind` until the process is stopped.
pub async fn start_server(ctx: Arc<AppContext>, bind: &str) -> Result<()> {
    let addr: SocketAddr = bind.parse()?;
    let router = build_router(ctx);

    info!("listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

/// Build the router. Separated from [`start_server`] so tests can drive
/// it without binding a socket.
pub fn build_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(show_form).post(submit_form))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// The review form's POST body.
#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub action: String,
}

async fn show_form() -> Html<String> {
    Html(render_page(&RenderFields::default()))
}

async fn submit_form(
    State(ctx): State<Arc<AppContext>>,
    Form(form): Form<ReviewForm>,
) -> Html<String> {
    let action = match form.action.as_str() {
        "analyze" => ReviewAction::Analyze,
        "clear" => ReviewAction::Clear,
        // Unknown discriminator: render the empty form, same as a GET.
        _ => return Html(render_page(&RenderFields::default())),
    };

    let fields = ctx.orchestrator.handle(action, &form.code).await;
    Html(render_page(&fields))
}

/// Render the full page for one set of fields.
///
/// `fields.errors` and `fields.suggestions` are inserted as-is (they are
/// the formatter's pre-escaped fragments); everything else is escaped
/// here.
fn render_page(fields: &RenderFields) -> String {
    let selector = language_selector(fields.selected_language);
    let code_input = escape_html(&fields.code_input);
    let domain = escape_html(&fields.code_domain);
    let revised = escape_html(&fields.revised_code);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>stickler &mdash; coding standards review</title>
<style>
  body {{ font-family: sans-serif; max-width: 60rem; margin: 2rem auto; padding: 0 1rem; }}
  textarea {{ width: 100%; height: 16rem; font-family: monospace; }}
  pre {{ background: #f4f4f4; padding: 1rem; overflow-x: auto; }}
  mark {{ background: #fff3a3; }}
  section {{ margin-top: 1.5rem; }}
  .actions {{ margin-top: 0.5rem; }}
</style>
</head>
<body>
<h1>stickler</h1>
<form method="post" onsubmit="showLoader()">
  <textarea name="code" placeholder="Paste your code here">{code_input}</textarea>
  <div class="actions">
    <button type="submit" name="action" value="analyze">Analyze</button>
    <button type="submit" name="action" value="clear" formnovalidate>Clear</button>
  </div>
</form>
<div id="loader" style="display:none">Reviewing&hellip;</div>
<section>
  <label>Detected language: {selector}</label>
</section>
<section>
  <h2>Domain</h2>
  <p>{domain}</p>
</section>
<section>
  <h2>Errors</h2>
  <pre>{errors}</pre>
</section>
<section>
  <h2>Suggestions</h2>
  <p>{suggestions}</p>
</section>
<section>
  <h2>Revised code</h2>
  <pre id="revisedCode">{revised}</pre>
  <button type="button" onclick="copyRevisedCode()">Copy revised code</button>
</section>
<script>
function showLoader() {{
  document.getElementById("loader").style.display = "block";
}}
function copyRevisedCode() {{
  const text = document.getElementById("revisedCode").innerText;
  navigator.clipboard.writeText(text).then(
    () => alert("Revised code copied to clipboard."),
    (err) => alert("Failed to copy code: " + err)
  );
}}
</script>
</body>
</html>
"#,
        errors = fields.errors,
        suggestions = fields.suggestions,
    )
}

/// Render the language selector populated from the closed key set.
fn language_selector(selected: Option<LanguageKey>) -> String {
    let mut out = String::from(r#"<select name="language" disabled>"#);
    out.push_str(r#"<option value="">(detected automatically)</option>"#);
    for key in LanguageKey::all() {
        if selected == Some(key) {
            out.push_str(&format!(r#"<option value="{key}" selected>{key}</option>"#));
        } else {
            out.push_str(&format!(r#"<option value="{key}">{key}</option>"#));
        }
    }
    out.push_str("</select>");
    out
}
