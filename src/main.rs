//! stickler — AI-powered coding-standards review web app.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use stickler::config::Config;
use stickler::constants;
use stickler::env::Env;
use stickler::orchestrator::Orchestrator;
use stickler::providers::rig::RigProvider;
use stickler::server::{self, AppContext};
use stickler::standards::{PdfExtractor, StandardsRepository};

/// AI-powered coding-standards review web app.
#[derive(Parser, Debug)]
#[command(name = constants::APP_NAME, version)]
struct Cli {
    /// Address to bind the HTTP server to.
    #[arg(long, env = "STICKLER_BIND")]
    bind: Option<String>,

    /// Directory holding the per-language coding-standards documents.
    #[arg(long, env = "STICKLER_STANDARDS_DIR")]
    standards_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=warn")),
        )
        .init();

    let work_dir = std::env::current_dir().ok();
    let mut config = Config::load(work_dir.as_deref(), &Env::real())
        .context("failed to load configuration")?;

    // CLI flags take priority over config and env.
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    if let Some(dir) = cli.standards_dir {
        config.standards.dir = dir;
    }

    // Refuse to start without a working provider setup; failing here
    // beats failing on the first submission.
    let provider = RigProvider::new(config.provider.clone()).map_err(|e| anyhow::anyhow!("{e}"))?;

    let standards = StandardsRepository::new(config.standards.dir.clone(), Box::new(PdfExtractor));

    let ctx = Arc::new(AppContext {
        orchestrator: Orchestrator::new(Arc::new(provider), Arc::new(standards)),
    });

    server::start_server(ctx, &config.server.bind).await
}
