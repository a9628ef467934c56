//! nfc-checker - News fact-check service
//!
//! Detects checkable claims in article text, verifies them against the claim
//! classification service, and publishes verdicts, corrections and
//! highlights over HTTP + SSE.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nfc_common::config::{resolve_port, resolve_verifier_url, ConfigResolver, TomlConfig};
use nfc_common::events::EventBus;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use nfc_checker::config::SharedSettings;
use nfc_checker::extractors::PatternClaimDetector;
use nfc_checker::services::VerifierClient;
use nfc_checker::types::{Article, ClaimDetector};
use nfc_checker::workflow::AnalysisOrchestrator;
use nfc_checker::AppState;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", ",
    env!("BUILD_PROFILE"),
    ", built ",
    env!("BUILD_TIMESTAMP"),
    ")"
);

/// Event bus capacity
const EVENT_BUS_CAPACITY: usize = 100;

/// Command-line arguments for nfc-checker
#[derive(Parser, Debug)]
#[command(name = "nfc-checker")]
#[command(about = "News fact-check service")]
#[command(version = VERSION)]
struct Args {
    /// Path to TOML config file (overrides NFC_CONFIG and platform lookup)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP service
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Address to bind
        #[arg(short, long)]
        bind: Option<String>,

        /// Verifier base URL
        #[arg(long)]
        verifier_url: Option<String>,
    },

    /// Analyze one article (JSON file) and print the report
    Analyze {
        /// Article JSON: { "title", "url", "paragraphs" }
        article: PathBuf,

        /// Verifier base URL
        #[arg(long)]
        verifier_url: Option<String>,
    },

    /// Print the claims detected in one article (no verification)
    Detect {
        /// Article JSON: { "title", "url", "paragraphs" }
        article: PathBuf,
    },

    /// Probe the verifier's health endpoint
    VerifierHealth {
        /// Verifier base URL
        #[arg(long)]
        verifier_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = ConfigResolver::new(args.config.clone())
        .load()
        .context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match args.command {
        Command::Serve {
            port,
            bind,
            verifier_url,
        } => serve(&config, port, bind, verifier_url).await,
        Command::Analyze {
            article,
            verifier_url,
        } => analyze(&config, &article, verifier_url).await,
        Command::Detect { article } => detect(&article),
        Command::VerifierHealth { verifier_url } => verifier_health(&config, verifier_url).await,
    }
}

async fn serve(
    config: &TomlConfig,
    port: Option<u16>,
    bind: Option<String>,
    verifier_url: Option<String>,
) -> Result<()> {
    let port = resolve_port(port, config)?;
    let bind = bind.unwrap_or_else(|| config.bind_address.clone());
    let verifier = verifier_client(config, verifier_url)?;

    info!("Starting nfc-checker {}", VERSION);
    info!("Verifier: {}", verifier.base_url());

    match verifier.health_check().await {
        Ok(_) => info!("Verifier is healthy"),
        Err(e) => warn!(error = %e, "Verifier is not healthy; claims will get fallback verdicts until it recovers"),
    }

    let settings = SharedSettings::new(config.analysis.clone());
    let event_bus = EventBus::new(EVENT_BUS_CAPACITY);
    let state = AppState::new(Arc::new(verifier), settings, event_bus);
    let app = nfc_checker::build_router(state);

    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", bind, port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn analyze(config: &TomlConfig, path: &Path, verifier_url: Option<String>) -> Result<()> {
    let article = read_article(path)?;
    let verifier = verifier_client(config, verifier_url)?;

    let orchestrator = AnalysisOrchestrator::new(
        Arc::new(PatternClaimDetector::new()),
        Arc::new(verifier),
        Arc::new(SharedSettings::new(config.analysis.clone())),
    );

    let report = orchestrator.run(&article).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn detect(path: &Path) -> Result<()> {
    let article = read_article(path)?;
    let claims = PatternClaimDetector::new().detect(&article.paragraphs);
    println!("{}", serde_json::to_string_pretty(&claims)?);
    Ok(())
}

async fn verifier_health(config: &TomlConfig, verifier_url: Option<String>) -> Result<()> {
    let verifier = verifier_client(config, verifier_url)?;
    let health = verifier
        .health_check()
        .await
        .with_context(|| format!("Verifier at {} is not healthy", verifier.base_url()))?;

    println!(
        "{}: {} (model loaded: {})",
        verifier.base_url(),
        health.status,
        health
            .model_loaded
            .map_or_else(|| "unknown".to_string(), |loaded| loaded.to_string())
    );
    Ok(())
}

fn verifier_client(config: &TomlConfig, cli_url: Option<String>) -> Result<VerifierClient> {
    let url = resolve_verifier_url(cli_url.as_deref(), config);
    let timeout = match config.verifier_timeout_secs {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };
    Ok(VerifierClient::new(url, timeout)?)
}

fn read_article(path: &Path) -> Result<Article> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read article {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse article JSON {}", path.display()))
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
