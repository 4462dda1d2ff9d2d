//! mindease-server - MindEase web application
//!
//! Serves the about, chatbot and mood analyzer pages plus the JSON API they
//! call. All analysis is delegated to hosted Azure services.

use anyhow::{Context, Result};
use clap::Parser;
use mindease_common::config::{CliOverrides, ServerConfig};
use mindease_server::providers::Providers;
use mindease_server::{build_router, AppState};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Interval between idle-session sweeps
const PRUNE_INTERVAL: Duration = Duration::from_secs(60);

/// Command-line arguments for mindease-server
#[derive(Parser, Debug)]
#[command(name = "mindease-server")]
#[command(about = "MindEase mental health web application")]
#[command(version)]
struct Args {
    /// Path to TOML config file
    #[arg(short, long, env = "MINDEASE_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    bind: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Local .env is optional
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let cli = CliOverrides {
        config_path: args.config,
        bind_address: args.bind,
        port: args.port,
        log_level: args.log_level,
    };

    let config = ServerConfig::resolve(&cli).context("Failed to resolve configuration")?;

    // RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    info!(
        "Starting MindEase (mindease-server) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match &config.config_file {
        Some(path) => info!("Loaded config file: {}", path.display()),
        None => warn!("No config file found, using environment and defaults"),
    }
    for setting in config.azure.missing_settings() {
        warn!("{} is not set; features using it will report the service as unavailable", setting);
    }
    info!(
        speech_endpoint = %config.azure.effective_speech_endpoint(),
        deployment = %config.azure.gpt_deployment,
        "Provider settings resolved"
    );

    let providers = Providers::azure(&config.azure).context("Failed to build HTTP client")?;
    let state = AppState::new(providers, config.session_idle_timeout);

    let sessions = state.sessions.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PRUNE_INTERVAL);
        loop {
            interval.tick().await;
            let pruned = sessions.prune_idle().await;
            if pruned > 0 {
                info!(pruned, "Dropped idle sessions");
            }
        }
    });

    let app = build_router(state);

    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("mindease-server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("mindease-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
