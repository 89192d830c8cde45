//! MoodTunes - main entry point
//!
//! Starts the session service and its HTTP/SSE interface, then serves the
//! embedded browser page that provides webcam capture and the YouTube
//! player.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moodtunes::api;
use moodtunes::config::Config;
use moodtunes::remote::{DetectionClient, PlaylistClient};
use moodtunes::session::SessionManager;

/// Command-line arguments for moodtunes
#[derive(Parser, Debug)]
#[command(name = "moodtunes")]
#[command(about = "Emotion-driven music player service")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "MOODTUNES_PORT")]
    port: Option<u16>,

    /// Emotion detection endpoint URL
    #[arg(long, env = "MOODTUNES_DETECT_URL")]
    detect_url: Option<String>,

    /// Playlist endpoint URL
    #[arg(long, env = "MOODTUNES_PLAYLIST_URL")]
    playlist_url: Option<String>,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodtunes=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting MoodTunes v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    // Parse command-line arguments and resolve configuration
    let args = Args::parse();
    let config = Config::resolve(args.port, args.detect_url, args.playlist_url, args.config)
        .context("Failed to resolve configuration")?;

    info!("Detection endpoint: {}", config.detect_url);
    info!("Playlist endpoint: {}", config.playlist_url);

    // Build remote clients and the session service
    let detection = DetectionClient::new(config.detect_url.clone())
        .context("Failed to build detection client")?;
    let playlists = PlaylistClient::new(config.playlist_url.clone())
        .context("Failed to build playlist client")?;
    let manager = Arc::new(SessionManager::new(detection, playlists));

    // Serve until shutdown
    api::run(&config, manager, shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
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
