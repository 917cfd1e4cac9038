//! Sage worker binary — runs the tutor agent inside a LiveKit room.
//!
//! Parses the avatar identifier and config path, wires the platform session
//! (STT, TTS, VAD, turn detection, avatar rendering), and serves learner
//! turns through the Socratic tutor until SIGINT/SIGTERM.

mod config;
mod error;
mod run;
mod segment;

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Runs the Sage tutor agent in a LiveKit room.
#[derive(Parser, Debug)]
#[command(name = "sage-worker")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Avatar resource to render. Falls back to the provider default.
    #[arg(long, env = "SAGE_AVATAR_ID")]
    avatar_id: Option<String>,

    /// Path to the worker config file.
    #[arg(long, env = "SAGE_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Room to join, overriding the configured room.
    #[arg(long)]
    room: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .as_deref()
        .map(|p| p.to_string_lossy().into_owned())
        .or_else(|| Some("worker.toml".to_string()));

    let mut config = config::load_config(config_path.as_deref())
        .expect("failed to load configuration — the worker cannot start without valid config");

    // Initialize tracing
    let filter =
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    if let Some(room) = cli.room {
        config.agent.room = room;
    }
    if let Some(avatar_id) = cli.avatar_id {
        match config.avatar.as_mut() {
            Some(avatar) => avatar.avatar_id = Some(avatar_id),
            None => tracing::warn!(
                "--avatar-id given but no [avatar] provider is configured; ignoring"
            ),
        }
    }

    tracing::info!(
        room = %config.agent.room,
        identity = %config.agent.identity,
        "starting sage worker"
    );

    if let Err(e) = run::run(config).await {
        tracing::error!("worker failed: {}", e);
        std::process::exit(1);
    }

    tracing::info!("sage worker shut down");
}
