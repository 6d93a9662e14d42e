//! Walkboard - feedback tracking backend for site walks

use clap::Parser;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use walkboard::{config::Args, seed, server, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("walkboard={},info", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    info!("======================================");
    info!("  Walkboard - site walk feedback API");
    info!("======================================");
    info!("Node ID: {}", args.node_id);
    info!("Listen: {}", args.listen);
    info!(
        "Mode: {}",
        if args.dev_mode { "DEVELOPMENT" } else { "PRODUCTION" }
    );
    info!("Token expiry: {}s", args.jwt_expiry_seconds);
    info!("======================================");

    if args.dev_mode {
        warn!("Development mode enabled - insecure default JWT secret allowed");
    }

    let state = Arc::new(AppState::new(args));

    if state.args.seed {
        seed::seed(&state.store, state.args.seed_users)
            .map_err(|e| anyhow::anyhow!("Seeding failed: {e}"))?;
    }

    server::run(state).await?;

    Ok(())
}
