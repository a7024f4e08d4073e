//! Survey server binary for the happiness mock service.
//!
//! Wires configuration, seed data, and the HTTP API together and serves
//! until shut down. All records live in memory and are lost on exit.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `happiness-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Load seed data (built-in or from the configured JSON file)
//! 4. Serve the API until `Ctrl-C` / `SIGTERM`

mod config;
mod error;

use std::sync::Arc;

use happiness_api::{AppState, SeedData, start_server};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::ServiceConfig;
use crate::error::AppError;

/// Application entry point for the survey server.
///
/// # Errors
///
/// Returns an error if configuration, seed loading, or the server fails.
#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Load configuration. Logging is not up yet, so the level it
    //    names can take effect.
    let config = ServiceConfig::load()?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!(
        host = config.server.host,
        port = config.server.port,
        log_level = config.logging.level,
        "happiness-server starting"
    );

    // 3. Load seed data.
    let seed = match &config.seed.path {
        Some(path) => {
            let seed = SeedData::from_file(path)?;
            info!(path = %path.display(), "Seed file loaded");
            seed
        }
        None => SeedData::builtin(),
    };
    info!(
        individual = seed.individual.len(),
        aggregate = seed.aggregate.len(),
        "Record store seeded"
    );

    // 4. Serve.
    let state = Arc::new(AppState::with_seed(seed));
    start_server(&config.server_config(), state).await?;

    info!("happiness-server stopped");
    Ok(())
}
