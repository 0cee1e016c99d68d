//! Score store server.
//!
//! Serves the leaderboard collections over line-delimited JSON on
//! `LANE_DODGE_STORE_HOST:LANE_DODGE_STORE_PORT`. Records live in memory
//! unless `LANE_DODGE_STORE_DIR` names a directory to keep them in.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use lane_dodge::leaderboard::{run_store_server, FileStore, MemoryStore, StoreConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let config = StoreConfig::from_env();

    tokio::select! {
        res = serve(config) => res,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutting down");
            Ok(())
        }
    }
}

async fn serve(config: StoreConfig) -> Result<()> {
    match config.data_dir.clone() {
        Some(dir) => {
            let store = FileStore::open(&dir)
                .await
                .with_context(|| format!("opening store directory {}", dir.display()))?;
            tracing::info!(dir = %dir.display(), "persisting scores to disk");
            run_store_server(config, Arc::new(store), None).await
        }
        None => {
            tracing::info!("keeping scores in memory");
            run_store_server(config, Arc::new(MemoryStore::new()), None).await
        }
    }
}
