//! pat HTTP server binary.
//!
//! Serves the pat junkie's web page and records incoming pats.
//!
//! # Environment Variables
//!
//! - `PORT` — HTTP port (default: 8080)
//! - `PAT_DB` — SQLite database path (default: "pat.db")
//! - `PAT_STATIC` — Static asset directory (default: "static")
//! - `RUST_LOG` — Tracing filter (default: "info")
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin server
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;

use pat::clock::{Clock, SystemClock};
use pat::db::CatStore;
use pat::server::{app_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,pat=debug".into()),
        )
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let bind_addr = format!("0.0.0.0:{}", port);
    let db_path = std::env::var("PAT_DB").unwrap_or_else(|_| "pat.db".to_string());
    let static_dir = PathBuf::from(std::env::var("PAT_STATIC").unwrap_or_else(|_| "static".to_string()));

    let clock = Arc::new(SystemClock);

    let store = CatStore::open(&db_path)
        .with_context(|| format!("failed to open cat database at {db_path}"))?;
    store
        .bootstrap(clock.now())
        .context("failed to bootstrap cat database")?;
    tracing::info!("Cat database ready at {db_path}");

    let state = AppState::new(Arc::new(store), clock);
    let app = app_router(state, static_dir);

    tracing::info!("pat server starting on {bind_addr}");
    tracing::info!("Endpoints:");
    tracing::info!("  GET /       — Splotch's page");
    tracing::info!("  GET /pat/   — pat Splotch");
    tracing::info!("  GET /health — liveness probe");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}
