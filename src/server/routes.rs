//! Axum route handlers for the pat web frontend.
//!
//! # Routes
//!
//! - `GET  /`        — Renders the index page for Splotch
//! - `GET  /pat/`    — Records a pat for Splotch, redirects to `/`
//! - `GET  /health`  — Returns `{"status": "ok", "version": ...}`
//! - `GET  /static/` — Serves static assets from disk

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
    routing::get,
    Json, Router,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::clock::Clock;
use crate::db::{Cat, CatId, CatStore, StoreError, SPLOTCH_ID};
use crate::tmpl::TEMPLATES;

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// Cat storage.
    pub store: Arc<CatStore>,
    /// Time source threaded into mood derivation and pat recording.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(store: Arc<CatStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState, static_dir: PathBuf) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/pat/", get(pat_handler))
        .route("/health", get(health_handler))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health — liveness probe.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "service": "pat",
    }))
}

/// GET / — index page with the cat's current mood.
async fn index_handler(
    State(state): State<AppState>,
) -> Result<Html<String>, (StatusCode, String)> {
    let splotch = state
        .store
        .cat_by_id(&CatId::new(SPLOTCH_ID))
        .map_err(|e| {
            // Should never happen: Splotch is seeded at bootstrap.
            tracing::error!("Splotch went missing: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "oops, Splotch went missing 🙀".to_string(),
            )
        })?;

    render_index(&splotch, splotch.mood(state.clock.as_ref())).map_err(|e| {
        tracing::error!("Failed to render index: {e}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "failed to render page".to_string(),
        )
    })
}

/// GET /pat/ — pat action; records the pat and sends the visitor back.
async fn pat_handler(
    State(state): State<AppState>,
) -> Result<Redirect, (StatusCode, String)> {
    let now = state.clock.now();
    match state.store.record_pat(&CatId::new(SPLOTCH_ID), now) {
        Ok(()) => Ok(Redirect::to("/")),
        Err(StoreError::NotFound { id }) => Err((
            StatusCode::NOT_FOUND,
            format!("no cat named {id} lives here"),
        )),
        Err(e) => {
            tracing::error!("Failed to pat Splotch: {e}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to pat Splotch".to_string(),
            ))
        }
    }
}

fn render_index(cat: &Cat, mood: crate::db::Mood) -> Result<Html<String>, tera::Error> {
    let mut ctx = tera::Context::new();
    ctx.insert("name", &cat.name);
    ctx.insert("pats", &cat.pats);
    ctx.insert("mood", mood.as_str());
    Ok(Html(TEMPLATES.render("index.html", &ctx)?))
}
