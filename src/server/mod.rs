//! HTTP server for the pat junkie.
//!
//! # Endpoints
//!
//! - `GET /`       — Index page with the cat's name, pat count and mood
//! - `GET /pat/`   — Record a pat, redirect back to the index
//! - `GET /health` — Liveness probe
//! - `GET /static` — Static assets

pub mod routes;

pub use routes::{app_router, AppState};
