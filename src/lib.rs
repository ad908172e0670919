//! # pat
//!
//! The personal web page of Splotch the "Pat Junkie" — a virtual cat that
//! craves pats. The interesting part is the behavior engine: the cat's mood
//! is a deterministic, pure function of the current time, the time of the
//! latest pat, and the cat's identity, built on seed-keyed temporal noise
//! with smootherstep interpolation. The web, storage and template layers are
//! thin glue around it.

pub mod behavior;
pub mod clock;
pub mod db;
pub mod server;
pub mod tmpl;

pub use behavior::{spread, Md5Noise, SmoothNoise, TemporalNoise};
pub use clock::{Clock, FixedClock, SystemClock};
pub use db::{Cat, CatId, CatStore, Mood};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
