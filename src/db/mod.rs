//! Cat records and their persistence.
//!
//! [`cat`] owns the domain types (`CatId`, `Cat`, `Mood`) and the mood
//! derivation built on the behavior primitives; [`store`] persists cats in
//! SQLite and records incoming pats.

pub mod cat;
pub mod store;

pub use cat::{Cat, CatId, Mood, SPLOTCH_ID};
pub use store::{CatStore, StoreError};
