//! Time-driven behavior primitives.
//!
//! The cat's personality is built out of deterministic, time-keyed noise:
//! [`noise`] turns (seed, timestamp) into a smooth pseudo-random signal in
//! [0, 1], and [`spread`] maps that signal onto arbitrary numeric ranges.
//! Everything here is a pure function of its inputs, so concurrent request
//! handlers can call into it freely with no synchronization.

pub mod noise;
pub mod spread;

pub use noise::{BehaviorError, Md5Noise, SmoothNoise, TemporalNoise};
pub use spread::{spread, Spreadable};
