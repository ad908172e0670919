//! Cat domain types and mood derivation.
//!
//! A cat's mood is a pure function of three things: the current time, the
//! time of the latest pat, and the cat's identity. Identity feeds a
//! deterministic noise stream, so each cat's mood swings are reproducible
//! for any given instant yet look organic across time and differ between
//! cats.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::behavior::{spread, Md5Noise, SmoothNoise, TemporalNoise};
use crate::clock::Clock;

/// Unique identifier of a cat. Must be URL-safe.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatId(String);

/// Identifier of the OG, Splotch "Pat Junkie" the Cat.
pub const SPLOTCH_ID: &str = "splotch";

impl CatId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id's canonical byte form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Noise seed for this cat, given a domain-separation cue.
    ///
    /// Distinct (cue, id) pairs yield independent noise streams; the same
    /// pair always yields the same stream.
    pub fn seed(&self, cue: &str) -> Vec<u8> {
        let mut seed = Vec::with_capacity(cue.len() + self.0.len());
        seed.extend_from_slice(cue.as_bytes());
        seed.extend_from_slice(self.0.as_bytes());
        seed
    }

    /// Human-readable name derived from the id: each `-` or
    /// whitespace-separated word gets an uppercased first letter and a
    /// lowercased remainder.
    pub fn display_name(&self) -> String {
        let mut name = String::with_capacity(self.0.len());
        let mut start_of_word = true;
        for c in self.0.chars() {
            if c == '-' || c.is_whitespace() {
                name.push(c);
                start_of_word = true;
            } else if start_of_word {
                name.extend(c.to_uppercase());
                start_of_word = false;
            } else {
                name.extend(c.to_lowercase());
            }
        }
        name
    }
}

impl std::fmt::Display for CatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A cat's current state of mind.
///
/// `IdleBlink` and `Secret` are reserved extension points; the mood
/// derivation never returns them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Idle,
    IdleBlink,
    IdleHappy,
    Impatient,
    Pat,
    Secret,
}

impl Mood {
    /// Stable string form, used for template classes and serialization.
    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Idle => "idle",
            Mood::IdleBlink => "idle_blink",
            Mood::IdleHappy => "idle_happy",
            Mood::Impatient => "impatient",
            Mood::Pat => "pat",
            Mood::Secret => "secret",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A database record about a single cat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cat {
    /// Unique identifier of the cat.
    pub id: CatId,
    /// Human-readable name of the cat.
    pub name: String,
    /// Total number of pats received by the cat.
    pub pats: u64,
    /// Time when the latest pat was received.
    pub latest_pat: DateTime<Utc>,
}

/// Whole seconds as a `TimeDelta`, usable in constants.
const fn secs(secs: i64) -> TimeDelta {
    match TimeDelta::new(secs, 0) {
        Some(d) => d,
        None => panic!("duration out of range"),
    }
}

// Mood policy thresholds. Fixed constants, not configuration.
const PAT_WINDOW: TimeDelta = secs(5);
const HAPPY_WINDOW: TimeDelta = secs(30 * 60);
const BORED_AFTER: TimeDelta = secs(7 * 24 * 60 * 60);
const MOOD_SWING_PERIOD: TimeDelta = secs(5 * 60);
const MOOD_SWING_MAGNITUDE: TimeDelta = secs(3 * 60 * 60);

impl Cat {
    /// Mood corresponding to the cat's state as seen by `clock`.
    pub fn mood(&self, clock: &dyn Clock) -> Mood {
        self.mood_at(clock.now())
    }

    /// Mood at the instant `now`. Pure: recomputed fresh from the two
    /// timestamps and the cat's identity on every call.
    pub fn mood_at(&self, now: DateTime<Utc>) -> Mood {
        let since_pat = now - self.latest_pat;

        // Someone is petting the cat right now!
        if since_pat < PAT_WINDOW {
            return Mood::Pat;
        }

        // Someone petted the cat recently, he's happy.
        if since_pat < HAPPY_WINDOW {
            return Mood::IdleHappy;
        }

        // In the next three hours, the cat may remember getting petted and
        // get happy again. The swing is keyed by identity, so the memory
        // window is deterministic per cat and per absolute time instead of
        // a flat cutoff.
        let swing = spread(
            -MOOD_SWING_MAGNITUDE,
            MOOD_SWING_MAGNITUDE,
            self.happy_noise().at(now),
        );
        if since_pat + swing < HAPPY_WINDOW {
            return Mood::IdleHappy;
        }

        // Cat's just chillin'.
        if since_pat < BORED_AFTER {
            return Mood::Idle;
        }

        // It's been far too long since anyone played with the cat, she's bored.
        Mood::Impatient
    }

    fn happy_noise(&self) -> SmoothNoise<Md5Noise> {
        // The period is a positive compile-time constant, so construction
        // cannot fail.
        SmoothNoise::new(Md5Noise::new(self.id.seed("happy")), MOOD_SWING_PERIOD)
            .expect("mood swing period is positive")
    }
}
