//! Deterministic, time-dependent noise sources.
//!
//! [`Md5Noise`] hashes a seed together with a timestamp into a value in
//! [0, 1]; [`SmoothNoise`] re-samples any underlying source on a fixed time
//! grid and interpolates between grid points with a smootherstep polynomial,
//! so the signal has no jumps at grid boundaries.
//!
//! Returned numbers are not cryptographically secure.

use chrono::{DateTime, TimeDelta, Utc};
use md5::{Digest, Md5};
use thiserror::Error;

/// Errors raised when constructing behavior primitives.
#[derive(Debug, Error)]
pub enum BehaviorError {
    /// The smoothing period must be strictly positive and representable in
    /// nanoseconds.
    #[error("invalid smoothing period: {period}")]
    InvalidPeriod { period: TimeDelta },
}

/// A deterministic scalar signal over time.
///
/// `at` is a pure function: the same timestamp always produces the same
/// value, across calls and across processes, and the value is always within
/// the closed interval [0, 1]. Implementations hold no mutable state and are
/// safe to share between threads.
///
/// Valid for any time within the signed 64-bit nanosecond range around the
/// Unix epoch (roughly years 1677–2262); timestamps outside that window
/// saturate to the nearest bound, so distinct out-of-range times may alias.
pub trait TemporalNoise {
    /// Returns a pseudo-random, deterministic value in [0, 1] for time `t`.
    fn at(&self, t: DateTime<Utc>) -> f64;
}

/// Nanoseconds since the Unix epoch, saturated to the representable range.
fn epoch_nanos(t: DateTime<Utc>) -> i64 {
    match t.timestamp_nanos_opt() {
        Some(nanos) => nanos,
        None if t.timestamp() > 0 => i64::MAX,
        None => i64::MIN,
    }
}

/// Hash-based, pseudo-random, time-dependent noise.
///
/// The seed may be any byte sequence; distinct seeds yield independent noise
/// streams, and the same seed always yields the same stream. Calls to
/// [`TemporalNoise::at`] never mutate the seed.
#[derive(Debug, Clone)]
pub struct Md5Noise {
    seed: Vec<u8>,
}

impl Md5Noise {
    /// Creates a noise source keyed by `seed`.
    pub fn new(seed: impl Into<Vec<u8>>) -> Self {
        Self { seed: seed.into() }
    }
}

impl TemporalNoise for Md5Noise {
    fn at(&self, t: DateTime<Utc>) -> f64 {
        // Canonical fixed-width encoding: big-endian epoch nanoseconds.
        let encoded = epoch_nanos(t).to_be_bytes();

        let mut hasher = Md5::new();
        hasher.update(&self.seed);
        hasher.update(encoded);
        let digest = hasher.finalize();

        // First 8 digest bytes as a big-endian u64, normalized into [0, 1].
        let prefix = digest
            .iter()
            .take(8)
            .fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
        prefix as f64 / u64::MAX as f64
    }
}

/// Smooth pseudo-random noise dependent on time.
///
/// Samples the underlying source on the grid defined by `period` (referenced
/// to the Unix epoch) and applies smootherstep interpolation between grid
/// points. The output equals the underlying sample exactly at grid points and
/// has zero first derivative there, so consecutive windows join without
/// discontinuities. Output stays in [0, 1] because it is a convex combination
/// of two in-range samples.
///
/// Periods tiny relative to f64 precision of nanosecond counts degrade the
/// interpolation fraction; that is a documented precision limit, not an error.
#[derive(Debug, Clone)]
pub struct SmoothNoise<N> {
    underlying: N,
    period_nanos: i64,
}

impl<N: TemporalNoise> SmoothNoise<N> {
    /// Wraps `underlying`, re-sampled every `period`.
    ///
    /// Fails with [`BehaviorError::InvalidPeriod`] unless the period is
    /// strictly positive and representable in nanoseconds.
    pub fn new(underlying: N, period: TimeDelta) -> Result<Self, BehaviorError> {
        match period.num_nanoseconds() {
            Some(nanos) if nanos > 0 => Ok(Self {
                underlying,
                period_nanos: nanos,
            }),
            _ => Err(BehaviorError::InvalidPeriod { period }),
        }
    }
}

impl<N: TemporalNoise> TemporalNoise for SmoothNoise<N> {
    fn at(&self, t: DateTime<Utc>) -> f64 {
        let nanos = epoch_nanos(t);
        // Truncate down to the grid, floor-style so pre-epoch times round
        // toward the past as well.
        let t0 = nanos.div_euclid(self.period_nanos) * self.period_nanos;
        let t1 = t0.saturating_add(self.period_nanos);

        let v0 = self.underlying.at(DateTime::from_timestamp_nanos(t0));
        let v1 = self.underlying.at(DateTime::from_timestamp_nanos(t1));
        v0 + smoother_step(t0, t1, nanos) * (v1 - v0)
    }
}

/// Clamps `v` to the [0, 1] interval.
fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

/// Smootherstep easing between the `before` and `after` grid points, all
/// expressed as epoch nanoseconds. Zero first derivative at both endpoints.
fn smoother_step(before: i64, after: i64, now: i64) -> f64 {
    let edge0 = before as f64;
    let edge1 = after as f64;
    let x = clamp01((now as f64 - edge0) / (edge1 - edge0));
    x * x * x * (x * (6.0 * x - 15.0) + 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(secs: i64, nanos: u32) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, nanos).unwrap()
    }

    fn check_determinism(noise: &dyn TemporalNoise, t: DateTime<Utc>) {
        assert_eq!(noise.at(t), noise.at(t), "non-deterministic at {t}");
    }

    fn check_range(noise: &dyn TemporalNoise, t: DateTime<Utc>) {
        let v = noise.at(t);
        assert!((0.0..=1.0).contains(&v), "value {v} out of range at {t}");
    }

    #[test]
    fn test_md5_noise_determinism_and_range() {
        let noise = Md5Noise::new(b"seed1".to_vec());
        for t in [ts(0, 0), ts(0, 1), ts(1_678_886_400, 0), ts(-1, 999_999_999)] {
            check_determinism(&noise, t);
            check_range(&noise, t);
        }
    }

    #[test]
    fn test_md5_noise_uniqueness_across_ticks() {
        // One-nanosecond steps must hash to different values; a collision
        // would mean the timestamp encoding dropped resolution.
        let noise = Md5Noise::new(b"tick".to_vec());
        let t = ts(1_000_000_000, 0);
        assert_ne!(noise.at(t), noise.at(t + TimeDelta::nanoseconds(1)));
        assert_ne!(noise.at(t), noise.at(t + TimeDelta::seconds(1)));
    }

    #[test]
    fn test_md5_noise_seed_separation() {
        let t = ts(1_678_886_400, 0);
        let a = Md5Noise::new(b"happysplotch".to_vec());
        let b = Md5Noise::new(b"sleepysplotch".to_vec());
        assert_ne!(a.at(t), b.at(t));
    }

    #[test]
    fn test_md5_noise_empty_seed_is_valid() {
        let noise = Md5Noise::new(Vec::new());
        check_determinism(&noise, ts(42, 0));
        check_range(&noise, ts(42, 0));
    }

    #[test]
    fn test_md5_noise_out_of_range_saturates() {
        // Beyond the i64-nanosecond window all timestamps alias the bound.
        let noise = Md5Noise::new(b"edge".to_vec());
        let far = Utc.with_ymd_and_hms(2400, 1, 1, 0, 0, 0).unwrap();
        let farther = Utc.with_ymd_and_hms(2500, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(noise.at(far), noise.at(farther));
        check_range(&noise, far);
    }

    #[test]
    fn test_smooth_noise_rejects_non_positive_period() {
        assert!(SmoothNoise::new(Md5Noise::new(b"p".to_vec()), TimeDelta::zero()).is_err());
        assert!(SmoothNoise::new(Md5Noise::new(b"p".to_vec()), TimeDelta::seconds(-1)).is_err());
        assert!(SmoothNoise::new(Md5Noise::new(b"p".to_vec()), TimeDelta::seconds(1)).is_ok());
    }

    #[test]
    fn test_smooth_noise_determinism_and_range() {
        let noise =
            SmoothNoise::new(Md5Noise::new(b"s_seed1".to_vec()), TimeDelta::seconds(1)).unwrap();
        for t in [ts(0, 0), ts(0, 500_000_000), ts(1_678_886_400, 123), ts(-5, 1)] {
            check_determinism(&noise, t);
            check_range(&noise, t);
        }
    }

    #[test]
    fn test_smooth_noise_matches_underlying_at_grid_points() {
        // At a grid-aligned instant the interpolation fraction is exactly
        // zero, so the smooth value equals the raw sample bit-for-bit.
        let raw = Md5Noise::new(b"grid".to_vec());
        let smooth = SmoothNoise::new(raw.clone(), TimeDelta::seconds(1)).unwrap();
        for secs in [0i64, 1, 59, 1_234_567_890] {
            let t0 = ts(secs, 0);
            assert_eq!(smooth.at(t0), raw.at(t0), "mismatch at grid point {t0}");
        }
    }

    #[test]
    fn test_smooth_noise_uniqueness_beyond_millisecond() {
        let noise =
            SmoothNoise::new(Md5Noise::new(b"uniq".to_vec()), TimeDelta::seconds(1)).unwrap();
        let t1 = ts(100, 200_000_000);
        let t2 = ts(100, 700_000_000);
        assert_ne!(noise.at(t1), noise.at(t2));
    }

    #[test]
    fn test_md5_noise_consecutive_difference_is_rough() {
        let noise = Md5Noise::new(b"md5_consecutive_diff_seed".to_vec());
        let start = ts(1_234_567_890, 0);
        let samples = 1000;

        let mut total = 0.0;
        let mut prev = noise.at(start);
        for i in 0..samples {
            let current = noise.at(start + TimeDelta::nanoseconds(i + 1));
            total += (current - prev).abs();
            prev = current;
        }

        let avg = total / samples as f64;
        assert!(avg > 0.3, "raw noise too smooth: avg delta {avg}");
    }

    #[test]
    fn test_smooth_noise_consecutive_difference_is_small() {
        let noise = SmoothNoise::new(
            Md5Noise::new(b"smooth_consecutive_diff_seed".to_vec()),
            TimeDelta::seconds(1),
        )
        .unwrap();
        let start = ts(987_654_321, 0);
        let samples = 1000;

        let mut total = 0.0;
        let mut prev = noise.at(start);
        for i in 0..samples {
            let current = noise.at(start + TimeDelta::nanoseconds(i + 1));
            total += (current - prev).abs();
            prev = current;
        }

        let avg = total / samples as f64;
        assert!(avg < 0.1, "smooth noise too rough: avg delta {avg}");
    }

    #[test]
    fn test_smooth_noise_continuous_across_period_boundary() {
        // Approaching a grid point from the left converges to the value at
        // the grid point itself: no jump between windows.
        let noise =
            SmoothNoise::new(Md5Noise::new(b"boundary".to_vec()), TimeDelta::seconds(1)).unwrap();
        let boundary = ts(500, 0);
        let just_before = noise.at(boundary - TimeDelta::nanoseconds(1));
        let at_boundary = noise.at(boundary);
        assert!((just_before - at_boundary).abs() < 1e-6);
    }
}
