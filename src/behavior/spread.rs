//! Mapping [0, 1] noise onto arbitrary numeric ranges.

use chrono::TimeDelta;

/// Numeric types that [`spread`] can target.
///
/// The contract is deliberately small: subtraction to measure the range,
/// a widening conversion to `f64`, and a narrowing conversion back that
/// truncates toward zero for integral types. Implemented for signed integers,
/// floats and [`TimeDelta`].
pub trait Spreadable: Copy {
    /// Difference `self - other` as an `f64`.
    fn range_to(self, other: Self) -> f64;
    /// Offsets `self` by `delta`, truncating toward zero for integral types.
    fn offset_by(self, delta: f64) -> Self;
}

macro_rules! spreadable_int {
    ($($t:ty),*) => {
        $(impl Spreadable for $t {
            fn range_to(self, other: Self) -> f64 {
                other as f64 - self as f64
            }
            fn offset_by(self, delta: f64) -> Self {
                // `as` casts from f64 truncate toward zero, which is the
                // contract: spread(0, 10, 0.57) is 5, not 6.
                self + delta as $t
            }
        })*
    };
}

spreadable_int!(i8, i16, i32, i64);

macro_rules! spreadable_float {
    ($($t:ty),*) => {
        $(impl Spreadable for $t {
            fn range_to(self, other: Self) -> f64 {
                (other - self) as f64
            }
            fn offset_by(self, delta: f64) -> Self {
                self + delta as $t
            }
        })*
    };
}

spreadable_float!(f32, f64);

impl Spreadable for TimeDelta {
    fn range_to(self, other: Self) -> f64 {
        let diff = other - self;
        // Total over the whole TimeDelta range; num_nanoseconds() would give
        // up past ~292 years.
        diff.num_seconds() as f64 * 1e9 + diff.subsec_nanos() as f64
    }

    fn offset_by(self, delta: f64) -> Self {
        self + TimeDelta::nanoseconds(delta as i64)
    }
}

/// Converts simple [0, 1] noise into a value in the range `[lo, hi]`.
///
/// Computed as `lo + T((hi − lo) × noise)`. The arguments are never
/// reordered: `lo == hi` always yields that value, and a reversed range
/// (`lo > hi`) is legal and interpolates downward with the same formula.
/// `noise` outside [0, 1] is not rejected; the formula still applies.
pub fn spread<T: Spreadable>(lo: T, hi: T, noise: f64) -> T {
    lo.offset_by(lo.range_to(hi) * noise)
}
