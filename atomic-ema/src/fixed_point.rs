//! Fixed-point conversions for the EMA cell
//!
//! Values are stored as `trunc(value * SCALE)` so they fit in a single atomic
//! word. All conversions use `as` casts: truncation toward zero, saturation at
//! the integer bounds, and NaN mapped to zero.

use std::time::Duration;

/// Floating point values are stored to this scale (3 digits behind the decimal
/// point)
pub const SCALE: f64 = 1000.0;

/// Scale a real value into its stored fixed-point form
#[inline]
pub fn to_fixed(value: f64) -> i64 {
    (value * SCALE) as i64
}

/// Unscale a stored fixed-point value back into a real value
#[inline]
pub fn from_fixed(raw: i64) -> f64 {
    raw as f64 / SCALE
}

/// The nanosecond tick count of a duration as a real value
#[inline]
pub fn duration_to_f64(duration: Duration) -> f64 {
    duration.as_nanos() as f64
}

/// Reinterpret a real value as a whole number of nanoseconds
///
/// Fractional nanoseconds are truncated, negative values become zero
#[inline]
pub fn f64_to_duration(nanos: f64) -> Duration {
    Duration::from_nanos(nanos as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests that scaling truncates toward zero instead of rounding
    #[test]
    fn test_to_fixed_truncates() {
        assert_eq!(to_fixed(1.1235235), 1123);
        assert_eq!(to_fixed(1.9999), 1999);
        assert_eq!(to_fixed(-1.9999), -1999);
        assert_eq!(to_fixed(0.0004), 0);
    }

    /// Tests the saturating behavior of out-of-range and NaN inputs
    #[test]
    fn test_to_fixed_extremes() {
        assert_eq!(to_fixed(f64::NAN), 0);
        assert_eq!(to_fixed(f64::INFINITY), i64::MAX);
        assert_eq!(to_fixed(f64::NEG_INFINITY), i64::MIN);
        assert_eq!(to_fixed(1e300), i64::MAX);
    }

    /// Tests that unscaling recovers values at millesimal granularity
    #[test]
    fn test_from_fixed() {
        assert_eq!(from_fixed(1123), 1.123);
        assert_eq!(from_fixed(-500), -0.5);
        assert_eq!(from_fixed(0), 0.0);
    }

    /// Tests the duration conversions, including the clamp of negative values
    #[test]
    fn test_duration_conversions() {
        let duration = Duration::from_millis(250);
        assert_eq!(duration_to_f64(duration), 250_000_000.0);
        assert_eq!(f64_to_duration(250_000_000.0), duration);

        assert_eq!(f64_to_duration(18.9), Duration::from_nanos(18));
        assert_eq!(f64_to_duration(-5.0), Duration::ZERO);
        assert_eq!(f64_to_duration(f64::NAN), Duration::ZERO);
    }
}
