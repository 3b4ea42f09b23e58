//! An implementation of a thread-safe exponential moving average.
//!
//! The average is held as a fixed-point integer (3 digits behind the decimal
//! point) in a single `AtomicI64`, so every read and write of the value is one
//! indivisible load or store.
//!
//! `update` is a relaxed read-modify-write: the load of the previous value, the
//! arithmetic and the store of the new value are three separate steps. Two
//! racing updates may read the same previous value, in which case the later
//! store wins and the other contribution is dropped. Callers that need every
//! contribution applied use `update_strict`, which retries with a
//! compare-and-swap.

use std::{
    fmt,
    sync::atomic::{AtomicI64, Ordering},
    time::Duration,
};

use tracing::{trace, warn};

use crate::{
    error::{EmaError, EmaResult},
    fixed_point::{duration_to_f64, f64_to_duration, from_fixed, to_fixed},
};

/// The result of an update which reports the value it replaced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmaUpdate {
    /// The EMA value read before the update
    pub prev: f64,
    /// The EMA value computed by the update, before fixed-point truncation
    pub next: f64,
}

/// The EMA
pub struct Ema {
    /// The smoothing factor used by `update` and its variants
    default_alpha: f64,
    /// The current EMA estimate, scaled by `fixed_point::SCALE`
    value: AtomicI64,
}

impl Ema {
    /// Construct an EMA with an initial value and a default smoothing factor α.
    ///
    /// α is not validated. An α outside of `(0, 1]` is accepted and produces a
    /// well defined but possibly divergent average; use `try_new` to reject it.
    pub fn new(initial: f64, default_alpha: f64) -> Self {
        if !is_valid_alpha(default_alpha) {
            warn!(alpha = default_alpha, "EMA created with smoothing factor outside of (0, 1]");
        }

        Self { default_alpha, value: AtomicI64::new(to_fixed(initial)) }
    }

    /// Construct an EMA whose initial value is the nanosecond count of a
    /// duration
    pub fn from_duration(initial: Duration, default_alpha: f64) -> Self {
        Self::new(duration_to_f64(initial), default_alpha)
    }

    /// Construct an EMA, rejecting a smoothing factor outside of `(0, 1]`
    pub fn try_new(initial: f64, default_alpha: f64) -> EmaResult<Self> {
        if !is_valid_alpha(default_alpha) {
            return Err(EmaError::InvalidAlpha(default_alpha));
        }

        Ok(Self::new(initial, default_alpha))
    }

    /// Construct an EMA from a canonical window length `N`,
    /// using α = 2 / (N + 1), and an initial value.
    ///
    /// This makes the EMA roughly comparable to an N-period SMA,
    /// but smoother and more responsive.
    pub fn from_window_length(window_length: u32, initial: f64) -> EmaResult<Self> {
        if window_length == 0 {
            return Err(EmaError::InvalidWindowLength(window_length));
        }

        let alpha = 2.0 / (f64::from(window_length) + 1.0);
        Self::try_new(initial, alpha)
    }

    /// The default smoothing factor of the EMA
    pub fn alpha(&self) -> f64 {
        self.default_alpha
    }

    // -----------
    // | Updates |
    // -----------

    /// Update the EMA with a new observation and an explicit α, returning the
    /// new EMA value.
    /// Applies EMA_t = (1−α)·EMA_{t−1} + α·x.
    ///
    /// The returned value is not truncated; the stored value is.
    #[inline]
    pub fn update_with_alpha(&self, sample: f64, alpha: f64) -> f64 {
        self.update_with_prev_alpha(sample, alpha).next
    }

    /// Update the EMA with a new observation using the default α, returning the
    /// new EMA value
    #[inline]
    pub fn update(&self, sample: f64) -> f64 {
        self.update_with_alpha(sample, self.default_alpha)
    }

    /// Like `update`, but reports the value read before the update as well
    #[inline]
    pub fn update_with_prev(&self, sample: f64) -> EmaUpdate {
        self.update_with_prev_alpha(sample, self.default_alpha)
    }

    /// Like `update_with_alpha`, but reports the value read before the update
    /// as well
    #[inline]
    pub fn update_with_prev_alpha(&self, sample: f64, alpha: f64) -> EmaUpdate {
        let prev = from_fixed(self.value.load(Ordering::Relaxed));
        let next = blend(prev, sample, alpha);
        self.value.store(to_fixed(next), Ordering::Relaxed);

        EmaUpdate { prev, next }
    }

    /// Update the EMA with a new observation using the default α, applying the
    /// update as a single atomic read-modify-write
    pub fn update_strict(&self, sample: f64) -> f64 {
        self.update_strict_with_alpha(sample, self.default_alpha)
    }

    /// Update the EMA with a new observation and an explicit α, applying the
    /// update as a single atomic read-modify-write.
    ///
    /// Retries until the value it blended against is still the stored value,
    /// so no contribution is lost under contention. Returns the untruncated
    /// average computed from that value.
    pub fn update_strict_with_alpha(&self, sample: f64, alpha: f64) -> f64 {
        let mut raw = self.value.load(Ordering::Relaxed);
        loop {
            let next = blend(from_fixed(raw), sample, alpha);
            match self.value.compare_exchange_weak(
                raw,
                to_fixed(next),
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return next,
                Err(current) => raw = current,
            }
        }
    }

    /// Update the EMA with a duration observation, returning the new EMA value
    /// truncated to whole nanoseconds
    pub fn update_duration(&self, sample: Duration) -> Duration {
        f64_to_duration(self.update(duration_to_f64(sample)))
    }

    // ------------------
    // | Set and Access |
    // ------------------

    /// Overwrite the EMA value, bypassing the smoothing formula
    pub fn set(&self, value: f64) {
        trace!(value, "EMA value set");
        self.value.store(to_fixed(value), Ordering::Relaxed);
    }

    /// Overwrite the EMA value with the nanosecond count of a duration
    pub fn set_duration(&self, value: Duration) {
        self.set(duration_to_f64(value))
    }

    /// Returns the current EMA estimate
    #[inline]
    pub fn get(&self) -> f64 {
        from_fixed(self.value.load(Ordering::Relaxed))
    }

    /// Returns the current EMA estimate as a duration, truncated to whole
    /// nanoseconds
    pub fn get_duration(&self) -> Duration {
        f64_to_duration(self.get())
    }
}

impl fmt::Debug for Ema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ema")
            .field("alpha", &self.default_alpha)
            .field("value", &self.get())
            .finish()
    }
}

// -----------
// | Helpers |
// -----------

/// Whether the given smoothing factor is in `(0, 1]`
pub(crate) fn is_valid_alpha(alpha: f64) -> bool {
    alpha > 0.0 && alpha <= 1.0
}

/// The EMA recurrence
#[inline]
fn blend(prev: f64, sample: f64, alpha: f64) -> f64 {
    (1.0 - alpha) * prev + alpha * sample
}
