//! A lock-free exponential moving average
//!
//! An [`Ema`] tracks a smoothed running average of a stream of samples (or
//! durations) in a single atomic word, and may be updated from many threads
//! without external locking. Values are held to 3 digits behind the decimal
//! point.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]
#![deny(unsafe_code)]
#![deny(clippy::needless_pass_by_ref_mut)]
#![deny(clippy::needless_pass_by_value)]

pub mod config;
pub mod ema;
pub mod error;
pub mod fixed_point;

pub use config::EmaConfig;
pub use ema::{Ema, EmaUpdate};
pub use error::{EmaError, EmaResult};
