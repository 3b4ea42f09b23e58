//! Error types for the validated EMA constructors

use thiserror::Error;

/// Type alias for Results using `EmaError`
pub type EmaResult<T> = Result<T, EmaError>;

/// Error type for building an EMA cell
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EmaError {
    /// The smoothing factor is outside of `(0, 1]`
    #[error("alpha must be in (0, 1], got {0}")]
    InvalidAlpha(f64),

    /// The window length is zero
    #[error("window length must be >= 1, got {0}")]
    InvalidWindowLength(u32),

    /// The config does not describe exactly one smoothing factor
    #[error("invalid EMA config: {0}")]
    Config(String),
}

impl EmaError {
    /// Create a new config error
    #[allow(clippy::needless_pass_by_value)]
    pub fn config<T: ToString>(msg: T) -> Self {
        Self::Config(msg.to_string())
    }
}
