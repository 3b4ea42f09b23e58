//! A serializable description of an EMA cell

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    ema::Ema,
    error::{EmaError, EmaResult},
};

/// The configuration options for an EMA cell
///
/// Exactly one of `alpha` and `window_length` must be set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmaConfig {
    /// The initial value of the EMA
    #[serde(default)]
    pub initial: f64,
    /// The default smoothing factor, in `(0, 1]`
    #[serde(default)]
    pub alpha: Option<f64>,
    /// The window length from which to derive the smoothing factor
    #[serde(default)]
    pub window_length: Option<u32>,
}

impl EmaConfig {
    /// A config with an explicit smoothing factor
    pub fn with_alpha(alpha: f64, initial: f64) -> Self {
        Self { initial, alpha: Some(alpha), window_length: None }
    }

    /// A config with a smoothing factor derived from a window length
    pub fn with_window_length(window_length: u32, initial: f64) -> Self {
        Self { initial, alpha: None, window_length: Some(window_length) }
    }

    /// Validate the config and build an EMA from it
    pub fn build(&self) -> EmaResult<Ema> {
        let ema = match (self.alpha, self.window_length) {
            (Some(alpha), None) => Ema::try_new(self.initial, alpha)?,
            (None, Some(window_length)) => Ema::from_window_length(window_length, self.initial)?,
            (Some(_), Some(_)) => {
                return Err(EmaError::config("only one of `alpha` and `window_length` may be set"));
            },
            (None, None) => {
                return Err(EmaError::config("one of `alpha` and `window_length` must be set"));
            },
        };

        debug!(alpha = ema.alpha(), initial = self.initial, "built EMA from config");
        Ok(ema)
    }
}

impl TryFrom<&EmaConfig> for Ema {
    type Error = EmaError;

    fn try_from(config: &EmaConfig) -> Result<Self, Self::Error> {
        config.build()
    }
}
