//! Exchange-wide configuration.

use std::env;
use std::time::Duration;

use crate::ValidationError;

/// Environment variable overriding [`ExchangeConfig::price_window`], in seconds.
pub const PRICE_WINDOW_ENV: &str = "GBCE_PRICE_WINDOW_SECS";

/// Length of the trailing window used for the stock price when nothing else
/// is configured.
pub const DEFAULT_PRICE_WINDOW: Duration = Duration::from_secs(15 * 60);

/// Settings applied to every stock registered in an [`Exchange`](crate::Exchange).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeConfig {
    /// Trailing window over which the volume-weighted stock price is computed.
    pub price_window: Duration,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            price_window: DEFAULT_PRICE_WINDOW,
        }
    }
}

impl ExchangeConfig {
    /// Replace the price window.
    pub fn with_price_window(mut self, price_window: Duration) -> Self {
        self.price_window = price_window;
        self
    }

    /// Read the configuration from the process environment.
    ///
    /// Unset variables fall back to the defaults; set but malformed ones are
    /// rejected.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(PRICE_WINDOW_ENV) {
            let seconds = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ValidationError::InvalidEnvValue {
                    name: PRICE_WINDOW_ENV,
                    value: raw.clone(),
                })?;
            config.price_window = Duration::from_secs(seconds);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.price_window.is_zero() {
            return Err(ValidationError::InvalidPriceWindow);
        }
        Ok(())
    }
}
