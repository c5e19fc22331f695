//! Configuration module.
//!
//! [`HedgeConfig`] gathers the configuration surface of the hedger: underlying
//! symbol, tolerance band, new-position cap and the initial restriction rules.
//! It is loaded from JSON.
//!
//! ```json
//! {
//!   "underlying": "SPY",
//!   "delta_threshold": 0.02,
//!   "new_position_cap": 100,
//!   "restrictions": [
//!     { "strike": 100.0, "expiration": "20240119", "right": "Put" },
//!     { "strike": 105.0 }
//!   ]
//! }
//! ```

use crate::error::{Error, Result};
use crate::hedging::{DEFAULT_DELTA_THRESHOLD, DEFAULT_NEW_POSITION_CAP, HedgeParams};
use crate::restriction::{RestrictionRegistry, RestrictionRule};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

fn default_delta_threshold() -> Decimal {
    DEFAULT_DELTA_THRESHOLD
}

fn default_new_position_cap() -> u64 {
    DEFAULT_NEW_POSITION_CAP
}

/// Hedger configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HedgeConfig {
    /// The underlying asset symbol.
    pub underlying: String,
    /// Tolerance band around zero portfolio delta.
    #[serde(default = "default_delta_threshold")]
    pub delta_threshold: Decimal,
    /// Maximum quantity of any single new position.
    #[serde(default = "default_new_position_cap")]
    pub new_position_cap: u64,
    /// Restrictions in force at startup.
    #[serde(default)]
    pub restrictions: Vec<RestrictionRule>,
}

impl HedgeConfig {
    /// Creates a configuration with default threshold and cap and no
    /// restrictions.
    #[must_use]
    pub fn new(underlying: impl Into<String>) -> Self {
        Self {
            underlying: underlying.into(),
            delta_threshold: DEFAULT_DELTA_THRESHOLD,
            new_position_cap: DEFAULT_NEW_POSITION_CAP,
            restrictions: Vec::new(),
        }
    }

    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Json` on malformed input (including invalid expiration
    /// codes and negative caps) and `Error::Config` or
    /// `Error::InvalidRestriction` on failed validation.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns `Error::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` for an empty underlying or a non-positive
    /// threshold, and `Error::InvalidRestriction` for an invalid rule.
    pub fn validate(&self) -> Result<()> {
        if self.underlying.trim().is_empty() {
            return Err(Error::config("underlying must not be empty"));
        }
        if self.delta_threshold <= Decimal::ZERO {
            return Err(Error::config(format!(
                "delta_threshold must be positive, got {}",
                self.delta_threshold
            )));
        }
        self.restrictions.iter().try_for_each(RestrictionRule::validate)
    }

    /// Returns the optimizer parameters.
    #[must_use]
    pub const fn hedge_params(&self) -> HedgeParams {
        HedgeParams {
            delta_threshold: self.delta_threshold,
            new_position_cap: self.new_position_cap,
        }
    }

    /// Builds a registry holding the configured restrictions.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidRestriction` for an invalid rule.
    pub fn build_registry(&self) -> Result<RestrictionRegistry> {
        RestrictionRegistry::with_rules(self.restrictions.iter().cloned())
    }
}
