//! Hedge parameter module.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Default tolerance band around zero portfolio delta.
pub const DEFAULT_DELTA_THRESHOLD: Decimal = dec!(0.02);

/// Default maximum size of a single new option position.
pub const DEFAULT_NEW_POSITION_CAP: u64 = 100;

/// Parameters of a planning call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HedgeParams {
    /// Planning stops once `|residual delta|` is at or below this value.
    pub delta_threshold: Decimal,
    /// Maximum quantity of any single new position.
    pub new_position_cap: u64,
}

impl HedgeParams {
    /// Creates parameters with the default new-position cap.
    #[must_use]
    pub const fn with_threshold(delta_threshold: Decimal) -> Self {
        Self {
            delta_threshold,
            new_position_cap: DEFAULT_NEW_POSITION_CAP,
        }
    }

    /// Returns true if `delta` lies outside the tolerance band.
    #[must_use]
    pub fn exceeds_threshold(&self, delta: Decimal) -> bool {
        delta.abs() > self.delta_threshold
    }
}

impl Default for HedgeParams {
    fn default() -> Self {
        Self::with_threshold(DEFAULT_DELTA_THRESHOLD)
    }
}
