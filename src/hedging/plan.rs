//! Hedge plan module.
//!
//! Output types of the optimizer: the ordered [`Adjustment`] list wrapped in a
//! [`HedgePlan`] that records why planning stopped.

use crate::portfolio::Contract;
use chrono::{DateTime, Utc};
use orderbook_rs::Side;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A single trade: positive quantity buys, negative sells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjustment {
    /// Contract to trade.
    pub contract: Contract,
    /// Signed quantity change.
    pub quantity: i64,
}

impl Adjustment {
    /// Creates a new adjustment.
    #[must_use]
    pub const fn new(contract: Contract, quantity: i64) -> Self {
        Self { contract, quantity }
    }

    /// Order side for this adjustment.
    #[must_use]
    pub const fn side(&self) -> Side {
        if self.quantity > 0 { Side::Buy } else { Side::Sell }
    }

    /// Unsigned order size.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.quantity.unsigned_abs()
    }
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = if self.quantity > 0 { "BUY" } else { "SELL" };
        write!(f, "{} {} {}", action, self.size(), self.contract)
    }
}

/// Why planning stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanOutcome {
    /// Portfolio delta was already inside the threshold; nothing to do.
    AlreadyWithinThreshold,
    /// Adjustments bring the residual delta inside the threshold.
    Neutralized,
    /// Adjustments reduce the imbalance but candidates ran out first.
    Partial,
    /// Delta is outside the threshold and no candidate can reduce it.
    NoViableAdjustment,
}

/// Result of one planning call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HedgePlan {
    /// Unique plan identifier.
    pub id: Uuid,
    /// When the plan was computed.
    pub created_at: DateTime<Utc>,
    /// Portfolio delta the plan started from.
    pub initial_delta: Decimal,
    /// Portfolio delta expected once every adjustment is filled.
    pub residual_delta: Decimal,
    /// Adjustments in greedy selection order.
    pub adjustments: Vec<Adjustment>,
    /// Number of optimizer iterations that selected a candidate.
    pub iterations: usize,
    /// Why planning stopped.
    pub outcome: PlanOutcome,
}

impl HedgePlan {
    /// Returns true if there is nothing to execute.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjustments.is_empty()
    }

    /// Returns the number of adjustments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.adjustments.len()
    }

    /// Total delta the plan removes from the portfolio.
    #[must_use]
    pub fn delta_change(&self) -> Decimal {
        self.residual_delta - self.initial_delta
    }
}

impl fmt::Display for HedgePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}: delta {} -> {} in {} adjustments",
            self.outcome,
            self.initial_delta,
            self.residual_delta,
            self.adjustments.len()
        )
    }
}
