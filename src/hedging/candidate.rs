//! Adjustment candidate module.
//!
//! Working set entries of the optimizer. Each candidate is an owned copy of the
//! descriptor it was built from, so consuming quantity never touches the
//! caller's snapshot.

use crate::error::{Error, Result};
use crate::portfolio::{ChainCandidate, Contract, PositionSnapshot};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

/// Largest quantity a single adjustment can carry as a signed `i64`.
pub const MAX_ORDER_QUANTITY: u64 = i64::MAX as u64;

/// What kind of trade a candidate represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateAction {
    /// Trade an existing position toward flat.
    Reduce {
        /// Sign of the signed adjustment quantity: -1 closes a long, +1
        /// closes a short.
        direction: i64,
    },
    /// Open a new option position.
    New,
}

/// A single possible adjustment.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustmentCandidate {
    /// Contract traded by this candidate.
    pub contract: Contract,
    /// Reduce or new.
    pub action: CandidateAction,
    /// Remaining tradable quantity (magnitude).
    pub max_quantity: u64,
    /// Change of portfolio delta per unit traded.
    pub delta_impact: Decimal,
    /// Change of portfolio gamma per unit traded.
    pub gamma_impact: Decimal,
}

impl AdjustmentCandidate {
    /// Builds a reduce candidate from a held position.
    ///
    /// Returns `Ok(None)` for a flat position without exposure.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` naming `quantity` when a flat position
    /// still reports delta or gamma.
    pub fn reduce(position: &PositionSnapshot) -> Result<Option<Self>> {
        if position.quantity == 0 {
            if position.delta.is_zero() && position.gamma.is_zero() {
                debug!(contract = %position.contract, "skipping flat position");
                return Ok(None);
            }
            return Err(Error::invalid_input(
                "quantity",
                format!(
                    "{} is flat but reports delta {} and gamma {}",
                    position.contract, position.delta, position.gamma
                ),
            ));
        }

        let size = Decimal::from(position.quantity.unsigned_abs());
        Ok(Some(Self {
            contract: position.contract.clone(),
            action: CandidateAction::Reduce {
                direction: -position.quantity.signum(),
            },
            max_quantity: position.quantity.unsigned_abs(),
            delta_impact: -(position.delta / size),
            gamma_impact: -(position.gamma / size),
        }))
    }

    /// Builds a new-position candidate from a chain entry.
    #[must_use]
    pub fn new_position(chain: &ChainCandidate, max_quantity: u64) -> Self {
        Self {
            contract: Contract::Option(chain.contract.clone()),
            action: CandidateAction::New,
            max_quantity,
            delta_impact: chain.delta,
            gamma_impact: chain.gamma,
        }
    }

    /// Returns true for reduce candidates.
    #[must_use]
    pub const fn is_reduce(&self) -> bool {
        matches!(self.action, CandidateAction::Reduce { .. })
    }

    /// Number of units that would move `remaining` toward zero without
    /// overshooting, capped by `max_quantity` and [`MAX_ORDER_QUANTITY`].
    ///
    /// Returns zero when the candidate cannot help: no delta impact, impact in
    /// the wrong direction, less than one unit needed, or arithmetic overflow.
    #[must_use]
    pub fn usable_quantity(&self, remaining: Decimal) -> u64 {
        if self.max_quantity == 0 || self.delta_impact.is_zero() {
            return 0;
        }
        let Some(units) = remaining.checked_div(self.delta_impact) else {
            return 0;
        };
        if units.is_sign_negative() {
            return 0;
        }
        let limit = self.max_quantity.min(MAX_ORDER_QUANTITY);
        let units = units.trunc();
        if units >= Decimal::from(limit) {
            limit
        } else {
            units.to_u64().unwrap_or(0)
        }
    }

    /// Signed quantity recorded in the plan for `quantity` units.
    #[must_use]
    pub fn signed_quantity(&self, quantity: u64) -> i64 {
        let quantity = i64::try_from(quantity.min(MAX_ORDER_QUANTITY)).unwrap_or(i64::MAX);
        match self.action {
            CandidateAction::Reduce { direction } => direction * quantity,
            CandidateAction::New => quantity,
        }
    }
}
