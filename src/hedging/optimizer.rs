//! Adjustment optimizer module.
//!
//! Greedy selection of position adjustments that bring portfolio delta back
//! inside the tolerance band.
//!
//! ## Algorithm
//!
//! ```text
//! remaining = -current_delta
//! while |remaining| > threshold and candidates remain:
//!     for each candidate:
//!         q     = min(|trunc(remaining / delta_impact)|, max_quantity)   skip if 0
//!         score = 2·|remaining − q·delta_impact| + 3·|q·gamma_impact| + 0.1·q
//!     take the lowest score (first one on ties)
//!     remaining -= q·delta_impact
//!     reduce: max_quantity -= q, drop at 0      new: drop
//! ```
//!
//! The result is a heuristic, not a global optimum.

use super::candidate::{AdjustmentCandidate, CandidateAction};
use super::params::HedgeParams;
use super::plan::{Adjustment, HedgePlan, PlanOutcome};
use crate::error::Result;
use crate::portfolio::{ChainCandidate, PositionSnapshot};
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;
use uuid::Uuid;

/// Weight of the delta left uncorrected.
pub const DELTA_WEIGHT: Decimal = dec!(2);
/// Weight of the gamma introduced.
pub const GAMMA_WEIGHT: Decimal = dec!(3);
/// Weight of the number of contracts traded.
pub const SIZE_WEIGHT: Decimal = dec!(0.1);

/// The best candidate of one iteration.
#[derive(Debug, Clone, Copy)]
struct Selection {
    index: usize,
    quantity: u64,
    remaining_after: Decimal,
    score: Decimal,
}

/// Greedy delta-neutralizing optimizer.
///
/// Stateless apart from its parameters: every call to [`plan`](Self::plan)
/// works on its own copy of the candidates.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdjustmentOptimizer {
    params: HedgeParams,
}

impl AdjustmentOptimizer {
    /// Creates a new optimizer.
    #[must_use]
    pub const fn new(params: HedgeParams) -> Self {
        Self { params }
    }

    /// Returns the parameters.
    #[must_use]
    pub const fn params(&self) -> &HedgeParams {
        &self.params
    }

    /// Builds the initial working set: reduce candidates for tradable positions
    /// first, then one new candidate per chain entry, both in input order.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if a position snapshot is inconsistent.
    pub fn candidates(
        &self,
        positions: &[PositionSnapshot],
        chain: &[ChainCandidate],
    ) -> Result<Vec<AdjustmentCandidate>> {
        let mut candidates = Vec::with_capacity(positions.len() + chain.len());
        for position in positions.iter().filter(|p| p.tradable) {
            if let Some(candidate) = AdjustmentCandidate::reduce(position)? {
                candidates.push(candidate);
            }
        }
        candidates.extend(
            chain
                .iter()
                .map(|entry| AdjustmentCandidate::new_position(entry, self.params.new_position_cap)),
        );
        Ok(candidates)
    }

    /// Plans the adjustments that move `current_delta` toward zero.
    ///
    /// Non-tradable positions are ignored. Chain entries are expected to be
    /// filtered through the restriction registry already.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if a position snapshot is inconsistent
    /// (flat but exposed). Finding no adjustment is not an error.
    pub fn plan(
        &self,
        current_delta: Decimal,
        positions: &[PositionSnapshot],
        chain: &[ChainCandidate],
    ) -> Result<HedgePlan> {
        let mut candidates = self.candidates(positions, chain)?;
        let mut remaining = -current_delta;
        let mut adjustments = Vec::new();

        while self.params.exceeds_threshold(remaining) && !candidates.is_empty() {
            let Some(selection) = select(&candidates, remaining) else {
                debug!(%remaining, candidates = candidates.len(), "no usable candidate left");
                break;
            };

            let candidate = &mut candidates[selection.index];
            let adjustment = Adjustment::new(
                candidate.contract.clone(),
                candidate.signed_quantity(selection.quantity),
            );
            debug!(
                %adjustment,
                score = %selection.score,
                remaining_before = %remaining,
                remaining_after = %selection.remaining_after,
                "selected adjustment"
            );
            adjustments.push(adjustment);
            remaining = selection.remaining_after;

            let action = candidate.action;
            match action {
                CandidateAction::Reduce { .. } => {
                    candidate.max_quantity -= selection.quantity;
                    if candidate.max_quantity == 0 {
                        candidates.remove(selection.index);
                    }
                }
                CandidateAction::New => {
                    candidates.remove(selection.index);
                }
            }
        }

        let outcome = match (adjustments.is_empty(), self.params.exceeds_threshold(remaining)) {
            (true, false) => PlanOutcome::AlreadyWithinThreshold,
            (true, true) => PlanOutcome::NoViableAdjustment,
            (false, false) => PlanOutcome::Neutralized,
            (false, true) => PlanOutcome::Partial,
        };

        Ok(HedgePlan {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            initial_delta: current_delta,
            residual_delta: if remaining.is_zero() {
                Decimal::ZERO
            } else {
                -remaining
            },
            iterations: adjustments.len(),
            adjustments,
            outcome,
        })
    }
}

/// Plans adjustments with the given parameters.
///
/// # Errors
///
/// See [`AdjustmentOptimizer::plan`].
///
/// # Examples
///
/// ```rust
/// use option_delta_hedger::hedging::{HedgeParams, plan_adjustments};
/// use option_delta_hedger::portfolio::{Contract, PositionSnapshot};
/// use rust_decimal_macros::dec;
///
/// let stock = PositionSnapshot::new(Contract::stock("SPY"), 10, dec!(10), dec!(0), true);
/// let plan = plan_adjustments(dec!(3.5), &[stock], &[], HedgeParams::default()).unwrap();
///
/// assert_eq!(plan.adjustments[0].quantity, -3);
/// assert_eq!(plan.residual_delta, dec!(0.5));
/// ```
pub fn plan_adjustments(
    current_delta: Decimal,
    positions: &[PositionSnapshot],
    chain: &[ChainCandidate],
    params: HedgeParams,
) -> Result<HedgePlan> {
    AdjustmentOptimizer::new(params).plan(current_delta, positions, chain)
}

/// Returns the lowest scoring usable candidate; the first one wins ties.
fn select(candidates: &[AdjustmentCandidate], remaining: Decimal) -> Option<Selection> {
    let mut best: Option<Selection> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        let quantity = candidate.usable_quantity(remaining);
        if quantity == 0 {
            continue;
        }
        let Some((remaining_after, score)) = evaluate(candidate, remaining, quantity) else {
            continue;
        };
        if best.is_none_or(|b| score < b.score) {
            best = Some(Selection {
                index,
                quantity,
                remaining_after,
                score,
            });
        }
    }
    best
}

/// Returns the remaining delta after trading `quantity` units and the
/// composite score, or `None` on overflow.
fn evaluate(
    candidate: &AdjustmentCandidate,
    remaining: Decimal,
    quantity: u64,
) -> Option<(Decimal, Decimal)> {
    let quantity = Decimal::from(quantity);
    let remaining_after = remaining.checked_sub(quantity.checked_mul(candidate.delta_impact)?)?;
    let gamma = quantity.checked_mul(candidate.gamma_impact)?.abs();
    let score = DELTA_WEIGHT
        .checked_mul(remaining_after.abs())?
        .checked_add(GAMMA_WEIGHT.checked_mul(gamma)?)?
        .checked_add(SIZE_WEIGHT.checked_mul(quantity)?)?;
    Some((remaining_after, score))
}
