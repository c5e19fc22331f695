//! Portfolio snapshot module.
//!
//! Point-in-time views of held positions and prospective chain entries. Both are
//! rebuilt from live data on every hedging cycle and never cached.

use super::contract::{Contract, OptionContract};
use crate::restriction::RestrictionRegistry;
use optionstratlib::greeks::Greek;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-contract delta and gamma as quoted by the market data source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitGreeks {
    /// Delta of one contract.
    pub delta: Decimal,
    /// Gamma of one contract.
    pub gamma: Decimal,
}

impl UnitGreeks {
    /// Creates a new set of per-unit greeks.
    #[must_use]
    pub const fn new(delta: Decimal, gamma: Decimal) -> Self {
        Self { delta, gamma }
    }

    /// Greeks of one share of the underlying.
    #[must_use]
    pub const fn underlying() -> Self {
        Self::new(Decimal::ONE, Decimal::ZERO)
    }
}

impl From<&Greek> for UnitGreeks {
    fn from(greek: &Greek) -> Self {
        Self::new(greek.delta, greek.gamma)
    }
}

/// A held position with position-level exposure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    /// The instrument held.
    pub contract: Contract,
    /// Signed quantity, positive for long.
    pub quantity: i64,
    /// Position delta (per-unit delta times quantity).
    pub delta: Decimal,
    /// Position gamma (per-unit gamma times quantity).
    pub gamma: Decimal,
    /// False if a restriction forbids trading this contract.
    pub tradable: bool,
}

impl PositionSnapshot {
    /// Creates a snapshot from position-level values.
    #[must_use]
    pub const fn new(
        contract: Contract,
        quantity: i64,
        delta: Decimal,
        gamma: Decimal,
        tradable: bool,
    ) -> Self {
        Self {
            contract,
            quantity,
            delta,
            gamma,
            tradable,
        }
    }

    /// Creates a snapshot from per-unit greeks, scaling them by quantity and
    /// asking the registry whether the contract is tradable.
    #[must_use]
    pub fn evaluate(
        contract: Contract,
        quantity: i64,
        greeks: UnitGreeks,
        registry: &RestrictionRegistry,
    ) -> Self {
        let size = Decimal::from(quantity);
        let tradable = registry.is_contract_allowed(&contract);
        Self::new(
            contract,
            quantity,
            greeks.delta * size,
            greeks.gamma * size,
            tradable,
        )
    }

    /// Returns true if this is a long position.
    #[must_use]
    pub const fn is_long(&self) -> bool {
        self.quantity > 0
    }
}

/// An allowed option contract that could be opened as a new position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainCandidate {
    /// The option contract.
    pub contract: OptionContract,
    /// Delta of one contract.
    pub delta: Decimal,
    /// Gamma of one contract.
    pub gamma: Decimal,
}

impl ChainCandidate {
    /// Creates a new chain candidate.
    #[must_use]
    pub const fn new(contract: OptionContract, delta: Decimal, gamma: Decimal) -> Self {
        Self {
            contract,
            delta,
            gamma,
        }
    }

    /// Creates a chain candidate from per-unit greeks.
    #[must_use]
    pub const fn with_greeks(contract: OptionContract, greeks: UnitGreeks) -> Self {
        Self::new(contract, greeks.delta, greeks.gamma)
    }

    /// Creates a chain candidate from an OptionStratLib `Greek`.
    #[must_use]
    pub fn from_greek(contract: OptionContract, greek: &Greek) -> Self {
        Self::with_greeks(contract, UnitGreeks::from(greek))
    }
}

/// Sums position-level delta across snapshots.
#[must_use]
pub fn aggregate_delta(positions: &[PositionSnapshot]) -> Decimal {
    positions.iter().map(|p| p.delta).sum()
}

/// Sums position-level gamma across snapshots.
#[must_use]
pub fn aggregate_gamma(positions: &[PositionSnapshot]) -> Decimal {
    positions.iter().map(|p| p.gamma).sum()
}
