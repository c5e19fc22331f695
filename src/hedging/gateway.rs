//! Collaborator interfaces module.
//!
//! The hedging cycle never talks to a broker session directly. Positions,
//! greeks, the listed universe and order execution come from implementations of
//! [`MarketDataSource`] and [`OrderExecutor`] injected into
//! [`DeltaHedger`](super::DeltaHedger).

use super::plan::Adjustment;
use crate::error::Result;
use crate::portfolio::{ChainUniverse, Contract, OptionContract, UnitGreeks};
use async_trait::async_trait;
use orderbook_rs::{OrderId, Side};
use std::fmt;

/// A position as reported by the broker, before restriction checks.
#[derive(Debug, Clone, PartialEq)]
pub struct HeldPosition {
    /// The instrument held.
    pub contract: Contract,
    /// Signed quantity, positive for long.
    pub quantity: i64,
    /// Per-unit greeks, if the broker currently has them.
    pub greeks: Option<UnitGreeks>,
}

impl HeldPosition {
    /// Creates a new held position.
    #[must_use]
    pub const fn new(contract: Contract, quantity: i64, greeks: Option<UnitGreeks>) -> Self {
        Self {
            contract,
            quantity,
            greeks,
        }
    }
}

/// Market order generated from an [`Adjustment`].
#[derive(Debug, Clone)]
pub struct HedgeOrder {
    /// Client order identifier.
    pub id: OrderId,
    /// Contract to trade.
    pub contract: Contract,
    /// Buy or sell.
    pub side: Side,
    /// Unsigned order size.
    pub quantity: u64,
}

impl From<&Adjustment> for HedgeOrder {
    fn from(adjustment: &Adjustment) -> Self {
        Self {
            id: OrderId::new(),
            contract: adjustment.contract.clone(),
            side: adjustment.side(),
            quantity: adjustment.size(),
        }
    }
}

impl fmt::Display for HedgeOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self.side {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        };
        write!(f, "{} {} {}", action, self.quantity, self.contract)
    }
}

/// Completion report for a [`HedgeOrder`].
#[derive(Debug, Clone)]
pub struct ExecutionReport {
    /// The order that completed.
    pub order_id: OrderId,
    /// Contract traded.
    pub contract: Contract,
    /// Buy or sell.
    pub side: Side,
    /// Filled quantity.
    pub filled: u64,
}

impl ExecutionReport {
    /// Report for an order filled in full.
    #[must_use]
    pub fn filled(order: &HedgeOrder) -> Self {
        Self {
            order_id: order.id,
            contract: order.contract.clone(),
            side: order.side,
            filled: order.quantity,
        }
    }
}

/// Source of live positions, greeks and the listed universe.
///
/// Every call is expected to reflect the broker state at call time; the hedger
/// takes one snapshot per cycle.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Returns all held positions.
    async fn positions(&self) -> Result<Vec<HeldPosition>>;

    /// Returns the listed strikes and expirations for `underlying`.
    async fn chain_universe(&self, underlying: &str) -> Result<ChainUniverse>;

    /// Returns per-unit greeks for an option, or `None` if not available.
    async fn option_greeks(&self, contract: &OptionContract) -> Result<Option<UnitGreeks>>;
}

/// Places hedge orders and waits for their completion.
#[async_trait]
pub trait OrderExecutor: Send + Sync {
    /// Executes a single order.
    async fn execute(&self, order: &HedgeOrder) -> Result<ExecutionReport>;
}
