//! Delta hedger module.
//!
//! This module provides the [`DeltaHedger`], which runs one monitoring cycle:
//! snapshot the portfolio, measure delta, plan adjustments if the tolerance band
//! is breached and hand the resulting orders to the executor.

use super::gateway::{ExecutionReport, HedgeOrder, MarketDataSource, OrderExecutor};
use super::optimizer::AdjustmentOptimizer;
use super::params::HedgeParams;
use super::plan::{HedgePlan, PlanOutcome};
use crate::config::HedgeConfig;
use crate::error::Result;
use crate::portfolio::{
    ChainCandidate, Contract, OptionRight, PositionSnapshot, UnitGreeks, aggregate_delta,
};
use crate::restriction::RestrictionRegistry;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Outcome of one monitoring cycle.
#[derive(Debug, Clone)]
pub struct CycleReport {
    /// Portfolio delta measured at the start of the cycle.
    pub portfolio_delta: Decimal,
    /// Number of positions in the snapshot.
    pub position_count: usize,
    /// The plan, if delta was outside the tolerance band.
    pub plan: Option<HedgePlan>,
    /// Completed orders, in plan order.
    pub executions: Vec<ExecutionReport>,
}

impl CycleReport {
    /// Returns true if the cycle traded.
    #[must_use]
    pub fn traded(&self) -> bool {
        !self.executions.is_empty()
    }
}

/// Semi-automated delta hedger for a single underlying.
///
/// ## Architecture
///
/// ```text
/// DeltaHedger
///   ├── RestrictionRegistry (shared, may gain rules while running)
///   ├── AdjustmentOptimizer
///   ├── MarketDataSource (positions, greeks, listed universe)
///   └── OrderExecutor (order placement)
/// ```
pub struct DeltaHedger<S, E> {
    /// The underlying asset symbol.
    underlying: String,
    /// Greedy optimizer.
    optimizer: AdjustmentOptimizer,
    /// Restriction rules.
    registry: Arc<RestrictionRegistry>,
    /// Live data.
    source: S,
    /// Order placement.
    executor: E,
}

impl<S, E> DeltaHedger<S, E>
where
    S: MarketDataSource,
    E: OrderExecutor,
{
    /// Creates a new hedger.
    ///
    /// # Arguments
    ///
    /// * `underlying` - The underlying asset symbol (e.g., "SPY")
    /// * `params` - Threshold and new-position cap
    /// * `registry` - Restriction rules, possibly shared with other components
    /// * `source` - Market data collaborator
    /// * `executor` - Execution collaborator
    #[must_use]
    pub fn new(
        underlying: impl Into<String>,
        params: HedgeParams,
        registry: Arc<RestrictionRegistry>,
        source: S,
        executor: E,
    ) -> Self {
        Self {
            underlying: underlying.into(),
            optimizer: AdjustmentOptimizer::new(params),
            registry,
            source,
            executor,
        }
    }

    /// Creates a hedger from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` or `Error::InvalidRestriction` if the
    /// configuration is invalid.
    pub fn from_config(config: &HedgeConfig, source: S, executor: E) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            config.underlying.as_str(),
            config.hedge_params(),
            Arc::new(config.build_registry()?),
            source,
            executor,
        ))
    }

    /// Returns the underlying asset symbol.
    #[must_use]
    pub fn underlying(&self) -> &str {
        &self.underlying
    }

    /// Returns the hedge parameters.
    #[must_use]
    pub const fn params(&self) -> &HedgeParams {
        self.optimizer.params()
    }

    /// Returns the market data collaborator.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Returns the execution collaborator.
    #[must_use]
    pub const fn executor(&self) -> &E {
        &self.executor
    }

    /// Returns the restriction registry.
    #[must_use]
    pub fn registry(&self) -> &RestrictionRegistry {
        &self.registry
    }

    /// Adds a restriction that applies from the next cycle on.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidRestriction` if the arguments are invalid.
    pub fn add_restriction(
        &self,
        strike: Option<Decimal>,
        expiration: Option<&str>,
        right: Option<OptionRight>,
    ) -> Result<bool> {
        self.registry.add_restriction(strike, expiration, right)
    }

    /// Returns the portfolio delta of a snapshot.
    #[must_use]
    pub fn portfolio_delta(&self, positions: &[PositionSnapshot]) -> Decimal {
        aggregate_delta(positions)
    }

    /// Returns true if `delta` is outside the tolerance band.
    #[must_use]
    pub fn needs_hedge(&self, delta: Decimal) -> bool {
        self.params().exceeds_threshold(delta)
    }

    /// Snapshots positions on the configured underlying.
    ///
    /// Options without greeks are skipped. Stock without greeks counts one
    /// delta per share.
    ///
    /// # Errors
    ///
    /// Propagates market data failures.
    pub async fn current_positions(&self) -> Result<Vec<PositionSnapshot>> {
        let held = self.source.positions().await?;
        let mut snapshots = Vec::with_capacity(held.len());
        for position in held {
            if position.contract.symbol() != self.underlying {
                continue;
            }
            let greeks = match (&position.contract, position.greeks) {
                (_, Some(greeks)) => greeks,
                (Contract::Stock { .. }, None) => UnitGreeks::underlying(),
                (Contract::Option(_), None) => {
                    warn!(contract = %position.contract, "no greeks for position, skipping");
                    continue;
                }
            };
            snapshots.push(PositionSnapshot::evaluate(
                position.contract,
                position.quantity,
                greeks,
                &self.registry,
            ));
        }
        Ok(snapshots)
    }

    /// Returns every allowed listed option with its greeks.
    ///
    /// # Errors
    ///
    /// Propagates market data failures.
    pub async fn options_chain(&self) -> Result<Vec<ChainCandidate>> {
        let universe = self.source.chain_universe(&self.underlying).await?;
        let contracts = universe.allowed_contracts(&self.registry);
        let mut chain = Vec::with_capacity(contracts.len());
        for contract in contracts {
            match self.source.option_greeks(&contract).await? {
                Some(greeks) => chain.push(ChainCandidate::with_greeks(contract, greeks)),
                None => debug!(contract = %contract.local_symbol(), "no greeks, skipping"),
            }
        }
        Ok(chain)
    }

    /// Plans adjustments for a snapshot taken earlier in the same cycle.
    ///
    /// # Errors
    ///
    /// Propagates market data failures and `Error::InvalidInput`.
    pub async fn plan(
        &self,
        current_delta: Decimal,
        positions: &[PositionSnapshot],
    ) -> Result<HedgePlan> {
        let chain = self.options_chain().await?;
        self.optimizer.plan(current_delta, positions, &chain)
    }

    /// Executes the plan's adjustments in order.
    ///
    /// Stops at the first failed order; no retry.
    ///
    /// # Errors
    ///
    /// Returns the executor's error for the first failed order.
    pub async fn execute(&self, plan: &HedgePlan) -> Result<Vec<ExecutionReport>> {
        let mut reports = Vec::with_capacity(plan.len());
        for adjustment in &plan.adjustments {
            let order = HedgeOrder::from(adjustment);
            match self.executor.execute(&order).await {
                Ok(report) => {
                    info!(%order, filled = report.filled, "executed");
                    reports.push(report);
                }
                Err(e) => {
                    error!(%order, error = %e, "execution failed");
                    return Err(e);
                }
            }
        }
        Ok(reports)
    }

    /// Runs one monitoring cycle on a single consistent snapshot.
    ///
    /// # Errors
    ///
    /// Propagates market data, input and execution failures. Finding no
    /// viable adjustment is reported, not an error.
    pub async fn run_cycle(&self) -> Result<CycleReport> {
        let positions = self.current_positions().await?;
        let portfolio_delta = self.portfolio_delta(&positions);
        info!(
            underlying = %self.underlying,
            delta = %portfolio_delta,
            positions = positions.len(),
            "current portfolio delta"
        );

        let mut report = CycleReport {
            portfolio_delta,
            position_count: positions.len(),
            plan: None,
            executions: Vec::new(),
        };
        if !self.needs_hedge(portfolio_delta) {
            return Ok(report);
        }

        let plan = self.plan(portfolio_delta, &positions).await?;
        if plan.outcome == PlanOutcome::NoViableAdjustment {
            warn!(delta = %portfolio_delta, "no viable adjustments found");
        } else {
            info!(%plan, "executing adjustments");
            for adjustment in &plan.adjustments {
                info!("{adjustment}");
            }
            report.executions = self.execute(&plan).await?;
        }
        report.plan = Some(plan);
        Ok(report)
    }
}
