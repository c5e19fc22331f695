//! Hedging module.
//!
//! Delta-neutralizing adjustment planning and the monitoring cycle around it.
//!
//! ## Flow
//!
//! ```text
//! DeltaHedger::run_cycle
//!   ├── MarketDataSource::positions        -> PositionSnapshot (tradable via registry)
//!   ├── aggregate delta, compare to threshold
//!   ├── ChainUniverse::allowed_contracts   -> ChainCandidate (greeks via source)
//!   ├── AdjustmentOptimizer::plan          -> HedgePlan
//!   └── OrderExecutor::execute             -> ExecutionReport per adjustment
//! ```
//!
//! ## Components
//!
//! - [`AdjustmentOptimizer`] / [`plan_adjustments`]: greedy planner
//! - [`AdjustmentCandidate`]: working set entry (reduce or new)
//! - [`Adjustment`] / [`HedgePlan`] / [`PlanOutcome`]: planner output
//! - [`HedgeParams`]: threshold and new-position cap
//! - [`MarketDataSource`] / [`OrderExecutor`]: injected collaborators
//! - [`DeltaHedger`]: one monitoring cycle

mod candidate;
mod gateway;
mod hedger;
mod optimizer;
mod params;
mod plan;

pub use candidate::{AdjustmentCandidate, CandidateAction, MAX_ORDER_QUANTITY};
pub use gateway::{ExecutionReport, HedgeOrder, HeldPosition, MarketDataSource, OrderExecutor};
pub use hedger::{CycleReport, DeltaHedger};
pub use optimizer::{
    AdjustmentOptimizer, DELTA_WEIGHT, GAMMA_WEIGHT, SIZE_WEIGHT, plan_adjustments,
};
pub use params::{DEFAULT_DELTA_THRESHOLD, DEFAULT_NEW_POSITION_CAP, HedgeParams};
pub use plan::{Adjustment, HedgePlan, PlanOutcome};
