//! # Option Delta Hedger - Restriction-Aware Delta Hedging
//!
//! A Rust library for semi-automated delta hedging of an options portfolio on a
//! single underlying. It samples portfolio delta, decides whether exposure has
//! drifted outside a tolerance band and, if so, plans trades that bring it back
//! toward neutral while honoring compliance restrictions and penalizing gamma.
//!
//! ## Key Features
//!
//! - **Wildcard Restriction Registry**: Deny-list of (strike, expiration,
//!   right) rules where any field may be a wildcard.
//!
//! - **Greedy Adjustment Optimizer**: Picks, one step at a time, the position
//!   trim or new option position that best reduces the remaining delta while
//!   penalizing gamma and contract count.
//!
//! - **Exact Arithmetic**: Greeks, strikes and scores use `rust_decimal`, so
//!   quantities such as `0.30 / 0.05` come out exact.
//!
//! - **Injected Collaborators**: Broker access sits behind the
//!   [`hedging::MarketDataSource`] and [`hedging::OrderExecutor`] traits; the
//!   core never holds a session.
//!
//! - **OptionStratLib Integration**: Conversions from `OptionStyle`,
//!   `ExpirationDate` and `Greek`.
//!
//! - **Result-Based Error Handling**: All fallible operations return
//!   `Result<T, Error>` with descriptive error types.
//!
//! ## Architecture
//!
//! ```text
//! RestrictionRegistry (deny-list)
//!   └── PositionSnapshot / ChainUniverse (tradable flags, allowed contracts)
//!         └── AdjustmentOptimizer (greedy planning)
//!               └── DeltaHedger (one monitoring cycle over injected collaborators)
//! ```
//!
//! ## Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`restriction`] | Restriction rules and registry |
//! | [`portfolio`] | Contract identity, snapshots and the listed universe |
//! | [`hedging`] | Optimizer, plan types, collaborators and the hedger |
//! | [`config`] | JSON configuration |
//! | [`error`] | Error types and `Result` type alias |
//! | [`utils`] | Utility functions (e.g., date codes) |
//!
//! ## Example Usage
//!
//! ### Restricting Contracts
//!
//! ```rust
//! use option_delta_hedger::portfolio::OptionRight;
//! use option_delta_hedger::restriction::RestrictionRegistry;
//! use rust_decimal_macros::dec;
//!
//! let registry = RestrictionRegistry::new();
//! registry.add_restriction(Some(dec!(100)), Some("20240119"), Some(OptionRight::Put)).unwrap();
//!
//! assert!(!registry.is_allowed(dec!(100), "20240119", OptionRight::Put));
//! assert!(registry.is_allowed(dec!(100), "20240119", OptionRight::Call));
//! assert!(registry.is_allowed(dec!(105), "20240119", OptionRight::Put));
//! ```
//!
//! ### Planning Adjustments
//!
//! ```rust
//! use option_delta_hedger::hedging::{HedgeParams, PlanOutcome, plan_adjustments};
//! use option_delta_hedger::portfolio::{
//!     Contract, ExpirationCode, OptionContract, OptionRight, PositionSnapshot,
//! };
//! use rust_decimal_macros::dec;
//!
//! let call = Contract::from(OptionContract::new(
//!     "SPY",
//!     dec!(100),
//!     ExpirationCode::parse("20240119").unwrap(),
//!     OptionRight::Call,
//! ));
//! // Long 10 contracts, position delta 0.5, position gamma 0.1.
//! let position = PositionSnapshot::new(call.clone(), 10, dec!(0.5), dec!(0.1), true);
//!
//! let plan = plan_adjustments(dec!(0.30), &[position], &[], HedgeParams::default()).unwrap();
//!
//! assert_eq!(plan.adjustments[0].contract, call);
//! assert_eq!(plan.adjustments[0].quantity, -6);
//! assert_eq!(plan.outcome, PlanOutcome::Neutralized);
//! ```
//!
//! ## Examples
//!
//! | Example | Description |
//! |---------|-------------|
//! | `delta_hedging` | Full monitoring cycle against an in-memory broker |
//!
//! Run examples with:
//! ```bash
//! cargo run --example delta_hedging
//! ```
//!
//! ## Benchmarks
//!
//! - **restriction_bench**: Rule matching and universe filtering
//! - **optimizer_bench**: Planning over growing candidate sets
//!
//! ```bash
//! cargo bench
//! ```
//!
//! ## Dependencies
//!
//! - **optionstratlib** (0.13): `OptionStyle`, `ExpirationDate` and `Greek` interop
//! - **orderbook-rs** (0.4): Order `Side` and `OrderId` for hedge orders
//! - **dashmap** (6): Concurrent rule set
//! - **rust_decimal** (1.39): Precise decimal arithmetic
//! - **thiserror** (2.0): Error handling
//! - **serde** (1.0): Serialization support

pub mod config;
pub mod error;
pub mod hedging;
pub mod portfolio;
pub mod restriction;
pub mod utils;

pub use error::{Error, Result};
