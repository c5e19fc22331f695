//! Portfolio model module.
//!
//! Contract identity and the per-cycle snapshots the optimizer works on.
//!
//! ## Components
//!
//! - [`Contract`] / [`OptionContract`]: instrument identity
//! - [`OptionRight`] / [`ExpirationCode`]: option dimensions used by restrictions
//! - [`PositionSnapshot`]: a held position with position-level delta and gamma
//! - [`ChainCandidate`]: an allowed contract that could be opened
//! - [`ChainUniverse`]: listed strikes and expirations for an underlying

mod contract;
mod snapshot;
mod universe;

pub use contract::{Contract, ExpirationCode, OptionContract, OptionRight};
pub use snapshot::{ChainCandidate, PositionSnapshot, UnitGreeks, aggregate_delta, aggregate_gamma};
pub use universe::ChainUniverse;
