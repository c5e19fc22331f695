//! Restriction module.
//!
//! Compliance filter deciding which option contracts may be traded.
//!
//! ## Components
//!
//! - [`RestrictionRule`]: a (strike, expiration, right) triple where any field
//!   may be a wildcard
//! - [`RestrictionRegistry`]: the rule set, answering "is this combination
//!   allowed?"
//!
//! ## Example
//!
//! ```rust
//! use option_delta_hedger::portfolio::OptionRight;
//! use option_delta_hedger::restriction::RestrictionRegistry;
//! use rust_decimal_macros::dec;
//!
//! let registry = RestrictionRegistry::new();
//!
//! // No options at all at strike 100 on this date
//! registry.add_restriction(Some(dec!(100)), Some("20240119"), None).unwrap();
//!
//! assert!(!registry.is_allowed(dec!(100), "20240119", OptionRight::Call));
//! assert!(!registry.is_allowed(dec!(100), "20240119", OptionRight::Put));
//! assert!(registry.is_allowed(dec!(105), "20240119", OptionRight::Put));
//! ```

mod registry;
mod rule;

pub use registry::RestrictionRegistry;
pub use rule::RestrictionRule;
