//! Options universe module.
//!
//! This module provides [`ChainUniverse`], the strike and expiration grid
//! published for an underlying, and its enumeration through the restriction
//! registry.

use super::contract::{ExpirationCode, OptionContract, OptionRight};
use crate::restriction::RestrictionRegistry;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Strikes and expirations listed for an underlying.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChainUniverse {
    /// The underlying asset symbol.
    pub underlying: String,
    /// Listed strikes.
    pub strikes: Vec<Decimal>,
    /// Listed expirations.
    pub expirations: Vec<ExpirationCode>,
}

impl ChainUniverse {
    /// Creates a new universe.
    #[must_use]
    pub fn new(
        underlying: impl Into<String>,
        strikes: Vec<Decimal>,
        expirations: Vec<ExpirationCode>,
    ) -> Self {
        Self {
            underlying: underlying.into(),
            strikes,
            expirations,
        }
    }

    /// Returns the number of listed contracts (calls and puts).
    #[must_use]
    pub fn contract_count(&self) -> usize {
        self.strikes.len() * self.expirations.len() * OptionRight::ALL.len()
    }

    /// Returns true if nothing is listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contract_count() == 0
    }

    /// Returns every listed contract the registry allows.
    ///
    /// Enumeration order is expiration, then strike, then call before put, so
    /// the result is stable for a given universe.
    pub fn allowed_contracts(&self, registry: &RestrictionRegistry) -> Vec<OptionContract> {
        let mut contracts = Vec::with_capacity(self.contract_count());
        for expiration in &self.expirations {
            for &strike in &self.strikes {
                for right in OptionRight::ALL {
                    if registry.is_allowed(strike, expiration.as_str(), right) {
                        contracts.push(OptionContract::new(
                            self.underlying.as_str(),
                            strike,
                            expiration.clone(),
                            right,
                        ));
                    }
                }
            }
        }
        debug!(
            underlying = %self.underlying,
            listed = self.contract_count(),
            allowed = contracts.len(),
            "filtered option universe"
        );
        contracts
    }
}
