//! Restriction registry module.
//!
//! This module provides the [`RestrictionRegistry`], the deny-list consulted
//! before any option contract is allowed into a hedge.

use super::rule::RestrictionRule;
use crate::error::Result;
use crate::portfolio::{Contract, OptionRight};
use dashmap::DashSet;
use rust_decimal::Decimal;
use tracing::debug;

/// Set of restriction rules with wildcard-aware matching.
///
/// Semantics are deny-list, OR across rules, AND across fields: a combination
/// is forbidden as soon as one rule matches it on all three dimensions. There
/// is no precedence between rules.
///
/// Uses `DashSet` so rules can be added through a shared reference while
/// other threads evaluate contracts.
#[derive(Debug, Default)]
pub struct RestrictionRegistry {
    /// Stored rules. Duplicates collapse.
    rules: DashSet<RestrictionRule>,
}

impl RestrictionRegistry {
    /// Creates an empty registry, which allows every contract.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry populated with `rules`.
    ///
    /// # Errors
    ///
    /// Returns the first `Error::InvalidRestriction` encountered.
    pub fn with_rules(rules: impl IntoIterator<Item = RestrictionRule>) -> Result<Self> {
        let registry = Self::new();
        for rule in rules {
            registry.add_rule(rule)?;
        }
        Ok(registry)
    }

    /// Adds a restriction built from optional fields. `None` is a wildcard.
    ///
    /// Returns true if the rule was not already present.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidRestriction` if the strike is not strictly
    /// positive or the expiration is not a `YYYYMMDD`/`YYYYMM` code.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use option_delta_hedger::portfolio::OptionRight;
    /// use option_delta_hedger::restriction::RestrictionRegistry;
    /// use rust_decimal_macros::dec;
    ///
    /// let registry = RestrictionRegistry::new();
    /// // No puts at strike 100 on this date
    /// registry.add_restriction(Some(dec!(100)), Some("20240119"), Some(OptionRight::Put)).unwrap();
    ///
    /// assert!(!registry.is_allowed(dec!(100), "20240119", OptionRight::Put));
    /// assert!(registry.is_allowed(dec!(100), "20240119", OptionRight::Call));
    /// ```
    pub fn add_restriction(
        &self,
        strike: Option<Decimal>,
        expiration: Option<&str>,
        right: Option<OptionRight>,
    ) -> Result<bool> {
        self.add_rule(RestrictionRule::from_parts(strike, expiration, right)?)
    }

    /// Adds a prebuilt rule.
    ///
    /// Returns true if the rule was not already present.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidRestriction` if the rule fails validation.
    pub fn add_rule(&self, rule: RestrictionRule) -> Result<bool> {
        rule.validate()?;
        debug!(%rule, "adding restriction");
        Ok(self.rules.insert(rule))
    }

    /// Returns true if no stored rule forbids the combination.
    #[must_use]
    pub fn is_allowed(&self, strike: Decimal, expiration: &str, right: OptionRight) -> bool {
        !self
            .rules
            .iter()
            .any(|rule| rule.matches(strike, expiration, right))
    }

    /// Returns true if the contract may be traded.
    ///
    /// Stock positions are always tradable; only options are restricted.
    #[must_use]
    pub fn is_contract_allowed(&self, contract: &Contract) -> bool {
        match contract {
            Contract::Stock { .. } => true,
            Contract::Option(option) => {
                self.is_allowed(option.strike, option.expiration.as_str(), option.right)
            }
        }
    }

    /// Returns the number of distinct rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if there are no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns a sorted copy of the stored rules.
    pub fn rules(&self) -> Vec<RestrictionRule> {
        let mut rules: Vec<RestrictionRule> =
            self.rules.iter().map(|rule| rule.key().clone()).collect();
        rules.sort_unstable();
        rules
    }
}

impl std::fmt::Display for RestrictionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} restrictions", self.len())?;
        for rule in self.rules() {
            write!(f, "\n  {rule}")?;
        }
        Ok(())
    }
}
