//! Restriction rule module.
//!
//! This module provides [`RestrictionRule`], a possibly wildcarded
//! (strike, expiration, right) triple naming option contracts that must not be
//! traded.

use crate::error::{Error, Result};
use crate::portfolio::{ExpirationCode, OptionRight};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A compliance rule forbidding every option contract it matches.
///
/// A `None` field is a wildcard for that dimension. A rule matches a contract
/// when every one of its three fields matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RestrictionRule {
    /// Restricted strike, or any strike.
    #[serde(default)]
    pub strike: Option<Decimal>,
    /// Restricted expiration code, or any expiration.
    #[serde(default)]
    pub expiration: Option<ExpirationCode>,
    /// Restricted right, or both.
    #[serde(default)]
    pub right: Option<OptionRight>,
}

impl RestrictionRule {
    /// Creates a new rule.
    #[must_use]
    pub const fn new(
        strike: Option<Decimal>,
        expiration: Option<ExpirationCode>,
        right: Option<OptionRight>,
    ) -> Self {
        Self {
            strike,
            expiration,
            right,
        }
    }

    /// Creates a rule from raw arguments, validating them.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidRestriction` naming `strike` if the strike is not
    /// strictly positive, or `expiration` if the code is not a valid date code.
    pub fn from_parts(
        strike: Option<Decimal>,
        expiration: Option<&str>,
        right: Option<OptionRight>,
    ) -> Result<Self> {
        let expiration = expiration
            .map(|code| {
                ExpirationCode::parse(code)
                    .map_err(|e| Error::invalid_restriction("expiration", e.to_string()))
            })
            .transpose()?;
        let rule = Self::new(strike, expiration, right);
        rule.validate()?;
        Ok(rule)
    }

    /// Checks the field values of this rule.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidRestriction` naming `strike` if the strike is
    /// zero or negative.
    pub fn validate(&self) -> Result<()> {
        match self.strike {
            Some(strike) if strike <= Decimal::ZERO => Err(Error::invalid_restriction(
                "strike",
                format!("{strike} must be strictly positive"),
            )),
            _ => Ok(()),
        }
    }

    /// Returns true if every dimension is a wildcard.
    #[must_use]
    pub const fn is_wildcard(&self) -> bool {
        self.strike.is_none() && self.expiration.is_none() && self.right.is_none()
    }

    /// Returns true if this rule forbids the given combination.
    #[must_use]
    pub fn matches(&self, strike: Decimal, expiration: &str, right: OptionRight) -> bool {
        field_matches(self.strike.as_ref(), &strike)
            && field_matches(self.expiration.as_ref().map(ExpirationCode::as_str), expiration)
            && field_matches(self.right.as_ref(), &right)
    }
}

/// Absent-or-equal comparison for a single dimension.
#[inline]
fn field_matches<T: PartialEq + ?Sized>(restricted: Option<&T>, value: &T) -> bool {
    restricted.is_none_or(|restricted| restricted == value)
}

impl fmt::Display for RestrictionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strike = self
            .strike
            .map_or_else(|| "*".to_string(), |s| s.normalize().to_string());
        let expiration = self.expiration.as_ref().map_or("*", ExpirationCode::as_str);
        let right = self.right.map_or("*", |r| r.code());
        write!(f, "strike={strike} expiration={expiration} right={right}")
    }
}
