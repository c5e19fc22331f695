//! Contract identity module.
//!
//! This module provides [`Contract`], [`OptionContract`], [`OptionRight`] and
//! [`ExpirationCode`], the identity types shared by the restriction registry,
//! the position snapshots and the generated adjustments.

use crate::error::{Error, Result};
use crate::utils::{format_expiration_yyyymmdd, is_valid_date_code};
use optionstratlib::{ExpirationDate, OptionStyle};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The right of an option contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionRight {
    /// Right to buy the underlying.
    Call,
    /// Right to sell the underlying.
    Put,
}

impl OptionRight {
    /// Both rights, calls first.
    pub const ALL: [OptionRight; 2] = [OptionRight::Call, OptionRight::Put];

    /// Returns the single-letter broker code (`C` or `P`).
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Call => "C",
            Self::Put => "P",
        }
    }
}

impl fmt::Display for OptionRight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for OptionRight {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "C" | "CALL" => Ok(Self::Call),
            "P" | "PUT" => Ok(Self::Put),
            _ => Err(Error::invalid_option_right(s)),
        }
    }
}

impl From<OptionStyle> for OptionRight {
    fn from(style: OptionStyle) -> Self {
        match style {
            OptionStyle::Call => Self::Call,
            OptionStyle::Put => Self::Put,
        }
    }
}

impl From<OptionRight> for OptionStyle {
    fn from(right: OptionRight) -> Self {
        match right {
            OptionRight::Call => OptionStyle::Call,
            OptionRight::Put => OptionStyle::Put,
        }
    }
}

/// A validated expiration date code.
///
/// Either a `YYYYMMDD` expiry date or a `YYYYMM` contract month. Comparison is
/// plain string equality, so `202401` and `20240119` are different codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExpirationCode(String);

impl ExpirationCode {
    /// Parses and validates a date code.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidExpiration` if `code` is neither a valid
    /// `YYYYMMDD` date nor a valid `YYYYMM` month.
    pub fn parse(code: impl Into<String>) -> Result<Self> {
        let code = code.into();
        if is_valid_date_code(&code) {
            Ok(Self(code))
        } else {
            Err(Error::invalid_expiration(format!(
                "'{code}' is not a YYYYMMDD or YYYYMM date code"
            )))
        }
    }

    /// Builds a `YYYYMMDD` code from an `ExpirationDate`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidExpiration` if the date cannot be resolved.
    pub fn from_expiration_date(expiration: &ExpirationDate) -> Result<Self> {
        format_expiration_yyyymmdd(expiration).map(Self)
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpirationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ExpirationCode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<ExpirationCode> for String {
    fn from(code: ExpirationCode) -> Self {
        code.0
    }
}

/// An option contract on a single underlying.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionContract {
    /// The underlying asset symbol (e.g., "SPY").
    pub symbol: String,
    /// The strike price.
    pub strike: Decimal,
    /// The expiration date code.
    pub expiration: ExpirationCode,
    /// Call or put.
    pub right: OptionRight,
}

impl OptionContract {
    /// Creates a new option contract.
    #[must_use]
    pub fn new(
        symbol: impl Into<String>,
        strike: Decimal,
        expiration: ExpirationCode,
        right: OptionRight,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            strike,
            expiration,
            right,
        }
    }

    /// Returns a symbol of the form `SPY-20240119-100-P`.
    #[must_use]
    pub fn local_symbol(&self) -> String {
        format!(
            "{}-{}-{}-{}",
            self.symbol,
            self.expiration,
            self.strike.normalize(),
            self.right
        )
    }
}

/// Identity of a tradable instrument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Contract {
    /// Shares of the underlying.
    Stock {
        /// The underlying symbol.
        symbol: String,
    },
    /// An option on the underlying.
    Option(OptionContract),
}

impl Contract {
    /// Creates a stock contract.
    #[must_use]
    pub fn stock(symbol: impl Into<String>) -> Self {
        Self::Stock {
            symbol: symbol.into(),
        }
    }

    /// Returns the underlying symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        match self {
            Self::Stock { symbol } => symbol,
            Self::Option(option) => &option.symbol,
        }
    }

    /// Returns the option details, if this is an option.
    #[must_use]
    pub const fn as_option(&self) -> Option<&OptionContract> {
        match self {
            Self::Stock { .. } => None,
            Self::Option(option) => Some(option),
        }
    }

    /// Returns a human readable symbol for logs and order tickets.
    #[must_use]
    pub fn local_symbol(&self) -> String {
        match self {
            Self::Stock { symbol } => symbol.clone(),
            Self::Option(option) => option.local_symbol(),
        }
    }
}

impl From<OptionContract> for Contract {
    fn from(option: OptionContract) -> Self {
        Self::Option(option)
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.local_symbol())
    }
}
