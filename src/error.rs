//! Error types for the Option-Delta-Hedger library.

use thiserror::Error as ThisError;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the restriction registry, the optimizer and the
/// hedging cycle.
#[derive(Debug, ThisError)]
pub enum Error {
    /// A restriction rule was rejected at insertion time.
    #[error("invalid restriction {field}: {reason}")]
    InvalidRestriction {
        /// Name of the offending rule field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A snapshot handed to the optimizer violates its input contract.
    #[error("invalid input {field}: {reason}")]
    InvalidInput {
        /// Name of the offending input field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// An expiration could not be turned into a date code.
    #[error("invalid expiration: {0}")]
    InvalidExpiration(String),

    /// An option right could not be parsed.
    #[error("invalid option right: {0}")]
    InvalidOptionRight(String),

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The market data collaborator failed.
    #[error("market data unavailable: {0}")]
    MarketData(String),

    /// The execution collaborator failed.
    #[error("execution failed: {0}")]
    Execution(String),

    /// Configuration could not be (de)serialized.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Creates an `InvalidRestriction` error.
    pub fn invalid_restriction(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidRestriction {
            field,
            reason: reason.into(),
        }
    }

    /// Creates an `InvalidInput` error.
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Creates an `InvalidExpiration` error.
    pub fn invalid_expiration(message: impl Into<String>) -> Self {
        Self::InvalidExpiration(message.into())
    }

    /// Creates an `InvalidOptionRight` error.
    pub fn invalid_option_right(value: impl Into<String>) -> Self {
        Self::InvalidOptionRight(value.into())
    }

    /// Creates a `Config` error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a `MarketData` error.
    pub fn market_data(message: impl Into<String>) -> Self {
        Self::MarketData(message.into())
    }

    /// Creates an `Execution` error.
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution(message.into())
    }
}
