//! # Error Types Module
//!
//! This module defines the error types of the crate. Per-requirement problems
//! (unknown units, malformed quantities, no inventory match, incompatible
//! unit families) are ordinary outcomes and never show up here; only
//! call-level contract violations and bad configuration do.

use thiserror::Error;

/// Call-level contract violations of a reconciliation call
///
/// When one of these is returned no inventory record has been touched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeductionError {
    /// Servings multiplier below 1
    #[error("servings must be at least 1, got {0}")]
    InvalidServings(u32),

    /// Match threshold outside `[0, 1]` or NaN
    #[error("{name} must be between 0 and 1, got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },

    /// Inventory record with a negative or non-finite quantity
    #[error("inventory record '{name}' has invalid quantity {quantity}")]
    InvalidInventoryQuantity { name: String, quantity: f64 },
}

/// Errors raised while building configuration from the environment
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A variable was set but could not be used
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(key: &str, value: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
