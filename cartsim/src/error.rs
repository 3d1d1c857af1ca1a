//! Error type shared by the simulation core, the ledger and scenario loading.
//!
//! Nothing here is fatal: every variant maps to a message the UI layer can
//! show next to the control that produced it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// A numeric input failed validation (non-finite, out of range)
    #[error("invalid {what}: {value}")]
    InvalidInput { what: &'static str, value: f64 },

    /// Grading input was not a number
    #[error("Enter a number")]
    NotANumber,

    /// Neither measured nor theoretical acceleration is usable
    #[error("No reference available")]
    NoReference,

    /// Mass/force are locked while a run is in progress
    #[error("configuration is locked while the cart is running")]
    ConfigLocked,

    /// 1-based ledger row that does not exist
    #[error("no ledger entry #{0}")]
    NoSuchEntry(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("scenario parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;

/// Reject NaN and infinities at the boundary
pub(crate) fn finite(what: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SimError::InvalidInput { what, value })
    }
}
