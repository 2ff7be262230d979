//! Simulation error types
//!
//! Only genuine faults surface here. Routine outcomes such as firing too soon
//! or splitting a small asteroid are plain `Option`/`bool`/empty results.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// A scalar division would have produced NaN or infinity
    #[error("division by zero in {context}")]
    DivisionByZero { context: &'static str },

    #[error("invalid config field `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl SimError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SimError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
