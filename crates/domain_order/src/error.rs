//! Order domain errors

use thiserror::Error;

/// Errors that can occur in the order domain
#[derive(Debug, Error)]
pub enum OrderError {
    /// Malformed order input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Operation illegal for the order's current state
    #[error("Invalid state: cannot {action} an order in state {state}")]
    InvalidState { action: &'static str, state: String },

    /// Money arithmetic failed
    #[error("Calculation error: {0}")]
    Calculation(String),
}

impl OrderError {
    pub fn validation(message: impl Into<String>) -> Self {
        OrderError::Validation(message.into())
    }
}
