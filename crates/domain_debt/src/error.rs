//! Debt domain errors

use thiserror::Error;

/// Errors that can occur in the debt domain
#[derive(Debug, Error)]
pub enum DebtError {
    /// Customer not registered with the ledger
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// A hard credit limit would be breached
    #[error("Credit limit exceeded for {customer}: balance {balance} + {amount} > limit {limit}")]
    CreditLimitExceeded {
        customer: String,
        balance: String,
        amount: String,
        limit: String,
    },

    /// Malformed entry input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Money arithmetic failed
    #[error("Calculation error: {0}")]
    Calculation(String),
}
