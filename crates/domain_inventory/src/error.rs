//! Inventory domain errors

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur in the inventory domain
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Availability check failed
    #[error("Insufficient stock for {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: String,
        requested: Decimal,
        available: Decimal,
    },

    /// Malformed movement input
    #[error("Validation error: {0}")]
    Validation(String),
}
