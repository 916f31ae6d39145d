//! Catalog domain errors

use thiserror::Error;

/// Errors that can occur in the catalog domain
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Product not found in the store's catalog
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product unit not found
    #[error("Product unit not found: {0}")]
    UnitNotFound(String),

    /// Unit exists but has been deactivated
    #[error("Product unit is inactive: {0}")]
    UnitInactive(String),

    /// Unit belongs to a product of another store
    #[error("Product unit {unit} does not belong to store {store}")]
    WrongStore { unit: String, store: String },

    /// Invalid unit definition
    #[error("Validation error: {0}")]
    Validation(String),
}
