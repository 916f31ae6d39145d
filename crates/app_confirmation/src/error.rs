//! Errors surfaced by the confirmation engine.
//!
//! Domain errors pass through transparently so callers can match on the
//! underlying cause; the engine only adds the failure modes that exist at
//! the orchestration layer (idempotency replay, version races, lookups).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfirmationError {
    #[error(transparent)]
    Catalog(#[from] domain_catalog::CatalogError),

    #[error(transparent)]
    Order(#[from] domain_order::OrderError),

    #[error(transparent)]
    Inventory(#[from] domain_inventory::InventoryError),

    #[error(transparent)]
    Debt(#[from] domain_debt::DebtError),

    #[error(transparent)]
    Posting(#[from] domain_posting::PostingError),

    #[error(transparent)]
    Money(#[from] core_kernel::MoneyError),

    #[error("order not found: {0}")]
    OrderNotFound(String),

    #[error("draft order not found: {0}")]
    DraftNotFound(String),

    #[error("idempotency key '{key}' was already used to confirm a different order")]
    DuplicateConfirmation { key: String },

    #[error("confirmation conflicted with a concurrent update after {attempts} attempts")]
    ConcurrencyConflict { attempts: u32 },

    #[error("validation failed: {0}")]
    Validation(String),
}

impl ConfirmationError {
    /// Whether the order remains confirmable after this failure.
    ///
    /// Business rejections (stock, credit, missing template) leave the order
    /// in its prior state carrying a failure marker; a later retry may
    /// succeed once the underlying condition is fixed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Inventory(domain_inventory::InventoryError::InsufficientStock { .. })
                | Self::Debt(domain_debt::DebtError::CreditLimitExceeded { .. })
                | Self::Posting(domain_posting::PostingError::TemplateNotFound { .. })
                | Self::ConcurrencyConflict { .. }
        )
    }
}

impl From<validator::ValidationErrors> for ConfirmationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}
