//! AI draft orders
//!
//! The NLP producer submits candidate orders parsed from text or voice.
//! A draft never confirms itself: whatever the parser's confidence, a
//! human reviews it, and the original raw text stays attached unmodified
//! for audit.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{CustomerId, DraftOrderId, EmployeeId, OrderId, ProductUnitId, StoreId};

use crate::error::OrderError;

/// How the draft text reached the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftSource {
    Text,
    Voice,
}

/// One parsed line of a draft order
///
/// The parser may or may not have resolved the product unit; unresolved
/// lines surface as warnings and block confirmation until an employee
/// fixes them up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftItem {
    /// Product name as heard/read
    pub product_name: String,
    /// Unit name as heard/read, e.g. "bao"
    pub unit_name: String,
    /// Parsed quantity
    pub quantity: Decimal,
    /// Catalog unit, if the parser resolved one
    pub product_unit_id: Option<ProductUnitId>,
}

/// Draft review status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DraftStatus {
    /// Awaiting human review
    Pending,
    /// Turned into a confirmed order
    Confirmed {
        order_id: OrderId,
        confirmed_by: EmployeeId,
        confirmed_at: DateTime<Utc>,
    },
    /// Rejected by a human reviewer
    Rejected {
        reason: Option<String>,
        rejected_by: EmployeeId,
        rejected_at: DateTime<Utc>,
    },
}

/// An AI-parsed candidate order awaiting review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftOrder {
    /// Unique identifier
    pub id: DraftOrderId,
    /// Store the draft targets
    pub store_id: StoreId,
    /// Original text or transcript, preserved verbatim
    pub raw_text: String,
    /// Text or voice
    pub source: DraftSource,
    /// Parsed lines
    pub items: Vec<DraftItem>,
    /// Customer, if the parser resolved one
    pub customer_id: Option<CustomerId>,
    /// Customer name as heard/read
    pub customer_name: Option<String>,
    /// Whether the sale is on credit
    pub is_credit: bool,
    /// Parser confidence in [0, 1]; informational only
    pub confidence: Decimal,
    /// Parser warnings, e.g. unresolved products
    pub warnings: Vec<String>,
    /// Review status
    pub status: DraftStatus,
    /// Submission timestamp
    pub created_at: DateTime<Utc>,
}

impl DraftOrder {
    /// Creates a pending draft
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the raw text is empty or there are no items
    pub fn new(
        store_id: StoreId,
        raw_text: impl Into<String>,
        source: DraftSource,
        items: Vec<DraftItem>,
        confidence: Decimal,
    ) -> Result<Self, OrderError> {
        let raw_text = raw_text.into();
        if raw_text.trim().is_empty() {
            return Err(OrderError::validation("draft raw text must not be empty"));
        }
        if items.is_empty() {
            return Err(OrderError::validation("draft must have at least one item"));
        }

        Ok(Self {
            id: DraftOrderId::new_v7(),
            store_id,
            raw_text,
            source,
            items,
            customer_id: None,
            customer_name: None,
            is_credit: false,
            confidence,
            warnings: Vec::new(),
            status: DraftStatus::Pending,
            created_at: Utc::now(),
        })
    }

    /// Sets the resolved customer
    pub fn with_customer(mut self, customer_id: CustomerId, name: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id);
        self.customer_name = Some(name.into());
        self
    }

    /// Marks the draft as a credit sale
    pub fn on_credit(mut self) -> Self {
        self.is_credit = true;
        self
    }

    /// Adds a parser warning
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Returns true while the draft awaits review
    pub fn is_pending(&self) -> bool {
        matches!(self.status, DraftStatus::Pending)
    }

    /// Links the draft to the order built from it
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if the draft was already processed
    pub fn mark_confirmed(
        &mut self,
        order_id: OrderId,
        confirmed_by: EmployeeId,
    ) -> Result<(), OrderError> {
        if !self.is_pending() {
            return Err(OrderError::InvalidState {
                action: "confirm",
                state: "processed draft".to_string(),
            });
        }
        self.status = DraftStatus::Confirmed {
            order_id,
            confirmed_by,
            confirmed_at: Utc::now(),
        };
        Ok(())
    }

    /// Rejects the draft
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if the draft was already processed
    pub fn mark_rejected(
        &mut self,
        reason: Option<String>,
        rejected_by: EmployeeId,
    ) -> Result<(), OrderError> {
        if !self.is_pending() {
            return Err(OrderError::InvalidState {
                action: "reject",
                state: "processed draft".to_string(),
            });
        }
        self.status = DraftStatus::Rejected {
            reason,
            rejected_by,
            rejected_at: Utc::now(),
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn draft() -> DraftOrder {
        DraftOrder::new(
            StoreId::new(),
            "5 bao xi mang cho chu Ba, ghi no",
            DraftSource::Voice,
            vec![DraftItem {
                product_name: "xi mang".to_string(),
                unit_name: "bao".to_string(),
                quantity: dec!(5),
                product_unit_id: None,
            }],
            dec!(0.93),
        )
        .unwrap()
    }

    #[test]
    fn test_draft_starts_pending() {
        assert!(draft().is_pending());
    }

    #[test]
    fn test_empty_raw_text_rejected() {
        let err = DraftOrder::new(StoreId::new(), "  ", DraftSource::Text, vec![], dec!(0.5));
        assert!(err.is_err());
    }

    #[test]
    fn test_double_processing_rejected() {
        let mut d = draft();
        let employee = EmployeeId::new();
        d.mark_confirmed(OrderId::new(), employee).unwrap();
        assert!(d.mark_rejected(None, employee).is_err());
    }

    #[test]
    fn test_raw_text_is_untouched_by_processing() {
        let mut d = draft();
        let text = d.raw_text.clone();
        d.mark_rejected(Some("wrong customer".to_string()), EmployeeId::new())
            .unwrap();
        assert_eq!(d.raw_text, text);
    }
}
