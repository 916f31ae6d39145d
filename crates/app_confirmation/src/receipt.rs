//! Outcome records returned by engine operations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{
    DebtEntryId, DraftOrderId, Money, MovementId, OrderId, PaymentId, PostingId,
};

/// Everything a successful confirmation produced
///
/// Stored against the idempotency key so a replayed request returns the
/// original outcome without touching the ledgers again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmationReceipt {
    pub order_id: OrderId,
    pub order_number: String,
    pub total: Money,
    /// Stock movements the confirmation appended
    pub movement_ids: Vec<MovementId>,
    /// Debt entry for the credit portion, if a credit sale
    pub debt_entry_id: Option<DebtEntryId>,
    /// The balanced accounting posting
    pub posting_id: PostingId,
    /// Advisory warnings, e.g. a soft credit limit breach
    pub warnings: Vec<String>,
    pub confirmed_at: DateTime<Utc>,
}

/// Outcome of submitting an AI draft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftSubmission {
    pub draft_id: DraftOrderId,
    /// Order awaiting review, when every line resolved cleanly
    pub order_id: Option<OrderId>,
    /// Parser and resolution warnings
    pub warnings: Vec<String>,
}

/// Compensations produced by reversing a confirmed order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReversalReceipt {
    pub order_id: OrderId,
    /// Restore movements returning the deducted stock
    pub restore_movement_ids: Vec<MovementId>,
    /// Compensating debt entry, if the sale was on credit
    pub debt_entry_id: Option<DebtEntryId>,
    /// Posting whose lines negate the original
    pub reversal_posting_id: PostingId,
}

/// Outcome of recording a stock import
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockImportReceipt {
    pub movement_id: MovementId,
    /// Accounting posting, when the import had a known cost
    pub posting_id: Option<PostingId>,
}

/// Outcome of recording a customer payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub payment_id: PaymentId,
    pub debt_entry_id: DebtEntryId,
    pub posting_id: PostingId,
    /// Customer balance after the payment
    pub balance_after: Money,
}
