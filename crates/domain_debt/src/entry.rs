//! Debt ledger entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{CustomerId, DebtEntryId, Money, SourceRef, StoreId};

/// Direction of a debt entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtEntryKind {
    /// A credit sale increasing what the customer owes
    CreditSale,
    /// A payment reducing what the customer owes
    Payment,
    /// Compensating entry reversing an earlier credit sale
    Reversal,
}

/// A single signed change to a customer's outstanding balance
///
/// Credit sales are positive, payments negative. Entries are append-only;
/// `balance == Σ entries` is the core invariant of this ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtLedgerEntry {
    /// Unique identifier
    pub id: DebtEntryId,
    /// Store the debt is owed to
    pub store_id: StoreId,
    /// Customer owing or paying
    pub customer_id: CustomerId,
    /// Signed amount: credit sale positive, payment negative
    pub amount: Money,
    /// Entry direction
    pub kind: DebtEntryKind,
    /// Document that caused the entry
    pub source_ref: SourceRef,
    /// When the entry was recorded
    pub occurred_at: DateTime<Utc>,
}

impl DebtLedgerEntry {
    /// Creates an entry stamped with the current time
    pub fn new(
        store_id: StoreId,
        customer_id: CustomerId,
        amount: Money,
        kind: DebtEntryKind,
        source_ref: SourceRef,
    ) -> Self {
        Self {
            id: DebtEntryId::new_v7(),
            store_id,
            customer_id,
            amount,
            kind,
            source_ref,
            occurred_at: Utc::now(),
        }
    }
}
