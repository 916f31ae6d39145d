//! Source references for ledger records
//!
//! Every stock movement, debt entry, and accounting posting points back to
//! the business document that caused it, so aggregates stay reconcilable
//! against their source transactions.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::identifiers::{OrderId, PaymentId, PostingId};

/// The originating document of a ledger record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum SourceRef {
    /// A confirmed sale order
    Order(OrderId),
    /// A customer debt payment
    Payment(PaymentId),
    /// A stock import document
    StockImport(Uuid),
    /// A manual stock adjustment
    Adjustment(Uuid),
    /// A reversal correcting an earlier posting
    ReversalOf(PostingId),
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceRef::Order(id) => write!(f, "order/{id}"),
            SourceRef::Payment(id) => write!(f, "payment/{id}"),
            SourceRef::StockImport(id) => write!(f, "import/{id}"),
            SourceRef::Adjustment(id) => write!(f, "adjustment/{id}"),
            SourceRef::ReversalOf(id) => write!(f, "reversal/{id}"),
        }
    }
}
