//! Order domain events
//!
//! Events accumulate on the aggregate and are drained by the caller after
//! a successful operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{EmployeeId, Money, OrderId};

/// Events emitted by the order aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrderEvent {
    /// A new order entered the system
    OrderCreated {
        order_id: OrderId,
        total: Money,
        timestamp: DateTime<Utc>,
    },

    /// The order's effects were committed to the ledgers
    OrderConfirmed {
        order_id: OrderId,
        confirmed_by: EmployeeId,
        timestamp: DateTime<Utc>,
    },

    /// The order was cancelled before confirmation
    OrderCancelled {
        order_id: OrderId,
        reason: Option<String>,
        timestamp: DateTime<Utc>,
    },

    /// A human rejected an AI draft
    OrderRejected {
        order_id: OrderId,
        reason: Option<String>,
        timestamp: DateTime<Utc>,
    },

    /// A confirmation attempt aborted; the order stays retryable
    ConfirmationFailed {
        order_id: OrderId,
        message: String,
        timestamp: DateTime<Utc>,
    },
}
