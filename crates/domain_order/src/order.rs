//! Order aggregate root
//!
//! The order is the consistency boundary for everything a sale commits to
//! the ledgers. It is mutable only while `Draft` or `PendingConfirmation`;
//! once `Confirmed` it is immutable and can only be undone by a reversal,
//! never by editing history.
//!
//! # State machine
//!
//! - Draft -> PendingConfirmation is not used today; counter orders start
//!   in Draft, AI drafts start in PendingConfirmation
//! - Draft | PendingConfirmation -> Confirmed (orchestrator only)
//! - Draft | PendingConfirmation -> Cancelled
//! - PendingConfirmation -> Rejected (human rejects an AI draft)
//! - Confirmed, Cancelled, Rejected are terminal

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{
    Currency, CustomerId, DraftOrderId, EmployeeId, Money, OrderId, StoreId,
};

use crate::error::OrderError;
use crate::events::OrderEvent;
use crate::item::OrderItem;

/// Where an order came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSource {
    /// Keyed in at the counter by an employee
    Counter,
    /// Parsed from natural language by the AI producer
    Ai,
}

/// Order lifecycle states
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum OrderState {
    /// Editable order awaiting confirmation
    Draft,

    /// AI-sourced order awaiting mandatory human review
    PendingConfirmation,

    /// Effects committed to the ledgers; immutable
    Confirmed {
        confirmed_at: DateTime<Utc>,
        confirmed_by: EmployeeId,
    },

    /// Abandoned before confirmation, or voided by a full reversal
    Cancelled {
        reason: Option<String>,
        cancelled_at: DateTime<Utc>,
    },

    /// AI draft rejected by a human reviewer
    Rejected {
        reason: Option<String>,
        rejected_at: DateTime<Utc>,
    },
}

impl OrderState {
    /// Short label for error messages
    pub fn label(&self) -> &'static str {
        match self {
            OrderState::Draft => "draft",
            OrderState::PendingConfirmation => "pending_confirmation",
            OrderState::Confirmed { .. } => "confirmed",
            OrderState::Cancelled { .. } => "cancelled",
            OrderState::Rejected { .. } => "rejected",
        }
    }
}

/// Marker left on an order by an aborted confirmation attempt
///
/// Distinct from cancellation: a failed order keeps its prior state and
/// may be retried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureMarker {
    /// Human-readable failure message
    pub message: String,
    /// When the attempt failed
    pub failed_at: DateTime<Utc>,
}

/// The order aggregate root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    store_id: StoreId,
    customer_id: Option<CustomerId>,
    order_number: String,
    source: OrderSource,
    state: OrderState,
    /// Credit sale ("ban chiu"): the total goes to the customer's debt
    is_credit: bool,
    items: Vec<OrderItem>,
    total: Money,
    notes: Option<String>,
    created_by: EmployeeId,
    /// Draft order this order was built from, if AI-sourced
    source_draft_id: Option<DraftOrderId>,
    last_failure: Option<FailureMarker>,
    /// Version for optimistic concurrency
    version: u32,
    #[serde(skip)]
    events: Vec<OrderEvent>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Order {
    /// Creates a new order
    ///
    /// Counter orders start in `Draft`; AI-sourced orders start in
    /// `PendingConfirmation` and always require human review, whatever
    /// the producer's confidence was.
    ///
    /// # Errors
    ///
    /// - `Validation` if there are no items
    /// - `Validation` if a credit sale has no customer
    pub fn create(
        store_id: StoreId,
        order_number: impl Into<String>,
        items: Vec<OrderItem>,
        customer_id: Option<CustomerId>,
        source: OrderSource,
        is_credit: bool,
        created_by: EmployeeId,
    ) -> Result<Self, OrderError> {
        if items.is_empty() {
            return Err(OrderError::validation("order must have at least one item"));
        }
        if is_credit && customer_id.is_none() {
            return Err(OrderError::validation(
                "a credit sale requires a customer",
            ));
        }

        let mut total = Money::zero(Currency::VND);
        for item in &items {
            total = total
                .checked_add(&item.line_total)
                .map_err(|e| OrderError::Calculation(e.to_string()))?;
        }

        let state = match source {
            OrderSource::Counter => OrderState::Draft,
            OrderSource::Ai => OrderState::PendingConfirmation,
        };

        let now = Utc::now();
        let id = OrderId::new_v7();
        let mut order = Self {
            id,
            store_id,
            customer_id,
            order_number: order_number.into(),
            source,
            state,
            is_credit,
            items,
            total,
            notes: None,
            created_by,
            source_draft_id: None,
            last_failure: None,
            version: 0,
            events: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        order.events.push(OrderEvent::OrderCreated {
            order_id: id,
            total,
            timestamp: now,
        });
        Ok(order)
    }

    /// Returns the order ID
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Returns the owning store
    pub fn store_id(&self) -> StoreId {
        self.store_id
    }

    /// Returns the customer, if any
    pub fn customer_id(&self) -> Option<CustomerId> {
        self.customer_id
    }

    /// Returns the human-readable order number
    pub fn order_number(&self) -> &str {
        &self.order_number
    }

    /// Returns the order source
    pub fn source(&self) -> OrderSource {
        self.source
    }

    /// Returns the current state
    pub fn state(&self) -> &OrderState {
        &self.state
    }

    /// Returns whether this is a credit sale
    pub fn is_credit(&self) -> bool {
        self.is_credit
    }

    /// Returns the line items
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns the order total
    pub fn total(&self) -> Money {
        self.total
    }

    /// Returns the failure marker from the last aborted confirmation
    pub fn last_failure(&self) -> Option<&FailureMarker> {
        self.last_failure.as_ref()
    }

    /// Returns the optimistic-concurrency version
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Returns the source draft, if AI-sourced
    pub fn source_draft_id(&self) -> Option<DraftOrderId> {
        self.source_draft_id
    }

    /// Links the order to the draft it was built from
    pub fn with_source_draft(mut self, draft_id: DraftOrderId) -> Self {
        self.source_draft_id = Some(draft_id);
        self
    }

    /// Attaches free-form notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Returns accumulated domain events and clears them
    pub fn take_events(&mut self) -> Vec<OrderEvent> {
        std::mem::take(&mut self.events)
    }

    /// Returns true if the order may still be confirmed
    pub fn is_confirmable(&self) -> bool {
        matches!(
            self.state,
            OrderState::Draft | OrderState::PendingConfirmation
        )
    }

    /// Marks the order confirmed
    ///
    /// Only the confirmation orchestrator calls this, after the ledger
    /// effects have been staged; the aggregate enforces the state rule.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless `Draft` or `PendingConfirmation`
    pub fn confirm(&mut self, confirmed_by: EmployeeId) -> Result<(), OrderError> {
        if !self.is_confirmable() {
            return Err(OrderError::InvalidState {
                action: "confirm",
                state: self.state.label().to_string(),
            });
        }

        let now = Utc::now();
        self.state = OrderState::Confirmed {
            confirmed_at: now,
            confirmed_by,
        };
        self.last_failure = None;
        self.touch(now);
        self.events.push(OrderEvent::OrderConfirmed {
            order_id: self.id,
            confirmed_by,
            timestamp: now,
        });
        Ok(())
    }

    /// Cancels the order
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless `Draft` or `PendingConfirmation`
    pub fn cancel(&mut self, reason: Option<String>) -> Result<(), OrderError> {
        match self.state {
            OrderState::Draft | OrderState::PendingConfirmation => {
                let now = Utc::now();
                self.state = OrderState::Cancelled {
                    reason: reason.clone(),
                    cancelled_at: now,
                };
                self.touch(now);
                self.events.push(OrderEvent::OrderCancelled {
                    order_id: self.id,
                    reason,
                    timestamp: now,
                });
                Ok(())
            }
            _ => Err(OrderError::InvalidState {
                action: "cancel",
                state: self.state.label().to_string(),
            }),
        }
    }

    /// Voids a confirmed order whose ledger effects have been compensated
    ///
    /// Only the orchestrator calls this, after the restore movements, the
    /// debt reversal, and the posting reversal are all in place. The order
    /// itself is never edited; it ends `Cancelled` with the reversal reason.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless `Confirmed`
    pub fn mark_reversed(&mut self, reason: Option<String>) -> Result<(), OrderError> {
        match self.state {
            OrderState::Confirmed { .. } => {
                let now = Utc::now();
                self.state = OrderState::Cancelled {
                    reason: reason.clone(),
                    cancelled_at: now,
                };
                self.touch(now);
                self.events.push(OrderEvent::OrderCancelled {
                    order_id: self.id,
                    reason,
                    timestamp: now,
                });
                Ok(())
            }
            _ => Err(OrderError::InvalidState {
                action: "reverse",
                state: self.state.label().to_string(),
            }),
        }
    }

    /// Rejects an AI draft order
    ///
    /// The original raw text stays attached to the source draft for audit.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless `PendingConfirmation`
    pub fn reject(&mut self, reason: Option<String>) -> Result<(), OrderError> {
        match self.state {
            OrderState::PendingConfirmation => {
                let now = Utc::now();
                self.state = OrderState::Rejected {
                    reason: reason.clone(),
                    rejected_at: now,
                };
                self.touch(now);
                self.events.push(OrderEvent::OrderRejected {
                    order_id: self.id,
                    reason,
                    timestamp: now,
                });
                Ok(())
            }
            _ => Err(OrderError::InvalidState {
                action: "reject",
                state: self.state.label().to_string(),
            }),
        }
    }

    /// Records an aborted confirmation attempt
    ///
    /// The state is unchanged; the order stays retryable.
    pub fn record_failure(&mut self, message: impl Into<String>) {
        let now = Utc::now();
        let message = message.into();
        self.last_failure = Some(FailureMarker {
            message: message.clone(),
            failed_at: now,
        });
        self.touch(now);
        self.events.push(OrderEvent::ConfirmationFailed {
            order_id: self.id,
            message,
            timestamp: now,
        });
    }

    /// Bumps the optimistic-concurrency version
    pub fn bump_version(&mut self) {
        self.version += 1;
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

/// Builds a human-readable order number: `ORD{store-code}{yymmdd}{seq}`
pub fn order_number(store_code: &str, date: NaiveDate, seq: u32) -> String {
    format!(
        "ORD{}{:02}{:02}{:02}{:04}",
        store_code,
        date.year() % 100,
        date.month(),
        date.day(),
        seq
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::OrderItem;
    use core_kernel::{ProductId, ProductUnitId};
    use rust_decimal_macros::dec;

    fn one_item() -> Vec<OrderItem> {
        vec![OrderItem::new(
            ProductId::new(),
            ProductUnitId::new(),
            dec!(5),
            dec!(1),
            Money::vnd(dec!(85000)),
            Money::zero(Currency::VND),
        )
        .unwrap()]
    }

    fn counter_order() -> Order {
        Order::create(
            StoreId::new(),
            "ORD0012503080001",
            one_item(),
            None,
            OrderSource::Counter,
            false,
            EmployeeId::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_total_is_sum_of_line_totals() {
        let order = counter_order();
        assert_eq!(order.total(), Money::vnd(dec!(425000)));
    }

    #[test]
    fn test_counter_order_starts_draft() {
        assert_eq!(counter_order().state(), &OrderState::Draft);
    }

    #[test]
    fn test_ai_order_starts_pending() {
        let order = Order::create(
            StoreId::new(),
            "ORD0012503080002",
            one_item(),
            Some(CustomerId::new()),
            OrderSource::Ai,
            true,
            EmployeeId::new(),
        )
        .unwrap();
        assert_eq!(order.state(), &OrderState::PendingConfirmation);
    }

    #[test]
    fn test_empty_items_rejected() {
        let err = Order::create(
            StoreId::new(),
            "ORD0012503080003",
            vec![],
            None,
            OrderSource::Counter,
            false,
            EmployeeId::new(),
        );
        assert!(matches!(err, Err(OrderError::Validation(_))));
    }

    #[test]
    fn test_credit_sale_requires_customer() {
        let err = Order::create(
            StoreId::new(),
            "ORD0012503080004",
            one_item(),
            None,
            OrderSource::Counter,
            true,
            EmployeeId::new(),
        );
        assert!(matches!(err, Err(OrderError::Validation(_))));
    }

    #[test]
    fn test_confirm_then_cancel_is_invalid() {
        let mut order = counter_order();
        order.confirm(EmployeeId::new()).unwrap();
        assert!(matches!(
            order.cancel(None),
            Err(OrderError::InvalidState { .. })
        ));
    }

    #[test]
    fn test_reject_only_from_pending() {
        let mut order = counter_order();
        assert!(matches!(
            order.reject(Some("not ours".to_string())),
            Err(OrderError::InvalidState { .. })
        ));
    }

    #[test]
    fn test_failure_marker_keeps_order_retryable() {
        let mut order = counter_order();
        order.record_failure("insufficient stock");
        assert!(order.is_confirmable());
        assert!(order.last_failure().is_some());
        // A later success clears the marker.
        order.confirm(EmployeeId::new()).unwrap();
        assert!(order.last_failure().is_none());
    }

    #[test]
    fn test_order_number_format() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 8).unwrap();
        assert_eq!(order_number("001", date, 12), "ORD0012503080012");
    }
}
