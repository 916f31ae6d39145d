//! Workflow port
//!
//! Callers (API layers, test harnesses) depend on this trait rather than
//! the concrete engine, keeping the orchestration seam swappable.

use async_trait::async_trait;

use core_kernel::{EmployeeId, OrderId};

use crate::engine::ConfirmationEngine;
use crate::error::ConfirmationError;
use crate::receipt::{ConfirmationReceipt, ReversalReceipt};

/// The order lifecycle operations an interface layer drives
#[async_trait]
pub trait OrderWorkflow: Send + Sync {
    /// Confirms an order idempotently under `idempotency_key`
    async fn confirm_order(
        &self,
        order_id: OrderId,
        idempotency_key: &str,
        confirmed_by: EmployeeId,
    ) -> Result<ConfirmationReceipt, ConfirmationError>;

    /// Cancels an unconfirmed order
    async fn cancel_order(
        &self,
        order_id: OrderId,
        reason: Option<String>,
    ) -> Result<(), ConfirmationError>;

    /// Reverses a confirmed order with compensating ledger records
    async fn reverse_order(
        &self,
        order_id: OrderId,
        reason: String,
    ) -> Result<ReversalReceipt, ConfirmationError>;
}

#[async_trait]
impl OrderWorkflow for crate::engine::ConfirmationEngine {
    async fn confirm_order(
        &self,
        order_id: OrderId,
        idempotency_key: &str,
        confirmed_by: EmployeeId,
    ) -> Result<ConfirmationReceipt, ConfirmationError> {
        ConfirmationEngine::confirm_order(self, order_id, idempotency_key, confirmed_by).await
    }

    async fn cancel_order(
        &self,
        order_id: OrderId,
        reason: Option<String>,
    ) -> Result<(), ConfirmationError> {
        ConfirmationEngine::cancel_order(self, order_id, reason).await
    }

    async fn reverse_order(
        &self,
        order_id: OrderId,
        reason: String,
    ) -> Result<ReversalReceipt, ConfirmationError> {
        ConfirmationEngine::reverse_order(self, order_id, reason).await
    }
}
