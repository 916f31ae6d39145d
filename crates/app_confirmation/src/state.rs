//! Mutable engine state for one store
//!
//! Everything the orchestrator touches during a confirmation lives here,
//! so one write-lock scope covers the whole unit of work.

use std::collections::HashMap;

use chrono::NaiveDate;

use core_kernel::{DraftOrderId, OrderId, StoreId};
use domain_catalog::Catalog;
use domain_debt::DebtLedger;
use domain_inventory::InventoryLedger;
use domain_order::{order_number, DraftOrder, Order};
use domain_posting::PostingEngine;

use crate::receipt::ConfirmationReceipt;

/// A stored confirmation outcome, keyed by idempotency key
#[derive(Debug, Clone)]
pub struct ConfirmationRecord {
    /// Order the key was first used for
    pub order_id: OrderId,
    pub receipt: ConfirmationReceipt,
}

/// All per-store state behind the engine's lock
#[derive(Debug)]
pub struct EngineState {
    pub store_id: StoreId,
    /// Short code embedded in order numbers
    pub store_code: String,
    pub catalog: Catalog,
    pub orders: HashMap<OrderId, Order>,
    pub drafts: HashMap<DraftOrderId, DraftOrder>,
    pub inventory: InventoryLedger,
    pub debt: DebtLedger,
    pub posting: PostingEngine,
    /// Idempotency records of completed confirmations
    pub confirmations: HashMap<String, ConfirmationRecord>,
    /// Monotonic order sequence within the store
    pub order_seq: u32,
}

impl EngineState {
    pub fn new(store_id: StoreId, store_code: impl Into<String>) -> Self {
        Self::with_posting(store_id, store_code, PostingEngine::with_tt88_defaults())
    }

    /// State with a caller-supplied posting engine, e.g. custom templates
    pub fn with_posting(
        store_id: StoreId,
        store_code: impl Into<String>,
        posting: PostingEngine,
    ) -> Self {
        Self {
            store_id,
            store_code: store_code.into(),
            catalog: Catalog::new(),
            orders: HashMap::new(),
            drafts: HashMap::new(),
            inventory: InventoryLedger::new(store_id),
            debt: DebtLedger::new(store_id, core_kernel::Currency::VND),
            posting,
            confirmations: HashMap::new(),
            order_seq: 0,
        }
    }

    /// Allocates the next order number for `date`
    pub fn next_order_number(&mut self, date: NaiveDate) -> String {
        self.order_seq += 1;
        order_number(&self.store_code, date, self.order_seq)
    }
}
