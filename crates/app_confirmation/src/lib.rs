//! Confirmation orchestrator
//!
//! The single write path of the system. Confirming an order commits its
//! effects to the inventory ledger, the debt ledger, and the accounting
//! journal atomically, under an idempotency key; cancellations of
//! confirmed orders are compensating reversals, never edits.

pub mod config;
pub mod dto;
pub mod engine;
pub mod error;
pub mod ports;
pub mod receipt;
pub mod state;

pub use config::EngineConfig;
pub use dto::{CreateOrderRequest, DraftItemRequest, OrderItemRequest, SubmitDraftRequest};
pub use engine::ConfirmationEngine;
pub use error::ConfirmationError;
pub use ports::OrderWorkflow;
pub use receipt::{
    ConfirmationReceipt, DraftSubmission, PaymentReceipt, ReversalReceipt, StockImportReceipt,
};
