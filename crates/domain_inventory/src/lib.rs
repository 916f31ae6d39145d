//! Inventory Domain - Append-only stock movements
//!
//! Stock is never a mutable counter on its own: every change is a signed
//! [`StockMovement`] and the materialized level is maintained alongside the
//! log so audits can reconcile the two at any time.

pub mod error;
pub mod ledger;
pub mod movement;

pub use error::InventoryError;
pub use ledger::InventoryLedger;
pub use movement::{MovementReason, StockMovement};
