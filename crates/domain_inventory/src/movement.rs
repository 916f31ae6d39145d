//! Stock movement records
//!
//! Movements are append-only; the current stock level is always the sum of
//! a product's movements, never an independently mutated counter.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{MovementId, ProductId, ProductUnitId, SourceRef, StoreId};

/// Why a movement happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementReason {
    /// Goods received into the warehouse
    Import,
    /// Stock leaving for a confirmed sale
    Sale,
    /// Manual stocktake correction
    Adjustment,
    /// Stock returned by cancelling a confirmed order
    CancelRestore,
}

/// A single signed change to a product's stock, in base units
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockMovement {
    /// Unique identifier
    pub id: MovementId,
    /// Store the stock belongs to
    pub store_id: StoreId,
    /// Product affected
    pub product_id: ProductId,
    /// Sale unit the quantity was expressed in, if any
    pub product_unit_id: Option<ProductUnitId>,
    /// Signed quantity change in base units
    pub delta: Decimal,
    /// Movement reason
    pub reason: MovementReason,
    /// Document that caused the movement
    pub source_ref: SourceRef,
    /// When the movement was recorded
    pub occurred_at: DateTime<Utc>,
}

impl StockMovement {
    /// Creates a movement record stamped with the current time
    pub fn new(
        store_id: StoreId,
        product_id: ProductId,
        product_unit_id: Option<ProductUnitId>,
        delta: Decimal,
        reason: MovementReason,
        source_ref: SourceRef,
    ) -> Self {
        Self {
            id: MovementId::new_v7(),
            store_id,
            product_id,
            product_unit_id,
            delta,
            reason,
            source_ref,
            occurred_at: Utc::now(),
        }
    }
}
