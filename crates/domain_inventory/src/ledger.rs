//! Inventory ledger
//!
//! Append-only movement log with a materialized per-product stock level.
//! The level is maintained in the same call that appends the movement, so
//! it can always be reconciled against the log.
//!
//! # Invariants
//!
//! - `stock_level(p) == Σ delta` over all movements for `p`
//! - A deduction is never appended when it would drive the level negative

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use core_kernel::{MovementId, ProductId, ProductUnitId, SourceRef, StoreId};

use crate::error::InventoryError;
use crate::movement::{MovementReason, StockMovement};

/// Per-store inventory ledger
///
/// The availability check and the append happen inside one `&mut self`
/// call; the caller's lock scope closes the check-then-act window across
/// concurrent confirmations.
#[derive(Debug, Clone)]
pub struct InventoryLedger {
    store_id: StoreId,
    movements: Vec<StockMovement>,
    levels: HashMap<ProductId, Decimal>,
}

impl InventoryLedger {
    /// Creates an empty ledger for a store
    pub fn new(store_id: StoreId) -> Self {
        Self {
            store_id,
            movements: Vec::new(),
            levels: HashMap::new(),
        }
    }

    /// Returns the store this ledger belongs to
    pub fn store_id(&self) -> StoreId {
        self.store_id
    }

    /// Current stock of a product in base units
    pub fn available_stock(&self, product_id: ProductId) -> Decimal {
        self.levels.get(&product_id).copied().unwrap_or(dec!(0))
    }

    /// The full movement log, oldest first
    pub fn movements(&self) -> &[StockMovement] {
        &self.movements
    }

    /// Checks availability for a whole order as one batch
    ///
    /// Requirements for the same product are summed before comparison, so
    /// an order cannot be partially fulfillable.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientStock` naming the first product that falls short
    pub fn check_available(
        &self,
        requirements: &[(ProductId, Decimal)],
    ) -> Result<(), InventoryError> {
        let mut needed: HashMap<ProductId, Decimal> = HashMap::new();
        for (product_id, qty) in requirements {
            *needed.entry(*product_id).or_insert(dec!(0)) += *qty;
        }

        for (product_id, required) in needed {
            let available = self.available_stock(product_id);
            if available < required {
                return Err(InventoryError::InsufficientStock {
                    product: product_id.to_string(),
                    requested: required,
                    available,
                });
            }
        }
        Ok(())
    }

    /// Deducts stock for a sale
    ///
    /// # Errors
    ///
    /// Returns `InsufficientStock` if the product's level is below the
    /// requested base quantity; nothing is appended in that case.
    pub fn deduct(
        &mut self,
        product_id: ProductId,
        product_unit_id: Option<ProductUnitId>,
        base_quantity: Decimal,
        source_ref: SourceRef,
    ) -> Result<MovementId, InventoryError> {
        ensure_positive(base_quantity)?;

        let available = self.available_stock(product_id);
        if available < base_quantity {
            return Err(InventoryError::InsufficientStock {
                product: product_id.to_string(),
                requested: base_quantity,
                available,
            });
        }

        self.append(StockMovement::new(
            self.store_id,
            product_id,
            product_unit_id,
            -base_quantity,
            MovementReason::Sale,
            source_ref,
        ))
    }

    /// Records a stock import; no availability constraint
    pub fn record_import(
        &mut self,
        product_id: ProductId,
        product_unit_id: Option<ProductUnitId>,
        base_quantity: Decimal,
        source_ref: SourceRef,
    ) -> Result<MovementId, InventoryError> {
        ensure_positive(base_quantity)?;

        self.append(StockMovement::new(
            self.store_id,
            product_id,
            product_unit_id,
            base_quantity,
            MovementReason::Import,
            source_ref,
        ))
    }

    /// Returns stock removed by a since-reversed confirmation
    pub fn restore(
        &mut self,
        product_id: ProductId,
        product_unit_id: Option<ProductUnitId>,
        base_quantity: Decimal,
        source_ref: SourceRef,
    ) -> Result<MovementId, InventoryError> {
        ensure_positive(base_quantity)?;

        self.append(StockMovement::new(
            self.store_id,
            product_id,
            product_unit_id,
            base_quantity,
            MovementReason::CancelRestore,
            source_ref,
        ))
    }

    /// Applies a signed stocktake correction
    ///
    /// # Errors
    ///
    /// A negative adjustment may not drive the level below zero
    pub fn adjust(
        &mut self,
        product_id: ProductId,
        delta: Decimal,
        source_ref: SourceRef,
    ) -> Result<MovementId, InventoryError> {
        if delta.is_zero() {
            return Err(InventoryError::Validation(
                "adjustment delta must be non-zero".to_string(),
            ));
        }

        let available = self.available_stock(product_id);
        if available + delta < dec!(0) {
            return Err(InventoryError::InsufficientStock {
                product: product_id.to_string(),
                requested: -delta,
                available,
            });
        }

        self.append(StockMovement::new(
            self.store_id,
            product_id,
            None,
            delta,
            MovementReason::Adjustment,
            source_ref,
        ))
    }

    /// Recomputes a product's level from the log
    ///
    /// Used by reconciliation checks; must always equal `available_stock`.
    pub fn recompute_level(&self, product_id: ProductId) -> Decimal {
        self.movements
            .iter()
            .filter(|m| m.product_id == product_id)
            .map(|m| m.delta)
            .sum()
    }

    fn append(&mut self, movement: StockMovement) -> Result<MovementId, InventoryError> {
        let id = movement.id;
        *self.levels.entry(movement.product_id).or_insert(dec!(0)) += movement.delta;
        debug!(
            movement = %id,
            product = %movement.product_id,
            delta = %movement.delta,
            reason = ?movement.reason,
            "stock movement appended"
        );
        self.movements.push(movement);
        Ok(id)
    }
}

fn ensure_positive(quantity: Decimal) -> Result<(), InventoryError> {
    if quantity <= dec!(0) {
        return Err(InventoryError::Validation(format!(
            "quantity must be positive, got {quantity}"
        )));
    }
    Ok(())
}
