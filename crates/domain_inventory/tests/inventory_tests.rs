//! Integration tests for the inventory ledger

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use core_kernel::{OrderId, ProductId, SourceRef, StoreId};
use domain_inventory::{InventoryLedger, MovementReason};

fn import_ref() -> SourceRef {
    SourceRef::StockImport(Uuid::new_v4())
}

#[test]
fn stock_equals_imports_minus_deductions() {
    let mut ledger = InventoryLedger::new(StoreId::new());
    let product = ProductId::new();

    ledger.record_import(product, None, dec!(50), import_ref()).unwrap();
    ledger.record_import(product, None, dec!(25), import_ref()).unwrap();
    ledger
        .deduct(product, None, dec!(30), SourceRef::Order(OrderId::new()))
        .unwrap();

    assert_eq!(ledger.available_stock(product), dec!(45));
    assert_eq!(ledger.recompute_level(product), dec!(45));
}

#[test]
fn restore_uses_cancel_reason() {
    let mut ledger = InventoryLedger::new(StoreId::new());
    let product = ProductId::new();
    let order = OrderId::new();

    ledger.record_import(product, None, dec!(10), import_ref()).unwrap();
    ledger.deduct(product, None, dec!(4), SourceRef::Order(order)).unwrap();
    ledger.restore(product, None, dec!(4), SourceRef::Order(order)).unwrap();

    assert_eq!(ledger.available_stock(product), dec!(10));
    assert_eq!(
        ledger.movements().last().unwrap().reason,
        MovementReason::CancelRestore
    );
}

#[test]
fn zero_or_negative_quantities_rejected() {
    let mut ledger = InventoryLedger::new(StoreId::new());
    let product = ProductId::new();

    assert!(ledger.record_import(product, None, dec!(0), import_ref()).is_err());
    assert!(ledger
        .deduct(product, None, dec!(-1), SourceRef::Order(OrderId::new()))
        .is_err());
}

proptest! {
    /// For any interleaving of imports and sales, the materialized level
    /// matches the recomputed sum and never goes negative.
    #[test]
    fn prop_level_reconciles_and_never_negative(ops in prop::collection::vec((0u8..2, 1i64..100), 1..40)) {
        let mut ledger = InventoryLedger::new(StoreId::new());
        let product = ProductId::new();

        for (kind, qty) in ops {
            let qty = Decimal::from(qty);
            match kind {
                0 => {
                    ledger.record_import(product, None, qty, import_ref()).unwrap();
                }
                _ => {
                    // Sales beyond availability must fail and leave no trace.
                    let _ = ledger.deduct(
                        product,
                        None,
                        qty,
                        SourceRef::Order(OrderId::new()),
                    );
                }
            }
            prop_assert_eq!(
                ledger.available_stock(product),
                ledger.recompute_level(product)
            );
            prop_assert!(ledger.available_stock(product) >= dec!(0));
        }
    }
}
