//! Period summary derivation
//!
//! Deterministic over its inputs: the same streams and period always
//! produce the same summary.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, CustomerId, Money, PeriodGrouping, ProductId, ReportPeriod, StoreId};
use domain_debt::DebtLedgerEntry;
use domain_inventory::{MovementReason, StockMovement};
use domain_posting::{accounts, LedgerPosting, Side};

/// Read-only views of the three ledgers' streams
#[derive(Debug, Clone, Copy)]
pub struct ReportInputs<'a> {
    pub movements: &'a [StockMovement],
    pub debt_entries: &'a [DebtLedgerEntry],
    pub postings: &'a [LedgerPosting],
}

/// Revenue aggregated for one day or month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueBucket {
    /// Grouping key, e.g. "2025-03-08" or "2025-03"
    pub period: String,
    pub revenue: Money,
}

/// Sales volume of one product within the period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSales {
    pub product_id: ProductId,
    /// Base units sold
    pub quantity_sold: Decimal,
}

/// A derived, recomputable period summary; never a source of truth
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportPeriodSummary {
    pub store_id: StoreId,
    pub period: ReportPeriod,
    /// Total revenue from active postings in range
    pub revenue_total: Money,
    /// Revenue grouped by day or month
    pub revenue_buckets: Vec<RevenueBucket>,
    /// Products by base units sold, descending
    pub top_products: Vec<ProductSales>,
    /// Total outstanding debt across customers as of the period end
    pub outstanding_debt: Money,
    /// Customers with a non-zero balance as of the period end
    pub debtor_count: usize,
    /// Products whose current stock is at or below the threshold
    pub low_stock: Vec<(ProductId, Decimal)>,
}

/// Derives a summary for a store over a period
///
/// Revenue is read from active (non-reversed) postings' credit lines on
/// revenue accounts; sales volume from `Sale` movements; outstanding debt
/// from the entry log up to the period end; low-stock flags from current
/// levels against `low_stock_threshold`. Stock levels are derived from
/// the movement log, so a catalog product with no movements yet does not
/// appear in the flags.
pub fn summarize(
    store_id: StoreId,
    period: ReportPeriod,
    grouping: PeriodGrouping,
    low_stock_threshold: Decimal,
    inputs: ReportInputs<'_>,
) -> ReportPeriodSummary {
    let currency = Currency::VND;

    // Revenue from the posting journal.
    let mut revenue_total = Money::zero(currency);
    let mut buckets: HashMap<String, Money> = HashMap::new();
    for posting in inputs.postings {
        if !posting.is_active() || posting.reverses.is_some() {
            continue;
        }
        if !period.contains(posting.posted_on) {
            continue;
        }
        for line in &posting.lines {
            if line.side == Side::Credit && line.account_code.starts_with(accounts::REVENUE) {
                revenue_total = revenue_total + line.amount;
                let key = ReportPeriod::group_key(posting.posted_on, grouping);
                let bucket = buckets.entry(key).or_insert_with(|| Money::zero(currency));
                *bucket = *bucket + line.amount;
            }
        }
    }
    let mut revenue_buckets: Vec<RevenueBucket> = buckets
        .into_iter()
        .map(|(period, revenue)| RevenueBucket { period, revenue })
        .collect();
    revenue_buckets.sort_by(|a, b| a.period.cmp(&b.period));

    // Sales volume from the movement log.
    let mut sold: HashMap<ProductId, Decimal> = HashMap::new();
    for movement in inputs.movements {
        if movement.store_id != store_id || movement.reason != MovementReason::Sale {
            continue;
        }
        if !period.contains(movement.occurred_at.date_naive()) {
            continue;
        }
        *sold.entry(movement.product_id).or_insert(dec!(0)) += -movement.delta;
    }
    let mut top_products: Vec<ProductSales> = sold
        .into_iter()
        .map(|(product_id, quantity_sold)| ProductSales {
            product_id,
            quantity_sold,
        })
        .collect();
    top_products.sort_by(|a, b| b.quantity_sold.cmp(&a.quantity_sold));

    // Outstanding debt as of the period end.
    let mut balances: HashMap<CustomerId, Money> = HashMap::new();
    for entry in inputs.debt_entries {
        if entry.store_id != store_id {
            continue;
        }
        if entry.occurred_at.date_naive() > period.to_date() {
            continue;
        }
        let balance = balances
            .entry(entry.customer_id)
            .or_insert_with(|| Money::zero(currency));
        *balance = *balance + entry.amount;
    }
    let mut outstanding_debt = Money::zero(currency);
    let mut debtor_count = 0;
    for balance in balances.values() {
        if !balance.is_zero() {
            debtor_count += 1;
            outstanding_debt = outstanding_debt + *balance;
        }
    }

    // Current stock levels for low-stock flags.
    let mut levels: HashMap<ProductId, Decimal> = HashMap::new();
    for movement in inputs.movements {
        if movement.store_id == store_id {
            *levels.entry(movement.product_id).or_insert(dec!(0)) += movement.delta;
        }
    }
    let mut low_stock: Vec<(ProductId, Decimal)> = levels
        .into_iter()
        .filter(|(_, level)| *level <= low_stock_threshold)
        .collect();
    low_stock.sort_by(|a, b| a.1.cmp(&b.1));

    ReportPeriodSummary {
        store_id,
        period,
        revenue_total,
        revenue_buckets,
        top_products,
        outstanding_debt,
        debtor_count,
        low_stock,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::{OrderId, SourceRef};
    use domain_inventory::InventoryLedger;
    use domain_posting::{BusinessEvent, EventKind, PostingEngine};
    use uuid::Uuid;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_summary_is_deterministic_and_pure() {
        let store = StoreId::new();
        let mut inventory = InventoryLedger::new(store);
        let product = ProductId::new();
        inventory
            .record_import(product, None, dec!(20), SourceRef::StockImport(Uuid::new_v4()))
            .unwrap();
        inventory
            .deduct(product, None, dec!(5), SourceRef::Order(OrderId::new()))
            .unwrap();

        // Movements are stamped with the current time, so the period has
        // to cover today.
        let today = chrono::Utc::now().date_naive();
        let mut engine = PostingEngine::with_tt88_defaults();
        engine
            .post(&BusinessEvent::new(
                EventKind::CashSale,
                SourceRef::Order(OrderId::new()),
                today,
                Money::vnd(dec!(425000)),
                "sale",
            ))
            .unwrap();

        let period = ReportPeriod::single_day(today);
        let inputs = ReportInputs {
            movements: inventory.movements(),
            debt_entries: &[],
            postings: engine.postings(),
        };

        let first = summarize(store, period, PeriodGrouping::Day, dec!(3), inputs);
        let second = summarize(store, period, PeriodGrouping::Day, dec!(3), inputs);

        assert_eq!(first.revenue_total, Money::vnd(dec!(425000)));
        assert_eq!(first.revenue_total, second.revenue_total);
        assert_eq!(first.top_products.len(), 1);
        assert_eq!(first.top_products[0].quantity_sold, dec!(5));
        assert!(first.low_stock.is_empty());
    }

    #[test]
    fn test_reversed_postings_excluded_from_revenue() {
        let store = StoreId::new();
        let mut engine = PostingEngine::with_tt88_defaults();
        let id = engine
            .post(&BusinessEvent::new(
                EventKind::CashSale,
                SourceRef::Order(OrderId::new()),
                day(2025, 3, 8),
                Money::vnd(dec!(100000)),
                "sale",
            ))
            .unwrap();
        engine.reverse(id, "refused delivery").unwrap();

        let period = ReportPeriod::single_day(day(2025, 3, 8));
        let summary = summarize(
            store,
            period,
            PeriodGrouping::Day,
            dec!(0),
            ReportInputs {
                movements: &[],
                debt_entries: &[],
                postings: engine.postings(),
            },
        );

        assert!(summary.revenue_total.is_zero());
    }
}
