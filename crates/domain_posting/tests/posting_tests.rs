//! Integration tests for templates and the posting engine

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Money, OrderId, PaymentId, SourceRef};
use domain_posting::{
    accounts, AmountSource, BusinessEvent, EventKind, LineRule, PostingEngine, PostingError,
    PostingTemplate, Side, TemplateRegistry,
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn template_version_switch_by_effective_date() {
    let mut registry = TemplateRegistry::tt88_defaults();
    // A revised circular swaps the revenue account from 2026 onwards.
    registry.register(PostingTemplate::new(
        EventKind::CashSale,
        2,
        day(2026, 1, 1),
        "revised revenue account",
        vec![
            LineRule::new(accounts::CASH, Side::Debit, AmountSource::Principal),
            LineRule::new("5111", Side::Credit, AmountSource::Principal),
        ],
    ));
    let engine = PostingEngine::new(registry);

    let before = BusinessEvent::new(
        EventKind::CashSale,
        SourceRef::Order(OrderId::new()),
        day(2025, 12, 31),
        Money::vnd(dec!(100000)),
        "pre-revision sale",
    );
    let after = BusinessEvent::new(
        EventKind::CashSale,
        SourceRef::Order(OrderId::new()),
        day(2026, 1, 1),
        Money::vnd(dec!(100000)),
        "post-revision sale",
    );

    assert_eq!(engine.prepare(&before).unwrap().template_version, 1);
    let posting = engine.prepare(&after).unwrap();
    assert_eq!(posting.template_version, 2);
    assert!(posting.lines.iter().any(|l| l.account_code == "5111"));
}

#[test]
fn debt_payment_posting_clears_receivable() {
    let mut engine = PostingEngine::with_tt88_defaults();
    let event = BusinessEvent::new(
        EventKind::DebtPayment,
        SourceRef::Payment(PaymentId::new()),
        day(2025, 3, 10),
        Money::vnd(dec!(125000)),
        "chu Ba tra no",
    );
    let id = engine.post(&event).unwrap();

    let posting = engine.posting(id).unwrap();
    let debit = posting.lines.iter().find(|l| l.side == Side::Debit).unwrap();
    let credit = posting.lines.iter().find(|l| l.side == Side::Credit).unwrap();
    assert_eq!(debit.account_code, accounts::CASH);
    assert_eq!(credit.account_code, accounts::RECEIVABLES);
}

#[test]
fn journal_is_append_only_across_reversal() {
    let mut engine = PostingEngine::with_tt88_defaults();
    let event = BusinessEvent::new(
        EventKind::CashSale,
        SourceRef::Order(OrderId::new()),
        day(2025, 3, 8),
        Money::vnd(dec!(50000)),
        "sale",
    );
    let id = engine.post(&event).unwrap();
    let lines_before = engine.posting(id).unwrap().lines.clone();

    engine.reverse(id, "return").unwrap();

    // The original's lines are untouched; only the link was added.
    assert_eq!(engine.posting(id).unwrap().lines, lines_before);
    assert_eq!(engine.postings().len(), 2);
}

#[test]
fn posting_serializes_with_snake_case_sides() {
    let mut engine = PostingEngine::with_tt88_defaults();
    let event = BusinessEvent::new(
        EventKind::CreditSale,
        SourceRef::Order(OrderId::new()),
        day(2025, 3, 8),
        Money::vnd(dec!(255000)),
        "ban chiu",
    );
    let id = engine.post(&event).unwrap();

    // The journal is exported as JSON; sides and kinds must stay
    // snake_case for downstream consumers.
    let json = serde_json::to_value(engine.posting(id).unwrap()).unwrap();
    assert_eq!(json["kind"], "credit_sale");
    let sides: Vec<&str> = json["lines"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["side"].as_str().unwrap())
        .collect();
    assert!(sides.contains(&"debit") && sides.contains(&"credit"));
}

#[test]
fn unknown_posting_cannot_be_reversed() {
    let mut engine = PostingEngine::with_tt88_defaults();
    assert!(matches!(
        engine.reverse(core_kernel::PostingId::new(), "typo"),
        Err(PostingError::PostingNotFound(_))
    ));
}

proptest! {
    /// Every posting the default templates produce balances, for any
    /// principal/cost amounts.
    #[test]
    fn prop_default_templates_always_balance(
        principal in 1i64..100_000_000,
        cost in proptest::option::of(1i64..100_000_000),
        kind_idx in 0usize..4,
    ) {
        let kinds = [
            EventKind::CashSale,
            EventKind::CreditSale,
            EventKind::StockImport,
            EventKind::DebtPayment,
        ];
        let engine = PostingEngine::with_tt88_defaults();

        let mut event = BusinessEvent::new(
            kinds[kind_idx],
            SourceRef::Order(OrderId::new()),
            day(2025, 6, 1),
            Money::vnd(Decimal::from(principal)),
            "prop sale",
        );
        if let Some(cost) = cost {
            event = event.with_cost(Money::vnd(Decimal::from(cost)));
        }

        let posting = engine.prepare(&event).unwrap();
        prop_assert_eq!(posting.debit_total(), posting.credit_total());
    }
}
