//! Versioned posting templates
//!
//! A template maps a business event kind to the ledger lines the effective
//! regulation requires. Templates are swappable data keyed by event kind
//! and effective date; an accounting-rule update ships as a new version
//! with a later `effective_from`, never as a redeploy.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::TemplateId;

use crate::accounts;
use crate::error::PostingError;

/// Business event kinds the engine can post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Sale settled in cash at the counter
    CashSale,
    /// Sale on customer credit
    CreditSale,
    /// Goods received into the warehouse
    StockImport,
    /// Customer paying down their debt
    DebtPayment,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EventKind::CashSale => "cash_sale",
            EventKind::CreditSale => "credit_sale",
            EventKind::StockImport => "stock_import",
            EventKind::DebtPayment => "debt_payment",
        };
        write!(f, "{s}")
    }
}

/// Debit or credit side of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Debit,
    Credit,
}

impl Side {
    /// The opposite side, used by reversals
    pub fn flipped(&self) -> Side {
        match self {
            Side::Debit => Side::Credit,
            Side::Credit => Side::Debit,
        }
    }
}

/// Which event amount a line rule draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountSource {
    /// The event's principal amount (order total, import value, payment)
    Principal,
    /// The cost-of-goods amount; rules using it are skipped when the
    /// event carries no cost figure
    Cost,
}

/// One line-generation rule of a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRule {
    /// TT88 account code
    pub account_code: String,
    /// Debit or credit
    pub side: Side,
    /// Amount source
    pub amount: AmountSource,
}

impl LineRule {
    /// Convenience constructor
    pub fn new(account_code: impl Into<String>, side: Side, amount: AmountSource) -> Self {
        Self {
            account_code: account_code.into(),
            side,
            amount,
        }
    }
}

/// A versioned rule set for one event kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostingTemplate {
    /// Unique identifier
    pub id: TemplateId,
    /// Event kind this template covers
    pub kind: EventKind,
    /// Monotonic version within the kind
    pub version: u32,
    /// First date this version applies to
    pub effective_from: NaiveDate,
    /// Regulation reference or free-form description
    pub description: String,
    /// Line rules, expanded in order
    pub lines: Vec<LineRule>,
}

impl PostingTemplate {
    /// Creates a template
    pub fn new(
        kind: EventKind,
        version: u32,
        effective_from: NaiveDate,
        description: impl Into<String>,
        lines: Vec<LineRule>,
    ) -> Self {
        Self {
            id: TemplateId::new_v7(),
            kind,
            version,
            effective_from,
            description: description.into(),
            lines,
        }
    }
}

/// Lookup table of templates keyed by event kind and effective date
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: Vec<PostingTemplate>,
}

impl TemplateRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a template version
    pub fn register(&mut self, template: PostingTemplate) {
        self.templates.push(template);
    }

    /// Returns all registered templates
    pub fn templates(&self) -> &[PostingTemplate] {
        &self.templates
    }

    /// Finds the template active for a kind on a date: the highest
    /// `(effective_from, version)` with `effective_from <= date`
    ///
    /// # Errors
    ///
    /// Returns `TemplateNotFound` when nothing covers the kind/date
    pub fn active_for(
        &self,
        kind: EventKind,
        date: NaiveDate,
    ) -> Result<&PostingTemplate, PostingError> {
        self.templates
            .iter()
            .filter(|t| t.kind == kind && t.effective_from <= date)
            .max_by_key(|t| (t.effective_from, t.version))
            .ok_or(PostingError::TemplateNotFound {
                kind: kind.to_string(),
                date,
            })
    }

    /// The default TT88 template set covering all four event kinds
    ///
    /// Effective from 2022-01-01, when Circular 88/2021/TT-BTC took effect.
    pub fn tt88_defaults() -> Self {
        let effective = NaiveDate::from_ymd_opt(2022, 1, 1)
            .expect("static date");
        let mut registry = Self::new();

        registry.register(PostingTemplate::new(
            EventKind::CashSale,
            1,
            effective,
            "TT88 cash sale: cash in, revenue out, optional COGS legs",
            vec![
                LineRule::new(accounts::CASH, Side::Debit, AmountSource::Principal),
                LineRule::new(accounts::REVENUE, Side::Credit, AmountSource::Principal),
                LineRule::new(accounts::COST_OF_GOODS, Side::Debit, AmountSource::Cost),
                LineRule::new(accounts::INVENTORY, Side::Credit, AmountSource::Cost),
            ],
        ));

        registry.register(PostingTemplate::new(
            EventKind::CreditSale,
            1,
            effective,
            "TT88 credit sale: receivable in, revenue out, optional COGS legs",
            vec![
                LineRule::new(accounts::RECEIVABLES, Side::Debit, AmountSource::Principal),
                LineRule::new(accounts::REVENUE, Side::Credit, AmountSource::Principal),
                LineRule::new(accounts::COST_OF_GOODS, Side::Debit, AmountSource::Cost),
                LineRule::new(accounts::INVENTORY, Side::Credit, AmountSource::Cost),
            ],
        ));

        registry.register(PostingTemplate::new(
            EventKind::StockImport,
            1,
            effective,
            "TT88 stock import: inventory in, cash out",
            vec![
                LineRule::new(accounts::INVENTORY, Side::Debit, AmountSource::Principal),
                LineRule::new(accounts::CASH, Side::Credit, AmountSource::Principal),
            ],
        ));

        registry.register(PostingTemplate::new(
            EventKind::DebtPayment,
            1,
            effective,
            "TT88 debt payment: cash in, receivable cleared",
            vec![
                LineRule::new(accounts::CASH, Side::Debit, AmountSource::Principal),
                LineRule::new(accounts::RECEIVABLES, Side::Credit, AmountSource::Principal),
            ],
        ));

        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_active_for_picks_latest_effective() {
        let mut registry = TemplateRegistry::new();
        registry.register(PostingTemplate::new(
            EventKind::CashSale,
            1,
            d(2022, 1, 1),
            "v1",
            vec![],
        ));
        registry.register(PostingTemplate::new(
            EventKind::CashSale,
            2,
            d(2024, 7, 1),
            "v2",
            vec![],
        ));

        assert_eq!(
            registry.active_for(EventKind::CashSale, d(2023, 5, 1)).unwrap().version,
            1
        );
        assert_eq!(
            registry.active_for(EventKind::CashSale, d(2024, 7, 1)).unwrap().version,
            2
        );
    }

    #[test]
    fn test_no_template_before_effective_date() {
        let registry = TemplateRegistry::tt88_defaults();
        assert!(matches!(
            registry.active_for(EventKind::CashSale, d(2021, 6, 1)),
            Err(PostingError::TemplateNotFound { .. })
        ));
    }

    #[test]
    fn test_defaults_cover_all_kinds() {
        let registry = TemplateRegistry::tt88_defaults();
        let today = d(2025, 1, 1);
        for kind in [
            EventKind::CashSale,
            EventKind::CreditSale,
            EventKind::StockImport,
            EventKind::DebtPayment,
        ] {
            assert!(registry.active_for(kind, today).is_ok());
        }
    }
}
