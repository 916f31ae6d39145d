//! Business events and immutable postings

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Money, PostingId, SourceRef, TemplateId};

use crate::template::{EventKind, Side};

/// A confirmed business event the engine derives postings from
#[derive(Debug, Clone)]
pub struct BusinessEvent {
    /// Event kind, selects the template
    pub kind: EventKind,
    /// Document that raised the event
    pub source_ref: SourceRef,
    /// Accounting date of the event
    pub occurred_on: NaiveDate,
    /// Principal amount (order total, import value, payment amount)
    pub amount: Money,
    /// Cost-of-goods amount, when known
    pub cost_amount: Option<Money>,
    /// Narration carried onto the posting
    pub description: String,
}

impl BusinessEvent {
    /// Creates an event without a cost figure
    pub fn new(
        kind: EventKind,
        source_ref: SourceRef,
        occurred_on: NaiveDate,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            source_ref,
            occurred_on,
            amount,
            cost_amount: None,
            description: description.into(),
        }
    }

    /// Attaches the cost-of-goods amount
    pub fn with_cost(mut self, cost: Money) -> Self {
        self.cost_amount = Some(cost);
        self
    }
}

/// One expanded line of a posting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingLine {
    /// TT88 account code
    pub account_code: String,
    /// Debit or credit
    pub side: Side,
    /// Always positive; the side carries the direction
    pub amount: Money,
}

impl PostingLine {
    /// Signed contribution of the line: debits positive, credits negative
    pub fn signed_amount(&self) -> Decimal {
        match self.side {
            Side::Debit => self.amount.amount(),
            Side::Credit => -self.amount.amount(),
        }
    }
}

/// An immutable audit-grade accounting entry
///
/// Once appended to the journal a posting is never edited; corrections
/// are new postings whose lines negate the original, linked both ways.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerPosting {
    /// Unique identifier
    pub id: PostingId,
    /// Event kind the posting was derived from
    pub kind: EventKind,
    /// Document that raised the underlying event
    pub event_ref: SourceRef,
    /// Template that produced the lines
    pub template_id: TemplateId,
    /// Template version, for audit
    pub template_version: u32,
    /// Expanded lines, in template order
    pub lines: Vec<PostingLine>,
    /// Narration
    pub description: String,
    /// Accounting date
    pub posted_on: NaiveDate,
    /// Posting this one reverses, if it is a reversal
    pub reverses: Option<PostingId>,
    /// Reversal that voided this posting, if any
    pub reversed_by: Option<PostingId>,
    /// When the posting was appended
    pub created_at: DateTime<Utc>,
}

impl LedgerPosting {
    /// Total of the debit lines
    pub fn debit_total(&self) -> Decimal {
        self.lines
            .iter()
            .filter(|l| l.side == Side::Debit)
            .map(|l| l.amount.amount())
            .sum()
    }

    /// Total of the credit lines
    pub fn credit_total(&self) -> Decimal {
        self.lines
            .iter()
            .filter(|l| l.side == Side::Credit)
            .map(|l| l.amount.amount())
            .sum()
    }

    /// True while no reversal voids this posting
    pub fn is_active(&self) -> bool {
        self.reversed_by.is_none()
    }
}
