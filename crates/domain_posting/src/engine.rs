//! Posting engine
//!
//! Expands business events through the active template into balanced,
//! immutable postings. Expansion (`prepare`) is pure so callers can
//! validate a whole unit of work before committing anything; `commit`
//! appends the validated posting to the journal.

use chrono::Utc;
use tracing::{debug, info};

use core_kernel::{PostingId, SourceRef};

use crate::error::PostingError;
use crate::posting::{BusinessEvent, LedgerPosting, PostingLine};
use crate::template::{AmountSource, TemplateRegistry};

/// The posting journal and its template registry
#[derive(Debug, Clone)]
pub struct PostingEngine {
    registry: TemplateRegistry,
    journal: Vec<LedgerPosting>,
}

impl PostingEngine {
    /// Creates an engine with the given template registry
    pub fn new(registry: TemplateRegistry) -> Self {
        Self {
            registry,
            journal: Vec::new(),
        }
    }

    /// Creates an engine preloaded with the TT88 default templates
    pub fn with_tt88_defaults() -> Self {
        Self::new(TemplateRegistry::tt88_defaults())
    }

    /// Returns the template registry
    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Registers an additional template version
    pub fn register_template(&mut self, template: crate::template::PostingTemplate) {
        self.registry.register(template);
    }

    /// The full journal, oldest first
    pub fn postings(&self) -> &[LedgerPosting] {
        &self.journal
    }

    /// Looks up a posting by ID
    pub fn posting(&self, id: PostingId) -> Option<&LedgerPosting> {
        self.journal.iter().find(|p| p.id == id)
    }

    /// Expands an event into a posting without appending it
    ///
    /// # Errors
    ///
    /// - `TemplateNotFound` if no template covers the kind/date
    /// - `EmptyPosting` if every rule was skipped
    /// - `Unbalanced` if debits differ from credits after expansion
    pub fn prepare(&self, event: &BusinessEvent) -> Result<LedgerPosting, PostingError> {
        let template = self.registry.active_for(event.kind, event.occurred_on)?;

        let mut lines = Vec::with_capacity(template.lines.len());
        for rule in &template.lines {
            let amount = match rule.amount {
                AmountSource::Principal => event.amount,
                AmountSource::Cost => match event.cost_amount {
                    Some(cost) => cost,
                    // No cost figure: the COGS legs are simply omitted.
                    None => continue,
                },
            };
            lines.push(PostingLine {
                account_code: rule.account_code.clone(),
                side: rule.side,
                amount: amount.abs(),
            });
        }

        if lines.is_empty() {
            return Err(PostingError::EmptyPosting(template.id.to_string()));
        }

        let posting = LedgerPosting {
            id: PostingId::new_v7(),
            kind: event.kind,
            event_ref: event.source_ref,
            template_id: template.id,
            template_version: template.version,
            lines,
            description: event.description.clone(),
            posted_on: event.occurred_on,
            reverses: None,
            reversed_by: None,
            created_at: Utc::now(),
        };

        Self::ensure_balanced(&posting)?;
        Ok(posting)
    }

    /// Appends a prepared posting to the journal
    ///
    /// # Errors
    ///
    /// Re-verifies balance; a caller cannot commit a doctored posting
    pub fn commit(&mut self, posting: LedgerPosting) -> Result<PostingId, PostingError> {
        Self::ensure_balanced(&posting)?;
        let id = posting.id;
        debug!(posting = %id, kind = %posting.kind, "posting appended");
        self.journal.push(posting);
        Ok(id)
    }

    /// Expands and appends in one step
    pub fn post(&mut self, event: &BusinessEvent) -> Result<PostingId, PostingError> {
        let posting = self.prepare(event)?;
        self.commit(posting)
    }

    /// Reverses a posting: a new posting with every line's side flipped,
    /// linked to the original both ways
    ///
    /// # Errors
    ///
    /// - `PostingNotFound` if the ID is unknown
    /// - `AlreadyReversed` if a reversal already voids it
    pub fn reverse(
        &mut self,
        posting_id: PostingId,
        reason: &str,
    ) -> Result<PostingId, PostingError> {
        let original = self
            .journal
            .iter()
            .find(|p| p.id == posting_id)
            .ok_or_else(|| PostingError::PostingNotFound(posting_id.to_string()))?;

        if original.reversed_by.is_some() {
            return Err(PostingError::AlreadyReversed(posting_id.to_string()));
        }

        let reversal = LedgerPosting {
            id: PostingId::new_v7(),
            kind: original.kind,
            event_ref: SourceRef::ReversalOf(posting_id),
            template_id: original.template_id,
            template_version: original.template_version,
            lines: original
                .lines
                .iter()
                .map(|l| PostingLine {
                    account_code: l.account_code.clone(),
                    side: l.side.flipped(),
                    amount: l.amount,
                })
                .collect(),
            description: format!("Reversal of {posting_id}: {reason}"),
            posted_on: original.posted_on,
            reverses: Some(posting_id),
            reversed_by: None,
            created_at: Utc::now(),
        };
        let reversal_id = reversal.id;

        self.journal.push(reversal);
        // Link the original; its lines stay untouched.
        if let Some(original) = self.journal.iter_mut().find(|p| p.id == posting_id) {
            original.reversed_by = Some(reversal_id);
        }

        info!(original = %posting_id, reversal = %reversal_id, reason, "posting reversed");
        Ok(reversal_id)
    }

    fn ensure_balanced(posting: &LedgerPosting) -> Result<(), PostingError> {
        let debits = posting.debit_total();
        let credits = posting.credit_total();
        if debits != credits {
            return Err(PostingError::Unbalanced {
                debits: debits.to_string(),
                credits: credits.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{EventKind, Side};
    use chrono::NaiveDate;
    use core_kernel::{Money, OrderId};
    use rust_decimal_macros::dec;

    fn sale_event(kind: EventKind) -> BusinessEvent {
        BusinessEvent::new(
            kind,
            SourceRef::Order(OrderId::new()),
            NaiveDate::from_ymd_opt(2025, 3, 8).unwrap(),
            Money::vnd(dec!(425000)),
            "5 bao xi mang",
        )
    }

    #[test]
    fn test_cash_sale_balances() {
        let mut engine = PostingEngine::with_tt88_defaults();
        let id = engine.post(&sale_event(EventKind::CashSale)).unwrap();

        let posting = engine.posting(id).unwrap();
        assert_eq!(posting.debit_total(), posting.credit_total());
        assert_eq!(posting.lines.len(), 2);
    }

    #[test]
    fn test_cost_legs_included_when_known() {
        let mut engine = PostingEngine::with_tt88_defaults();
        let event = sale_event(EventKind::CreditSale).with_cost(Money::vnd(dec!(350000)));
        let id = engine.post(&event).unwrap();

        let posting = engine.posting(id).unwrap();
        assert_eq!(posting.lines.len(), 4);
        assert_eq!(posting.debit_total(), posting.credit_total());
    }

    #[test]
    fn test_missing_template_is_fatal() {
        let engine = PostingEngine::new(TemplateRegistry::new());
        let err = engine.prepare(&sale_event(EventKind::CashSale));
        assert!(matches!(err, Err(PostingError::TemplateNotFound { .. })));
    }

    #[test]
    fn test_reversal_negates_and_links() {
        let mut engine = PostingEngine::with_tt88_defaults();
        let id = engine.post(&sale_event(EventKind::CashSale)).unwrap();
        let reversal_id = engine.reverse(id, "mispriced").unwrap();

        let original = engine.posting(id).unwrap();
        let reversal = engine.posting(reversal_id).unwrap();

        assert_eq!(original.reversed_by, Some(reversal_id));
        assert_eq!(reversal.reverses, Some(id));
        assert!(!original.is_active());

        // Line-by-line arithmetic negation.
        let net: rust_decimal::Decimal = original
            .lines
            .iter()
            .chain(reversal.lines.iter())
            .map(|l| l.signed_amount())
            .sum();
        assert_eq!(net, dec!(0));
    }

    #[test]
    fn test_double_reversal_rejected() {
        let mut engine = PostingEngine::with_tt88_defaults();
        let id = engine.post(&sale_event(EventKind::CashSale)).unwrap();
        engine.reverse(id, "first").unwrap();
        assert!(matches!(
            engine.reverse(id, "second"),
            Err(PostingError::AlreadyReversed(_))
        ));
    }
}
