//! Posting domain errors

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur in the posting domain
#[derive(Debug, Error)]
pub enum PostingError {
    /// No template covers the event kind and date; fatal to confirmation
    #[error("No posting template for {kind} effective {date}")]
    TemplateNotFound { kind: String, date: NaiveDate },

    /// Expanded lines do not balance
    #[error("Unbalanced posting: debits={debits}, credits={credits}")]
    Unbalanced { debits: String, credits: String },

    /// Template expanded to no lines
    #[error("Template {0} expanded to an empty posting")]
    EmptyPosting(String),

    /// Posting not found in the journal
    #[error("Posting not found: {0}")]
    PostingNotFound(String),

    /// Posting was already reversed
    #[error("Posting already reversed: {0}")]
    AlreadyReversed(String),

    /// Money arithmetic failed
    #[error("Calculation error: {0}")]
    Calculation(String),
}
