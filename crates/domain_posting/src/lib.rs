//! Posting Domain - Statutory accounting entries
//!
//! Derives immutable, balanced postings from confirmed business events
//! using versioned templates aligned with Circular 88/2021/TT-BTC.
//! Regulatory changes arrive as new template versions keyed by effective
//! date; history is corrected only through linked reversals.

pub mod accounts;
pub mod engine;
pub mod error;
pub mod posting;
pub mod template;

pub use engine::PostingEngine;
pub use error::PostingError;
pub use posting::{BusinessEvent, LedgerPosting, PostingLine};
pub use template::{
    AmountSource, EventKind, LineRule, PostingTemplate, Side, TemplateRegistry,
};
