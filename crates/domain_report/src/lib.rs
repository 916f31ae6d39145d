//! Report Domain - Derived period summaries
//!
//! The aggregator is a pure read side: it derives revenue, sales, debt,
//! and stock figures from the ledgers' outbound streams and never mutates
//! source data. Summaries are recomputable at any time; caching one is an
//! optimization, never a correctness dependency.

pub mod summary;

pub use summary::{summarize, ProductSales, ReportInputs, ReportPeriodSummary, RevenueBucket};
