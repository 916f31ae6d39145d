//! Core Kernel - Foundational types for the shop ledger engine
//!
//! This crate provides the fundamental building blocks used across all
//! domain modules:
//! - Money types with precise decimal arithmetic (VND-first)
//! - Reporting periods and grouping keys
//! - Strongly-typed identifiers and source references

pub mod identifiers;
pub mod money;
pub mod period;
pub mod source;

pub use identifiers::{
    CustomerId, DebtEntryId, DraftOrderId, EmployeeId, MovementId, OrderId, OrderItemId,
    PaymentId, PostingId, ProductId, ProductUnitId, StoreId, TemplateId,
};
pub use money::{Currency, Money, MoneyError};
pub use period::{PeriodGrouping, ReportPeriod};
pub use source::SourceRef;
