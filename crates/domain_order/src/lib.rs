//! Order Domain - Aggregate, lifecycle, and AI drafts
//!
//! An order reaches `Confirmed` only through the confirmation orchestrator;
//! this crate owns the state machine and the validation rules, not the
//! ledger effects.

pub mod draft;
pub mod error;
pub mod events;
pub mod item;
pub mod order;

pub use draft::{DraftItem, DraftOrder, DraftSource, DraftStatus};
pub use error::OrderError;
pub use events::OrderEvent;
pub use item::OrderItem;
pub use order::{order_number, FailureMarker, Order, OrderSource, OrderState};
