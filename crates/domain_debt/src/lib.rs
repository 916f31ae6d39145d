//! Debt Domain - Customer credit ledger
//!
//! Outstanding balances are materialized sums over an append-only entry
//! log: credit sales positive, payments negative. Credit limits are
//! policy data per customer, either hard blocks or advisory warnings.

pub mod customer;
pub mod entry;
pub mod error;
pub mod ledger;
pub mod policy;

pub use customer::Customer;
pub use entry::{DebtEntryKind, DebtLedgerEntry};
pub use error::DebtError;
pub use ledger::{CreditRecorded, DebtLedger};
pub use policy::{CreditEnforcement, CreditPolicy};
