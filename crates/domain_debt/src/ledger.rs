//! Debt ledger
//!
//! Append-only entry log with a materialized per-customer balance; the
//! balance is updated in the same call that appends the entry.
//!
//! # Invariants
//!
//! - `balance(c) == Σ entry.amount` over all entries for `c`, at all times
//! - A hard credit limit is never exceeded by a recorded credit sale

use std::collections::HashMap;

use tracing::debug;

use core_kernel::{Currency, CustomerId, DebtEntryId, Money, SourceRef, StoreId};

use crate::customer::Customer;
use crate::entry::{DebtEntryKind, DebtLedgerEntry};
use crate::error::DebtError;
use crate::policy::CreditEnforcement;

/// Result of recording a credit sale
#[derive(Debug, Clone)]
pub struct CreditRecorded {
    /// The appended entry
    pub entry_id: DebtEntryId,
    /// Advisory-limit warning, when the policy is `Advisory` and breached
    pub warning: Option<String>,
}

/// Per-store debt ledger
#[derive(Debug, Clone)]
pub struct DebtLedger {
    store_id: StoreId,
    currency: Currency,
    customers: HashMap<CustomerId, Customer>,
    entries: Vec<DebtLedgerEntry>,
    balances: HashMap<CustomerId, Money>,
}

impl DebtLedger {
    /// Creates an empty ledger for a store
    pub fn new(store_id: StoreId, currency: Currency) -> Self {
        Self {
            store_id,
            currency,
            customers: HashMap::new(),
            entries: Vec::new(),
            balances: HashMap::new(),
        }
    }

    /// Registers a customer
    pub fn add_customer(&mut self, customer: Customer) {
        self.balances
            .entry(customer.id)
            .or_insert_with(|| Money::zero(self.currency));
        self.customers.insert(customer.id, customer);
    }

    /// Gets a customer by ID
    pub fn customer(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.get(&id)
    }

    /// Current outstanding balance of a customer
    ///
    /// # Errors
    ///
    /// Returns `CustomerNotFound` for unregistered customers
    pub fn balance(&self, customer_id: CustomerId) -> Result<Money, DebtError> {
        self.balances
            .get(&customer_id)
            .copied()
            .ok_or_else(|| DebtError::CustomerNotFound(customer_id.to_string()))
    }

    /// The full entry log, oldest first
    pub fn entries(&self) -> &[DebtLedgerEntry] {
        &self.entries
    }

    /// Checks whether a credit sale of `amount` would pass the customer's
    /// policy, without recording anything
    ///
    /// Also rejects non-positive amounts, so callers that check before
    /// writing see the same refusal `record_credit` would give.
    pub fn check_credit(
        &self,
        customer_id: CustomerId,
        amount: Money,
    ) -> Result<Option<String>, DebtError> {
        if !amount.is_positive() {
            return Err(DebtError::Validation(format!(
                "credit amount must be positive, got {amount}"
            )));
        }
        let customer = self
            .customers
            .get(&customer_id)
            .ok_or_else(|| DebtError::CustomerNotFound(customer_id.to_string()))?;
        let balance = self.balance(customer_id)?;
        let resulting = balance
            .checked_add(&amount)
            .map_err(|e| DebtError::Calculation(e.to_string()))?;

        if customer.credit_policy.breaches(resulting) {
            let limit = customer
                .credit_policy
                .limit
                .unwrap_or_else(|| Money::zero(self.currency));
            match customer.credit_policy.enforcement {
                CreditEnforcement::Hard => {
                    return Err(DebtError::CreditLimitExceeded {
                        customer: customer.name.clone(),
                        balance: balance.to_string(),
                        amount: amount.to_string(),
                        limit: limit.to_string(),
                    });
                }
                CreditEnforcement::Advisory => {
                    return Ok(Some(format!(
                        "credit limit {} exceeded for {} (balance {} + sale {})",
                        limit, customer.name, balance, amount
                    )));
                }
            }
        }
        Ok(None)
    }

    /// Records a credit sale, increasing the customer's balance
    ///
    /// # Errors
    ///
    /// - `Validation` if the amount is not positive
    /// - `CreditLimitExceeded` under a breached hard limit
    pub fn record_credit(
        &mut self,
        customer_id: CustomerId,
        amount: Money,
        source_ref: SourceRef,
    ) -> Result<CreditRecorded, DebtError> {
        let warning = self.check_credit(customer_id, amount)?;
        let entry_id =
            self.append(customer_id, amount, DebtEntryKind::CreditSale, source_ref)?;

        Ok(CreditRecorded { entry_id, warning })
    }

    /// Records a payment, reducing the customer's balance
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the amount is not positive
    pub fn record_payment(
        &mut self,
        customer_id: CustomerId,
        amount: Money,
        source_ref: SourceRef,
    ) -> Result<DebtEntryId, DebtError> {
        if !amount.is_positive() {
            return Err(DebtError::Validation(format!(
                "payment amount must be positive, got {amount}"
            )));
        }
        if !self.customers.contains_key(&customer_id) {
            return Err(DebtError::CustomerNotFound(customer_id.to_string()));
        }

        self.append(customer_id, -amount, DebtEntryKind::Payment, source_ref)
    }

    /// Records a compensating entry reversing an earlier credit sale
    pub fn record_reversal(
        &mut self,
        customer_id: CustomerId,
        amount: Money,
        source_ref: SourceRef,
    ) -> Result<DebtEntryId, DebtError> {
        if !amount.is_positive() {
            return Err(DebtError::Validation(format!(
                "reversal amount must be positive, got {amount}"
            )));
        }
        if !self.customers.contains_key(&customer_id) {
            return Err(DebtError::CustomerNotFound(customer_id.to_string()));
        }

        self.append(customer_id, -amount, DebtEntryKind::Reversal, source_ref)
    }

    /// Recomputes a customer's balance from the log
    ///
    /// Used by reconciliation checks; must always equal `balance`.
    pub fn recompute_balance(&self, customer_id: CustomerId) -> Money {
        self.entries
            .iter()
            .filter(|e| e.customer_id == customer_id)
            .fold(Money::zero(self.currency), |acc, e| acc + e.amount)
    }

    fn append(
        &mut self,
        customer_id: CustomerId,
        amount: Money,
        kind: DebtEntryKind,
        source_ref: SourceRef,
    ) -> Result<DebtEntryId, DebtError> {
        let entry = DebtLedgerEntry::new(self.store_id, customer_id, amount, kind, source_ref);
        let id = entry.id;

        let balance = self
            .balances
            .entry(customer_id)
            .or_insert_with(|| Money::zero(self.currency));
        *balance = balance
            .checked_add(&amount)
            .map_err(|e| DebtError::Calculation(e.to_string()))?;

        debug!(
            entry = %id,
            customer = %customer_id,
            amount = %amount,
            kind = ?kind,
            "debt entry appended"
        );
        self.entries.push(entry);
        Ok(id)
    }
}
