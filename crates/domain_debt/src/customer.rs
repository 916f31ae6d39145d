//! Customer records tracked by the debt ledger

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{CustomerId, StoreId};

use crate::policy::CreditPolicy;

/// A customer of a store, as the debt ledger sees them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier
    pub id: CustomerId,
    /// Store the customer belongs to
    pub store_id: StoreId,
    /// Display name
    pub name: String,
    /// Contact phone
    pub phone: Option<String>,
    /// Credit policy applied to this customer
    pub credit_policy: CreditPolicy,
    /// Whether the customer can still buy on credit
    pub is_active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Creates an active customer with no credit limit
    pub fn new(store_id: StoreId, name: impl Into<String>) -> Self {
        Self {
            id: CustomerId::new_v7(),
            store_id,
            name: name.into(),
            phone: None,
            credit_policy: CreditPolicy::unlimited(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Sets the contact phone
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the credit policy
    pub fn with_credit_policy(mut self, policy: CreditPolicy) -> Self {
        self.credit_policy = policy;
        self
    }
}
