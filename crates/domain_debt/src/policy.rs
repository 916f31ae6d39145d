//! Credit-limit policy
//!
//! Whether a limit blocks or merely warns is configuration, not code: the
//! same ledger serves shops that refuse further credit outright and shops
//! where the owner overrides the warning at the counter.

use serde::{Deserialize, Serialize};

use core_kernel::Money;

/// How a breached limit is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditEnforcement {
    /// Breach fails the sale with `CreditLimitExceeded`
    Hard,
    /// Breach is recorded as a warning and the sale proceeds
    Advisory,
}

/// Per-customer credit policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditPolicy {
    /// Maximum outstanding balance; `None` means unlimited
    pub limit: Option<Money>,
    /// Hard block or advisory warning
    pub enforcement: CreditEnforcement,
}

impl CreditPolicy {
    /// No limit configured
    pub fn unlimited() -> Self {
        Self {
            limit: None,
            enforcement: CreditEnforcement::Hard,
        }
    }

    /// A hard limit
    pub fn hard_limit(limit: Money) -> Self {
        Self {
            limit: Some(limit),
            enforcement: CreditEnforcement::Hard,
        }
    }

    /// An advisory limit
    pub fn advisory_limit(limit: Money) -> Self {
        Self {
            limit: Some(limit),
            enforcement: CreditEnforcement::Advisory,
        }
    }

    /// Returns true if a resulting balance would breach the limit
    pub fn breaches(&self, resulting_balance: Money) -> bool {
        match self.limit {
            // A zero limit also means "no limit" for imported legacy data.
            Some(limit) if !limit.is_zero() => resulting_balance > limit,
            _ => false,
        }
    }
}

impl Default for CreditPolicy {
    fn default() -> Self {
        Self::unlimited()
    }
}
