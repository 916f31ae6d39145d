//! TT88 chart of accounts
//!
//! Account codes follow the simplified chart small household businesses
//! book under Circular 88/2021/TT-BTC. Codes are data on templates, so a
//! revised circular ships as new template versions, not code changes.

/// Cash on hand (tien mat)
pub const CASH: &str = "111";

/// Trade receivables (phai thu khach hang)
pub const RECEIVABLES: &str = "131";

/// Merchandise inventory (hang hoa)
pub const INVENTORY: &str = "156";

/// Sales revenue (doanh thu ban hang)
pub const REVENUE: &str = "511";

/// Cost of goods sold (gia von hang ban)
pub const COST_OF_GOODS: &str = "632";
