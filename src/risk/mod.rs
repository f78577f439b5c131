// ============================================================================
// Risk Annotator - advisory badges for the confirmation desk
// ============================================================================
//
// Hints are shown next to an order and never gate a transition.
//
// ============================================================================

mod blacklist;

use serde::{Deserialize, Serialize};

use crate::domain::order::OrderAggregate;

pub use blacklist::{BlacklistProvider, PhoneBlacklist};

/// Orders strictly above this amount (DZD) get the high-value badge
pub const HIGH_VALUE_THRESHOLD: u64 = 8000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RiskHints {
    pub high_value: bool,
    pub blacklisted: bool,
}

pub fn annotate<B: BlacklistProvider + ?Sized>(order: &OrderAggregate, blacklist: &B) -> RiskHints {
    annotate_with_threshold(order, blacklist, HIGH_VALUE_THRESHOLD)
}

pub fn annotate_with_threshold<B: BlacklistProvider + ?Sized>(
    order: &OrderAggregate,
    blacklist: &B,
    high_value_threshold: u64,
) -> RiskHints {
    RiskHints {
        high_value: order.value > high_value_threshold,
        blacklisted: blacklist.contains(&order.phone),
    }
}
