//! Proportional allocation of the total price across subscription counts.

use rust_decimal::Decimal;

use crate::core::error::{AppError, AppResult};
use crate::storage::{Registry, Subscriber};

/// Decimal places every share is rounded to.
pub const SHARE_DECIMALS: u32 = 2;

/// One subscriber's part of the bill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
    pub subscriber: Subscriber,
    /// `price_per_sub * subs`, rounded half-to-even to two decimals
    pub amount: Decimal,
}

/// Everything needed to notify subscribers, computed without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingPlan {
    pub price: Decimal,
    pub link: String,
    pub total_subs: u64,
    /// Exact quotient, not rounded
    pub price_per_sub: Decimal,
    pub shares: Vec<Share>,
}

impl BillingPlan {
    /// Per-subscription price as shown to the admin.
    pub fn price_per_sub_rounded(&self) -> Decimal {
        self.price_per_sub.round_dp(SHARE_DECIMALS)
    }
}

/// Computes every subscriber's share.
///
/// Fails with `ConfigurationIncomplete` when price is zero or the link is
/// empty, `NoSubscribers` when the list is empty and `DegenerateTotal` when all
/// counts are zero. Rounded shares are not adjusted to add up to the price.
pub fn compute_shares(registry: &Registry) -> AppResult<BillingPlan> {
    let settings = &registry.settings;
    if settings.price.is_zero() || settings.link.trim().is_empty() {
        return Err(AppError::ConfigurationIncomplete);
    }
    if registry.subscribers.is_empty() {
        return Err(AppError::NoSubscribers);
    }

    let total_subs: u64 = registry.subscribers.iter().map(|s| u64::from(s.subs)).sum();
    if total_subs == 0 {
        return Err(AppError::DegenerateTotal);
    }

    let price_per_sub = settings.price / Decimal::from(total_subs);

    let shares = registry
        .subscribers
        .iter()
        .map(|subscriber| Share {
            subscriber: subscriber.clone(),
            amount: (price_per_sub * Decimal::from(subscriber.subs)).round_dp(SHARE_DECIMALS),
        })
        .collect();

    Ok(BillingPlan {
        price: settings.price,
        link: settings.link.clone(),
        total_subs,
        price_per_sub,
        shares,
    })
}
