//! Proportional billing: share computation and best-effort delivery

pub mod calculator;
pub mod distribution;
pub mod notifier;

pub use calculator::{compute_shares, BillingPlan, Share, SHARE_DECIMALS};
pub use distribution::{deliver_plan, distribute, notification_text, DeliveryOutcome, DistributionSummary};
pub use notifier::{DeliveryError, Notifier};
