//! Sends every subscriber their share and tallies the results.

use rust_decimal::Decimal;

use super::calculator::{compute_shares, BillingPlan, Share};
use super::notifier::{DeliveryError, Notifier};
use crate::core::error::AppResult;
use crate::registry::ensure_admin;
use crate::storage::RegistryStore;

/// Result of one notification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered { recipient: i64 },
    Failed(DeliveryError),
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered { .. })
    }
}

/// What the admin gets back after `/send_pay`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionSummary {
    pub delivered: usize,
    pub failed: usize,
    pub total_subs: u64,
    /// Rounded to two decimals
    pub price_per_sub: Decimal,
    pub outcomes: Vec<DeliveryOutcome>,
}

impl DistributionSummary {
    fn from_outcomes(plan: &BillingPlan, outcomes: Vec<DeliveryOutcome>) -> Self {
        let delivered = outcomes.iter().filter(|o| o.is_delivered()).count();
        Self {
            delivered,
            failed: outcomes.len() - delivered,
            total_subs: plan.total_subs,
            price_per_sub: plan.price_per_sub_rounded(),
            outcomes,
        }
    }

    /// Reply text for the admin.
    pub fn render(&self) -> String {
        let mut text = format!(
            "✅ Сообщения отправлены {} подписчикам\n\nВсего подписок: {}\nЦена одной подписки: {:.2}₽",
            self.delivered, self.total_subs, self.price_per_sub
        );
        if self.failed > 0 {
            text.push_str(&format!("\nНе доставлено: {}", self.failed));
        }
        text
    }
}

/// Minimal escaping for Telegram's HTML parse mode.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Personal payment request for one subscriber.
pub fn notification_text(plan: &BillingPlan, share: &Share) -> String {
    format!(
        "💸 Привет, {}!\n\n\
         Общая сумма сервера в этом месяце: {}₽\n\
         Твоя доля ({} подписок): <b>{:.2}₽</b>\n\
         Ссылка на оплату: {}",
        escape_html(&share.subscriber.name),
        plan.price,
        share.subscriber.subs,
        share.amount,
        escape_html(&plan.link),
    )
}

/// Notifies each share holder of a computed plan. Never stops early.
pub async fn deliver_plan(plan: &BillingPlan, notifier: &dyn Notifier) -> DistributionSummary {
    let mut outcomes = Vec::with_capacity(plan.shares.len());

    for share in &plan.shares {
        let recipient = share.subscriber.id;
        let text = notification_text(plan, share);
        match notifier.notify(recipient, &text).await {
            Ok(()) => {
                log::debug!("Delivered share {} to {}", share.amount, recipient);
                outcomes.push(DeliveryOutcome::Delivered { recipient });
            }
            Err(e) => {
                log::warn!("Could not deliver share to {}: {}", recipient, e.reason);
                outcomes.push(DeliveryOutcome::Failed(e));
            }
        }
    }

    DistributionSummary::from_outcomes(plan, outcomes)
}

/// Admin-only: compute every share from the stored registry and send it.
///
/// Does not modify the registry.
pub async fn distribute(store: &RegistryStore, caller: i64, notifier: &dyn Notifier) -> AppResult<DistributionSummary> {
    let registry = store.load().await?;
    ensure_admin(&registry, caller)?;

    let plan = compute_shares(&registry)?;
    log::info!(
        "Admin {} started distribution: price {}, {} subscribers, {} subscriptions",
        caller,
        plan.price,
        plan.shares.len(),
        plan.total_subs
    );

    let summary = deliver_plan(&plan, notifier).await;
    log::info!(
        "Distribution finished: {} delivered, {} failed",
        summary.delivered,
        summary.failed
    );
    Ok(summary)
}
