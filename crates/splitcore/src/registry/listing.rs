use super::ensure_admin;
use crate::core::error::AppResult;
use crate::storage::{RegistryStore, Subscriber};

/// Snapshot of the subscriber list for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriberListing {
    Empty,
    Entries(Vec<Subscriber>),
}

impl SubscriberListing {
    /// One formatted line per entry. Each call starts a fresh pass.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        let entries: &[Subscriber] = match self {
            SubscriberListing::Empty => &[],
            SubscriberListing::Entries(entries) => entries,
        };
        entries.iter().map(format_line)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SubscriberListing::Empty)
    }

    /// Full reply text for the /list command.
    pub fn render(&self) -> String {
        if self.is_empty() {
            return "Список пуст.".to_string();
        }
        let mut text = String::from("📋 Подписчики:\n");
        for line in self.lines() {
            text.push_str(&line);
            text.push('\n');
        }
        text
    }
}

fn format_line(subscriber: &Subscriber) -> String {
    format!("{} — {} подписок (ID {})", subscriber.name, subscriber.subs, subscriber.id)
}

/// Lists all subscribers. Admin only.
pub async fn list_subscribers(store: &RegistryStore, caller: i64) -> AppResult<SubscriberListing> {
    let registry = store.load().await?;
    ensure_admin(&registry, caller)?;

    if registry.subscribers.is_empty() {
        Ok(SubscriberListing::Empty)
    } else {
        Ok(SubscriberListing::Entries(registry.subscribers))
    }
}
