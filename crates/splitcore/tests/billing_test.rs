//! Distribution end to end: stored registry in, notifications and summary out.

mod common;

use common::{store_with_admin, temp_store, MockNotifier, ADMIN, STRANGER};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use splitcore::billing::{distribute, DeliveryOutcome};
use splitcore::registry::{admin_add_subscriber, register_self, set_link, set_price};
use splitcore::{AppError, RegistryStore};

async fn configure(store: &RegistryStore, price: &str, link: &str) {
    set_price(store, ADMIN, price).await.unwrap();
    set_link(store, ADMIN, link).await.unwrap();
}

#[tokio::test]
async fn test_distribution_proportional_shares() {
    let (_dir, store) = store_with_admin().await;
    configure(&store, "300", "https://pay.example").await;
    register_self(&store, 1, "A", "1").await.unwrap();
    register_self(&store, 2, "B", "2").await.unwrap();
    register_self(&store, 3, "C", "3").await.unwrap();
    let notifier = MockNotifier::new();

    let summary = distribute(&store, ADMIN, &notifier).await.unwrap();

    assert_eq!(summary.delivered, 3);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.total_subs, 6);
    assert_eq!(summary.price_per_sub, dec!(50));

    let recipients: Vec<i64> = notifier.sent().iter().map(|(id, _)| *id).collect();
    assert_eq!(recipients, vec![1, 2, 3]);
    assert!(notifier.text_for(1).unwrap().contains("<b>50.00₽</b>"));
    assert!(notifier.text_for(2).unwrap().contains("<b>100.00₽</b>"));
    assert!(notifier.text_for(3).unwrap().contains("<b>150.00₽</b>"));
    assert!(notifier.text_for(3).unwrap().contains("https://pay.example"));
}

#[tokio::test]
async fn test_distribution_repeating_quotient() {
    let (_dir, store) = store_with_admin().await;
    configure(&store, "100", "https://pay").await;
    register_self(&store, 1, "Solo", "3").await.unwrap();
    let notifier = MockNotifier::new();

    let summary = distribute(&store, ADMIN, &notifier).await.unwrap();

    assert_eq!(summary.price_per_sub, dec!(33.33));
    assert!(notifier.text_for(1).unwrap().contains("<b>100.00₽</b>"));
}

#[tokio::test]
async fn test_distribution_continues_past_failed_recipient() {
    let (_dir, store) = store_with_admin().await;
    configure(&store, "90", "https://pay").await;
    for (id, subs) in [(1, "1"), (2, "1"), (3, "1")] {
        register_self(&store, id, "user", subs).await.unwrap();
    }
    let notifier = MockNotifier::blocking(&[2]);

    let summary = distribute(&store, ADMIN, &notifier).await.unwrap();

    assert_eq!(summary.delivered, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.outcomes.len(), 3);
    assert!(matches!(&summary.outcomes[1], DeliveryOutcome::Failed(e) if e.recipient == 2));
    assert_eq!(summary.outcomes[2], DeliveryOutcome::Delivered { recipient: 3 });
    assert!(notifier.text_for(3).is_some());
}

#[tokio::test]
async fn test_distribution_all_zero_counts() {
    let (_dir, store) = store_with_admin().await;
    configure(&store, "100", "https://pay").await;
    register_self(&store, 1, "A", "0").await.unwrap();
    register_self(&store, 2, "B", "0").await.unwrap();
    let notifier = MockNotifier::new();

    let err = distribute(&store, ADMIN, &notifier).await.unwrap_err();

    assert!(matches!(err, AppError::DegenerateTotal));
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_distribution_requires_price_and_link() {
    let (_dir, store) = store_with_admin().await;
    register_self(&store, 1, "A", "1").await.unwrap();
    let notifier = MockNotifier::new();

    // price 0, link empty
    assert!(matches!(
        distribute(&store, ADMIN, &notifier).await,
        Err(AppError::ConfigurationIncomplete)
    ));

    // link set, price still 0
    set_link(&store, ADMIN, "https://pay").await.unwrap();
    assert!(matches!(
        distribute(&store, ADMIN, &notifier).await,
        Err(AppError::ConfigurationIncomplete)
    ));

    // price set, link wiped by hand
    set_price(&store, ADMIN, "100").await.unwrap();
    store
        .update(|registry| {
            registry.settings.link.clear();
            Ok(())
        })
        .await
        .unwrap();
    assert!(matches!(
        distribute(&store, ADMIN, &notifier).await,
        Err(AppError::ConfigurationIncomplete)
    ));

    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_distribution_without_subscribers() {
    let (_dir, store) = store_with_admin().await;
    configure(&store, "100", "https://pay").await;

    let err = distribute(&store, ADMIN, &MockNotifier::new()).await.unwrap_err();
    assert!(matches!(err, AppError::NoSubscribers));
}

#[tokio::test]
async fn test_distribution_is_admin_only() {
    let (_dir, store) = store_with_admin().await;
    configure(&store, "100", "https://pay").await;
    register_self(&store, STRANGER, "Me", "1").await.unwrap();
    let notifier = MockNotifier::new();

    let err = distribute(&store, STRANGER, &notifier).await.unwrap_err();

    assert!(matches!(err, AppError::PermissionDenied));
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_distribution_on_fresh_store_is_denied() {
    let (_dir, store) = temp_store();
    let err = distribute(&store, ADMIN, &MockNotifier::new()).await.unwrap_err();
    assert!(matches!(err, AppError::PermissionDenied));
}

#[tokio::test]
async fn test_duplicate_admin_entries_are_both_billed() {
    let (_dir, store) = store_with_admin().await;
    configure(&store, "100", "https://pay").await;
    admin_add_subscriber(&store, ADMIN, 5, "Dup", 1).await.unwrap();
    admin_add_subscriber(&store, ADMIN, 5, "Dup", 1).await.unwrap();
    let notifier = MockNotifier::new();

    let summary = distribute(&store, ADMIN, &notifier).await.unwrap();

    assert_eq!(summary.total_subs, 2);
    assert_eq!(summary.delivered, 2);
    assert_eq!(notifier.sent().len(), 2);
}

#[tokio::test]
async fn test_distribution_does_not_modify_registry() {
    let (_dir, store) = store_with_admin().await;
    configure(&store, "100", "https://pay").await;
    register_self(&store, 1, "A", "2").await.unwrap();
    let before = store.load().await.unwrap();

    distribute(&store, ADMIN, &MockNotifier::new()).await.unwrap();

    assert_eq!(store.load().await.unwrap(), before);
}
