//! Price and payment link

use rust_decimal::Decimal;

use super::ensure_admin;
use crate::core::error::{AppError, AppResult};
use crate::storage::RegistryStore;

/// Parses a total price: a whole, non-negative number.
pub fn parse_price(raw: &str) -> AppResult<Decimal> {
    let trimmed = raw.trim();
    let value = trimmed
        .parse::<i64>()
        .map_err(|_| AppError::Validation(format!("«{}» — цена должна быть целым числом", trimmed)))?;
    if value < 0 {
        return Err(AppError::Validation("цена не может быть отрицательной".to_string()));
    }
    Ok(Decimal::from(value))
}

/// Overwrites the total price. Admin only.
pub async fn set_price(store: &RegistryStore, caller: i64, raw: &str) -> AppResult<Decimal> {
    let price = parse_price(raw)?;

    store
        .update(|registry| {
            ensure_admin(registry, caller)?;
            registry.settings.price = price;
            Ok(())
        })
        .await?;

    log::info!("Admin {} set price to {}", caller, price);
    Ok(price)
}

/// Overwrites the payment link. Admin only; the link must not be blank.
pub async fn set_link(store: &RegistryStore, caller: i64, raw: &str) -> AppResult<String> {
    let link = raw.trim().to_string();
    if link.is_empty() {
        return Err(AppError::Validation("ссылка не может быть пустой".to_string()));
    }

    let stored = link.clone();
    store
        .update(move |registry| {
            ensure_admin(registry, caller)?;
            registry.settings.link = stored;
            Ok(())
        })
        .await?;

    log::info!("Admin {} set payment link to {}", caller, link);
    Ok(link)
}
