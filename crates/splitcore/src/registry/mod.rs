//! Registry operations: subscriber registration, settings, listing.
//!
//! Every function takes the store explicitly, reads the registry fresh and
//! performs admin checks against the admin set loaded in the same critical
//! section as the mutation.

pub mod admins;
pub mod listing;
pub mod registration;
pub mod settings;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::error::{AppError, AppResult};
use crate::storage::Registry;

pub use admins::{grant_admins, revoke_admin};
pub use listing::{list_subscribers, SubscriberListing};
pub use registration::{admin_add_subscriber, admin_remove_subscriber, is_registered, register_self, Registration};
pub use settings::{parse_price, set_link, set_price};

#[allow(clippy::expect_used)]
static DIGITS_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("Failed to compile digits regex"));

/// Parses a subscription count typed by a user: digits only, fits in `u32`.
pub fn parse_count(raw: &str) -> AppResult<u32> {
    let trimmed = raw.trim();
    if !DIGITS_ONLY.is_match(trimmed) {
        return Err(AppError::Validation(format!("«{}» — не число", trimmed)));
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| AppError::Validation(format!("{} — слишком большое число", trimmed)))
}

/// Parses a Telegram user id.
pub fn parse_user_id(raw: &str) -> AppResult<i64> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| AppError::Validation(format!("«{}» — не похоже на ID пользователя", trimmed)))
}

/// Rejects callers that are not in the admin set.
pub(crate) fn ensure_admin(registry: &Registry, caller: i64) -> AppResult<()> {
    if registry.is_admin(caller) {
        Ok(())
    } else {
        log::warn!("User {} tried an admin operation without rights", caller);
        Err(AppError::PermissionDenied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count_accepts_digits() {
        assert_eq!(parse_count("0").unwrap(), 0);
        assert_eq!(parse_count(" 12 ").unwrap(), 12);
    }

    #[test]
    fn test_parse_count_rejects_everything_else() {
        for raw in ["", "-1", "+3", "1.5", "три", "4 5", "٣", "99999999999"] {
            assert!(
                matches!(parse_count(raw), Err(AppError::Validation(_))),
                "{:?} must be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("123456789").unwrap(), 123456789);
        assert_eq!(parse_user_id("-100200").unwrap(), -100200);
        assert!(parse_user_id("abc").is_err());
    }
}
