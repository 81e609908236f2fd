//! Persisted registry shape: admins, subscribers, settings.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// A chat user who shares the bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
    /// Telegram user id, also the chat id for private notifications
    pub id: i64,
    /// Display name as reported by Telegram or typed by an admin
    pub name: String,
    /// Number of subscriptions this user holds
    #[serde(deserialize_with = "lenient_count")]
    pub subs: u32,
}

impl Subscriber {
    pub fn new(id: i64, name: impl Into<String>, subs: u32) -> Self {
        Self {
            id,
            name: name.into(),
            subs,
        }
    }
}

/// Global billing settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Total amount to distribute
    #[serde(default, with = "price_format")]
    pub price: Decimal,
    /// Payment destination, empty until an admin sets it
    #[serde(default)]
    pub link: String,
}

/// Everything the bot persists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    #[serde(default)]
    pub admins: BTreeSet<i64>,
    #[serde(default)]
    pub subscribers: Vec<Subscriber>,
    #[serde(default)]
    pub settings: Settings,
}

impl Registry {
    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admins.contains(&user_id)
    }

    pub fn find_subscriber_mut(&mut self, user_id: i64) -> Option<&mut Subscriber> {
        self.subscribers.iter_mut().find(|s| s.id == user_id)
    }

    pub fn has_subscriber(&self, user_id: i64) -> bool {
        self.subscribers.iter().any(|s| s.id == user_id)
    }
}

/// Older data files may hold negative counts typed in by an admin. They are
/// read as 0 so the file still loads and the entry can be fixed or removed.
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    let clamped = u32::try_from(raw.max(0)).unwrap_or(u32::MAX);
    if i64::from(clamped) != raw {
        log::warn!("Subscription count {} out of range, read as {}", raw, clamped);
    }
    Ok(clamped)
}

/// Whole prices are written as JSON integers, fractional ones as floats.
/// Both forms (and numeric strings) are accepted on read.
mod price_format {
    use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
    use rust_decimal::Decimal;
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;
    use std::str::FromStr;

    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if value.fract().is_zero() {
            if let Some(whole) = value.to_i64() {
                return serializer.serialize_i64(whole);
            }
        }
        match value.to_f64() {
            Some(float) => serializer.serialize_f64(float),
            None => serializer.serialize_str(&value.to_string()),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(PriceVisitor)
    }

    struct PriceVisitor;

    impl<'de> Visitor<'de> for PriceVisitor {
        type Value = Decimal;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a number or a numeric string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Decimal, E> {
            Ok(Decimal::from(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Decimal, E> {
            Ok(Decimal::from(v))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Decimal, E> {
            Decimal::from_f64(v).ok_or_else(|| E::custom(format!("price {} is out of range", v)))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Decimal, E> {
            Decimal::from_str(v.trim()).map_err(E::custom)
        }
    }
}
