//! Delivery Interval Model

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Delivery interval entity (reference data, admin managed)
///
/// `time_from`/`time_to` is the delivery window shown to the customer;
/// `available_from`/`available_to` is the window during which the interval
/// may still be selected. All four are "HH:MM" strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryInterval {
    pub id: i64,
    pub name: String,
    pub time_from: String,
    pub time_to: String,
    pub available_from: String,
    pub available_to: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32,
}

fn default_true() -> bool {
    true
}

/// Delivery interval as exposed to the storefront, with availability
/// computed against the current time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliveryIntervalSlot {
    pub id: i64,
    pub name: String,
    pub time_from: String,
    pub time_to: String,
    #[serde(default)]
    pub is_available_now: bool,
}

impl DeliveryInterval {
    /// Whether the interval can be selected at `now`.
    ///
    /// Selection windows crossing midnight (from > to) wrap around.
    /// A malformed window makes the interval unavailable.
    pub fn is_available_at(&self, now: DateTime<Utc>) -> bool {
        let (Ok(from), Ok(to)) = (
            NaiveTime::parse_from_str(&self.available_from, "%H:%M"),
            NaiveTime::parse_from_str(&self.available_to, "%H:%M"),
        ) else {
            return false;
        };
        let current = now.time();
        if from <= to {
            from <= current && current <= to
        } else {
            current >= from || current <= to
        }
    }

    /// Storefront view of this interval, availability computed at `now`.
    pub fn to_slot(&self, now: DateTime<Utc>) -> DeliveryIntervalSlot {
        DeliveryIntervalSlot {
            id: self.id,
            name: self.name.clone(),
            time_from: self.time_from.clone(),
            time_to: self.time_to.clone(),
            is_available_now: self.is_active && self.is_available_at(now),
        }
    }
}
