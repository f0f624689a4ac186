//! Store Settings Model

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Store-wide settings (singleton, refreshed on each load)
///
/// All thresholds are optional on the backing store; a missing or
/// unparseable value is treated as 0, which disables the corresponding
/// rule (no minimum, no delivery fee, no free-delivery threshold).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StoreSettings {
    /// Minimum cart subtotal required to check out; 0 disables the gate
    #[serde(default)]
    pub min_order_amount: f64,
    /// Cart subtotal from which delivery is free; 0 disables the threshold
    #[serde(default)]
    pub free_delivery_from: f64,
    /// Flat delivery fee charged below the free-delivery threshold
    #[serde(default)]
    pub delivery_cost: f64,
}

impl StoreSettings {
    /// Build settings from the backing store's key/value table.
    ///
    /// Unknown keys are ignored; missing or unparseable values become 0.
    pub fn from_kv(kv: &HashMap<String, String>) -> Self {
        let parse = |key: &str| -> f64 {
            kv.get(key)
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|v| v.is_finite())
                .unwrap_or(0.0)
        };
        Self {
            min_order_amount: parse("min_order_amount"),
            free_delivery_from: parse("free_delivery_from"),
            delivery_cost: parse("delivery_cost"),
        }
    }
}
