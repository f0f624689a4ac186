//! Promo Code Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Promo code entity
///
/// Exactly one of `discount_percent`/`discount_fixed` is expected to be
/// set; when both are present the percentage wins. Evaluation against a
/// cart lives in the pricing module of the engine crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromoCode {
    pub id: i64,
    /// Stored upper-cased; lookups normalize the submitted code
    pub code: String,
    pub description: Option<String>,
    pub discount_percent: Option<f64>,
    pub discount_fixed: Option<f64>,
    /// Minimum cart subtotal for this code (separate from the store gate)
    pub min_order_amount: Option<f64>,
    pub max_uses: Option<u32>,
    #[serde(default)]
    pub current_uses: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl PromoCode {
    /// Whether the usage budget is exhausted.
    pub fn is_exhausted(&self) -> bool {
        self.max_uses.is_some_and(|max| self.current_uses >= max)
    }
}
