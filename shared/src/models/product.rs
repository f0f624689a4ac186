//! Product Model

use crate::order::UnitType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product badge shown on catalog cards
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BadgeType {
    Hit,
    Sale,
    Recommend,
}

/// Product entity
///
/// A product carries one price per selling unit; a unit with no price is
/// not sellable in that unit. Discount fields affect the displayed price
/// only (see the catalog index), never the stored per-unit prices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    /// Category reference
    pub category_id: i64,
    pub name: String,
    pub description: Option<String>,

    // Per-unit prices
    pub price_kg: Option<f64>,
    pub price_piece: Option<f64>,
    pub price_package: Option<f64>,
    pub price_box: Option<f64>,

    /// Unit preselected in the storefront
    #[serde(default)]
    pub default_unit: UnitType,

    // Display discounts
    pub discount_percent: Option<f64>,
    pub discount_fixed: Option<f64>,
    pub old_price: Option<f64>,

    pub badge: Option<BadgeType>,

    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl Default for Product {
    fn default() -> Self {
        Self {
            id: 0,
            category_id: 0,
            name: String::new(),
            description: None,
            price_kg: None,
            price_piece: None,
            price_package: None,
            price_box: None,
            default_unit: UnitType::default(),
            discount_percent: None,
            discount_fixed: None,
            old_price: None,
            badge: None,
            is_available: true,
            is_active: true,
            sort_order: 0,
            created_at: None,
            updated_at: None,
        }
    }
}

impl Product {
    /// Price per unit for the given selling unit, if the product is sold
    /// in that unit.
    pub fn unit_price(&self, unit: UnitType) -> Option<f64> {
        match unit {
            UnitType::Kg => self.price_kg,
            UnitType::Piece => self.price_piece,
            UnitType::Package => self.price_package,
            UnitType::Box => self.price_box,
        }
    }
}
