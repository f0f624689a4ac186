//! Cart, checkout, and order types

use super::status::OrderStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Selling unit
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    #[default]
    Kg,
    Piece,
    Package,
    Box,
}

/// Delivery type selected at checkout
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryType {
    #[default]
    Pickup,
    Delivery,
}

/// Payment type selected at checkout
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    #[default]
    Cash,
    Card,
    Online,
}

/// Cart line owned by the customer's cart
///
/// `quantity` may be fractional for weight units. `line_total` is a
/// computed field kept in sync by whoever mutates the line; the pricing
/// engine always recomputes from `quantity × unit_price`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: f64,
    pub unit: UnitType,
    pub unit_price: f64,
    pub line_total: f64,
}

/// Checkout submission, constructed once per checkout attempt
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CheckoutSubmission {
    pub customer_name: String,
    pub customer_phone: String,
    pub delivery_type: DeliveryType,
    pub delivery_address: Option<String>,
    pub delivery_district: Option<String>,
    pub delivery_interval_id: Option<i64>,
    pub payment_type: PaymentType,
    /// Recorded with the order; discount evaluation is a separate hook
    pub promo_code: Option<String>,
    pub comment: Option<String>,
}

/// Result of a pricing-engine recompute, rendered by the view on every
/// cart or settings change
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PricingSummary {
    pub subtotal: f64,
    pub delivery_fee: f64,
    pub total: f64,
    pub meets_minimum: bool,
    pub amount_to_minimum: f64,
    pub qualifies_for_free_delivery: bool,
}

/// Order line snapshot, frozen at order creation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: f64,
    pub unit: UnitType,
    pub unit_price: f64,
    pub line_total: f64,
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id,
            product_name: line.product_name.clone(),
            quantity: line.quantity,
            unit: line.unit,
            unit_price: line.unit_price,
            line_total: line.line_total,
        }
    }
}

/// Order entity
///
/// Created atomically from a validated checkout submission; `status` is
/// thereafter mutated only through the orders manager's transition table
/// and freezes once terminal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub order_number: String,
    pub customer_id: i64,

    pub customer_name: String,
    pub customer_phone: String,

    pub delivery_type: DeliveryType,
    pub delivery_address: Option<String>,
    pub delivery_district: Option<String>,
    pub delivery_interval_id: Option<i64>,

    pub payment_type: PaymentType,

    pub lines: Vec<OrderLine>,
    pub subtotal: f64,
    pub delivery_fee: f64,
    pub discount_amount: f64,
    pub total: f64,

    pub promo_code: Option<String>,
    pub comment: Option<String>,

    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
