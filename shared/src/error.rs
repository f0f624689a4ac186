//! Recoverable error taxonomy
//!
//! Everything here is a user-recoverable rejection, returned as a value
//! rather than thrown: the checkout validator returns a list so the view
//! can surface every problem or only the first one, and the orders
//! manager returns a typed rejection that leaves the stored status
//! untouched. Transport failures are a separate concern of the engine's
//! backend layer.

use crate::order::OrderStatus;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single checkout validation failure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ValidationFailure {
    /// A required field is empty (after trimming whitespace)
    #[error("required field is empty: {0}")]
    MissingRequiredField(String),
    /// Cart subtotal is below the store minimum; carries the amount
    /// still missing
    #[error("order is below the minimum amount, {0:.2} missing")]
    BelowMinimumOrder(f64),
    /// Checkout with an empty cart
    #[error("cart is empty")]
    EmptyCart,
    /// Selected delivery interval is not selectable right now
    #[error("delivery interval {0} is not available")]
    UnavailableInterval(i64),
}

impl ValidationFailure {
    /// Shorthand for a missing-field failure.
    pub fn missing(field: &str) -> Self {
        ValidationFailure::MissingRequiredField(field.to_string())
    }
}

/// Rejected order status transition
///
/// The order's stored status is left unchanged when this is returned.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Error)]
#[error("invalid order status transition: {from} -> {to}")]
pub struct TransitionError {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

/// Promo code rejection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum PromoError {
    #[error("unknown promo code")]
    UnknownCode,
    #[error("promo code is not active yet")]
    NotYetActive,
    #[error("promo code has expired")]
    Expired,
    /// Cart subtotal is below the code's own minimum
    #[error("promo code requires a minimum order of {0:.2}")]
    BelowMinimum(f64),
    #[error("promo code usage budget is exhausted")]
    Exhausted,
}
