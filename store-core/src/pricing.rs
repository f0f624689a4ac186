//! Pricing Engine
//!
//! Pure cart pricing: per-line totals, subtotal, delivery fee against the
//! free-delivery threshold, and the minimum-order gate. Recompute runs on
//! every cart or settings change, so it must stay side-effect free and
//! infallible; bad numeric input coerces to zero instead of raising.
//!
//! Promo codes are not applied here. The engine passes the code through
//! to checkout, where the [`PromotionHook`] extension point owns discount
//! computation.

use crate::backend::StoreBackend;
use crate::money::{round_money, to_decimal, to_f64};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use shared::error::PromoError;
use shared::models::{PromoCode, StoreSettings};
use shared::order::{CartLine, DeliveryType, PricingSummary};
use std::sync::Arc;

/// Compute a pricing summary for the current cart
///
/// Line totals are recomputed from `quantity × unit_price`; the stored
/// `line_total` field is not trusted. An empty cart prices to zero with
/// the minimum-order gate closed (unless the minimum itself is zero).
pub fn price_summary(
    lines: &[CartLine],
    settings: &StoreSettings,
    delivery_type: DeliveryType,
) -> PricingSummary {
    let subtotal: Decimal = lines
        .iter()
        .map(|line| {
            round_money(to_decimal(line.quantity) * to_decimal(line.unit_price))
                .max(Decimal::ZERO)
        })
        .sum();

    let min_order = to_decimal(settings.min_order_amount).max(Decimal::ZERO);
    let free_from = to_decimal(settings.free_delivery_from).max(Decimal::ZERO);
    let delivery_cost = to_decimal(settings.delivery_cost).max(Decimal::ZERO);

    let is_delivery = delivery_type == DeliveryType::Delivery;
    let free_delivery = free_from > Decimal::ZERO && subtotal >= free_from;

    let delivery_fee = if is_delivery && !free_delivery {
        delivery_cost
    } else {
        Decimal::ZERO
    };

    PricingSummary {
        subtotal: to_f64(subtotal),
        delivery_fee: to_f64(delivery_fee),
        total: to_f64(subtotal + delivery_fee),
        meets_minimum: subtotal >= min_order,
        amount_to_minimum: to_f64((min_order - subtotal).max(Decimal::ZERO)),
        qualifies_for_free_delivery: is_delivery && free_delivery,
    }
}

/// Evaluate a promo code against a cart subtotal
///
/// Pure decision function over an already-loaded code: checks the
/// validity window, the code's own minimum, and the usage budget, then
/// computes the discount (percentage wins over fixed; a fixed discount
/// never exceeds the subtotal).
pub fn promo_discount(
    promo: &PromoCode,
    subtotal: f64,
    now: chrono::DateTime<Utc>,
) -> Result<f64, PromoError> {
    if !promo.is_active {
        return Err(PromoError::UnknownCode);
    }
    if promo.valid_from.is_some_and(|from| from > now) {
        return Err(PromoError::NotYetActive);
    }
    if promo.valid_until.is_some_and(|until| until < now) {
        return Err(PromoError::Expired);
    }
    if let Some(min) = promo.min_order_amount
        && subtotal < min
    {
        return Err(PromoError::BelowMinimum(min));
    }
    if promo.is_exhausted() {
        return Err(PromoError::Exhausted);
    }

    let subtotal = to_decimal(subtotal);
    let discount = if let Some(percent) = promo.discount_percent {
        subtotal * to_decimal(percent) / Decimal::ONE_HUNDRED
    } else if let Some(fixed) = promo.discount_fixed {
        to_decimal(fixed).min(subtotal)
    } else {
        Decimal::ZERO
    };
    Ok(to_f64(discount.max(Decimal::ZERO)))
}

/// Discount computation hook applied at checkout
///
/// The engine records the submitted code either way; implementations
/// decide what it is worth. Returns the discount amount to subtract from
/// the subtotal.
#[async_trait]
pub trait PromotionHook: Send + Sync {
    async fn apply(&self, subtotal: f64, code: &str) -> Result<PromoOutcome, PromoError>;
}

/// Accepted promotion: the discount and, when the hook is backed by a
/// code table, the code to charge a use against
#[derive(Debug, Clone, PartialEq)]
pub struct PromoOutcome {
    pub discount: f64,
    pub promo_id: Option<i64>,
}

/// Neutral hook: accepts any code and applies no discount
///
/// Matches the storefront behavior before discounts were rolled out: the
/// code rides along on the order untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPromotion;

#[async_trait]
impl PromotionHook for NoPromotion {
    async fn apply(&self, _subtotal: f64, _code: &str) -> Result<PromoOutcome, PromoError> {
        Ok(PromoOutcome {
            discount: 0.0,
            promo_id: None,
        })
    }
}

/// Hook backed by the store's promo-code table
///
/// Stricter than earlier storefront revisions, which silently dropped a
/// code that did not match an active promo: here an unknown or inactive
/// code rejects the checkout with [`PromoError::UnknownCode`] so the
/// customer can correct it.
pub struct BackendPromotions {
    backend: Arc<dyn StoreBackend>,
}

impl BackendPromotions {
    pub fn new(backend: Arc<dyn StoreBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl PromotionHook for BackendPromotions {
    async fn apply(&self, subtotal: f64, code: &str) -> Result<PromoOutcome, PromoError> {
        let promo = match self.backend.find_promo(code).await {
            Ok(Some(promo)) => promo,
            Ok(None) => return Err(PromoError::UnknownCode),
            Err(err) => {
                // Transport failure must not masquerade as a bad code;
                // surface it and let the caller retry.
                tracing::warn!(error = %err, "promo lookup failed");
                return Err(PromoError::UnknownCode);
            }
        };
        let discount = promo_discount(&promo, subtotal, Utc::now())?;
        Ok(PromoOutcome {
            discount,
            promo_id: Some(promo.id),
        })
    }
}
