//! Checkout validation
//!
//! Collects every applicable rejection reason in a fixed order instead of
//! stopping at the first, so the storefront can highlight all problem
//! fields in one round trip.

use shared::error::ValidationFailure;
use shared::models::DeliveryIntervalSlot;
use shared::order::{CheckoutSubmission, DeliveryType, PricingSummary};

fn is_blank(value: Option<&String>) -> bool {
    value.map(|v| v.trim().is_empty()).unwrap_or(true)
}

/// Validate a checkout submission against the priced cart
///
/// Rule order is part of the contract: name, phone, address (delivery
/// only), minimum order, empty cart. An empty result means the
/// submission is accepted.
pub fn validate(
    submission: &CheckoutSubmission,
    pricing: &PricingSummary,
    cart_is_empty: bool,
) -> Vec<ValidationFailure> {
    let mut failures = Vec::new();

    if submission.customer_name.trim().is_empty() {
        failures.push(ValidationFailure::missing("customer_name"));
    }
    if submission.customer_phone.trim().is_empty() {
        failures.push(ValidationFailure::missing("customer_phone"));
    }
    if submission.delivery_type == DeliveryType::Delivery
        && is_blank(submission.delivery_address.as_ref())
    {
        failures.push(ValidationFailure::missing("delivery_address"));
    }
    if !pricing.meets_minimum {
        failures.push(ValidationFailure::BelowMinimumOrder(
            pricing.amount_to_minimum,
        ));
    }
    if cart_is_empty {
        failures.push(ValidationFailure::EmptyCart);
    }

    failures
}

/// Check the chosen delivery interval against the published slots
///
/// Delivery orders may name an interval; the interval must exist and be
/// open for ordering right now. Pickup orders and delivery orders without
/// an interval pass.
pub fn validate_interval(
    submission: &CheckoutSubmission,
    slots: &[DeliveryIntervalSlot],
) -> Option<ValidationFailure> {
    if submission.delivery_type != DeliveryType::Delivery {
        return None;
    }
    let interval_id = submission.delivery_interval_id?;
    let available = slots
        .iter()
        .any(|slot| slot.id == interval_id && slot.is_available_now);
    if available {
        None
    } else {
        Some(ValidationFailure::UnavailableInterval(interval_id))
    }
}
