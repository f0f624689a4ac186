//! OrdersManager test suite
//!
//! All tests run against [`InMemoryBackend`] with seeded settings and
//! carts.

mod test_checkout;

use super::*;
use crate::backend::InMemoryBackend;
use crate::pricing::{BackendPromotions, NoPromotion};
use shared::models::{DeliveryIntervalSlot, PromoCode, StoreSettings};
use shared::order::{CartLine, DeliveryType, PaymentType, UnitType};

/// Manager over a fresh in-memory store, no promo evaluation
fn create_test_manager() -> (Arc<InMemoryBackend>, OrdersManager) {
    let backend = Arc::new(InMemoryBackend::new());
    let manager = OrdersManager::new(backend.clone(), Arc::new(NoPromotion), "ORD");
    (backend, manager)
}

/// Manager with promo codes evaluated against the backing store
fn create_promo_manager() -> (Arc<InMemoryBackend>, OrdersManager) {
    let backend = Arc::new(InMemoryBackend::new());
    let promotions = Arc::new(BackendPromotions::new(backend.clone()));
    let manager = OrdersManager::new(backend.clone(), promotions, "ORD");
    (backend, manager)
}

fn default_settings() -> StoreSettings {
    StoreSettings {
        min_order_amount: 500.0,
        free_delivery_from: 1000.0,
        delivery_cost: 150.0,
    }
}

fn cart_line(id: i64, product_id: i64, quantity: f64, unit_price: f64) -> CartLine {
    CartLine {
        id,
        product_id,
        product_name: format!("product-{product_id}"),
        quantity,
        unit: UnitType::Kg,
        unit_price,
        line_total: quantity * unit_price,
    }
}

fn delivery_submission() -> CheckoutSubmission {
    CheckoutSubmission {
        customer_name: "Anna".to_string(),
        customer_phone: "+79990001122".to_string(),
        delivery_type: DeliveryType::Delivery,
        delivery_address: Some("Lenina 1".to_string()),
        delivery_district: Some("Center".to_string()),
        delivery_interval_id: None,
        payment_type: PaymentType::Cash,
        promo_code: None,
        comment: None,
    }
}

fn open_slot(id: i64) -> DeliveryIntervalSlot {
    DeliveryIntervalSlot {
        id,
        name: format!("slot-{id}"),
        time_from: "10:00".to_string(),
        time_to: "12:00".to_string(),
        is_available_now: true,
    }
}

fn promo_percent(code: &str, percent: f64) -> PromoCode {
    PromoCode {
        id: 1,
        code: code.to_string(),
        description: None,
        discount_percent: Some(percent),
        discount_fixed: None,
        min_order_amount: None,
        max_uses: None,
        current_uses: 0,
        is_active: true,
        valid_from: None,
        valid_until: None,
    }
}

/// Seed an 800-subtotal cart for customer 42 and return the manager
async fn checkout_ready_manager() -> (Arc<InMemoryBackend>, OrdersManager) {
    let (backend, manager) = create_test_manager();
    backend.set_settings(default_settings());
    backend.set_cart(42, vec![cart_line(1, 1, 4.0, 200.0)]);
    (backend, manager)
}
