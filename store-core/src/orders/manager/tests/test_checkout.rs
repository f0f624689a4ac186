//! Checkout pipeline tests

use super::*;
use chrono::Datelike;

#[tokio::test]
async fn test_checkout_creates_order() {
    let (backend, manager) = checkout_ready_manager().await;

    let order = manager.checkout(42, &delivery_submission()).await.unwrap();

    assert_eq!(order.status, OrderStatus::New);
    assert_eq!(order.subtotal, 800.0);
    assert_eq!(order.delivery_fee, 150.0);
    assert_eq!(order.discount_amount, 0.0);
    assert_eq!(order.total, 950.0);
    assert_eq!(order.lines.len(), 1);
    assert_eq!(order.customer_id, 42);

    // cart is cleared only on success
    assert!(backend.cart_lines(42).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_order_number_format() {
    let (_backend, manager) = checkout_ready_manager().await;

    let order = manager.checkout(42, &delivery_submission()).await.unwrap();

    let today = Utc::now();
    let expected_prefix = format!(
        "ORD{:04}{:02}{:02}",
        today.year(),
        today.month(),
        today.day()
    );
    assert!(
        order.order_number.starts_with(&expected_prefix),
        "got {}",
        order.order_number
    );
    assert_eq!(order.order_number.len(), expected_prefix.len() + 4);
    assert!(order.order_number.ends_with("0001"));
}

#[tokio::test]
async fn test_order_number_prefix_from_config() {
    let backend = Arc::new(InMemoryBackend::new());
    backend.set_settings(default_settings());
    backend.set_cart(42, vec![cart_line(1, 1, 4.0, 200.0)]);
    let config = Config {
        environment: "test".to_string(),
        log_level: "info".to_string(),
        log_dir: None,
        order_number_prefix: "ZK".to_string(),
    };
    let manager = OrdersManager::from_config(backend.clone(), Arc::new(NoPromotion), &config);

    let order = manager.checkout(42, &delivery_submission()).await.unwrap();
    assert!(order.order_number.starts_with("ZK"), "got {}", order.order_number);
}

#[tokio::test]
async fn test_order_numbers_increment() {
    let (backend, manager) = checkout_ready_manager().await;

    let first = manager.checkout(42, &delivery_submission()).await.unwrap();
    backend.set_cart(42, vec![cart_line(2, 1, 4.0, 200.0)]);
    let second = manager.checkout(42, &delivery_submission()).await.unwrap();

    assert!(first.order_number.ends_with("0001"));
    assert!(second.order_number.ends_with("0002"));
    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn test_below_minimum_rejected_and_nothing_persisted() {
    let (backend, manager) = create_test_manager();
    backend.set_settings(default_settings());
    // subtotal 300 against a 500 minimum
    backend.set_cart(42, vec![cart_line(1, 1, 1.0, 300.0)]);

    let err = manager
        .checkout(42, &delivery_submission())
        .await
        .unwrap_err();

    match err {
        CheckoutError::Rejected(failures) => {
            assert_eq!(failures, vec![ValidationFailure::BelowMinimumOrder(200.0)]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    // cart untouched, no order stored
    assert_eq!(backend.cart_lines(42).await.unwrap().len(), 1);
    assert!(backend.load_order(1).await.unwrap().is_none());
}

#[tokio::test]
async fn test_missing_fields_collected() {
    let (_backend, manager) = checkout_ready_manager().await;

    let mut submission = delivery_submission();
    submission.customer_name = "  ".to_string();
    submission.delivery_address = None;

    let err = manager.checkout(42, &submission).await.unwrap_err();
    match err {
        CheckoutError::Rejected(failures) => {
            assert_eq!(
                failures,
                vec![
                    ValidationFailure::missing("customer_name"),
                    ValidationFailure::missing("delivery_address"),
                ]
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_cart_rejected() {
    let (backend, manager) = create_test_manager();
    backend.set_settings(default_settings());

    let err = manager
        .checkout(42, &delivery_submission())
        .await
        .unwrap_err();
    match err {
        CheckoutError::Rejected(failures) => {
            assert!(failures.contains(&ValidationFailure::EmptyCart));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_pickup_skips_address_and_fee() {
    let (_backend, manager) = checkout_ready_manager().await;

    let mut submission = delivery_submission();
    submission.delivery_type = DeliveryType::Pickup;
    submission.delivery_address = None;

    let order = manager.checkout(42, &submission).await.unwrap();
    assert_eq!(order.delivery_fee, 0.0);
    assert_eq!(order.total, 800.0);
}

#[tokio::test]
async fn test_free_delivery_above_threshold() {
    let (backend, manager) = create_test_manager();
    backend.set_settings(default_settings());
    backend.set_cart(42, vec![cart_line(1, 1, 4.0, 300.0)]);

    let order = manager.checkout(42, &delivery_submission()).await.unwrap();
    assert_eq!(order.subtotal, 1200.0);
    assert_eq!(order.delivery_fee, 0.0);
    assert_eq!(order.total, 1200.0);
}

#[tokio::test]
async fn test_unavailable_interval_rejected() {
    let (backend, manager) = checkout_ready_manager().await;
    let mut closed = open_slot(7);
    closed.is_available_now = false;
    backend.add_interval(closed);

    let mut submission = delivery_submission();
    submission.delivery_interval_id = Some(7);

    let err = manager.checkout(42, &submission).await.unwrap_err();
    match err {
        CheckoutError::Rejected(failures) => {
            assert_eq!(failures, vec![ValidationFailure::UnavailableInterval(7)]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_open_interval_accepted() {
    let (backend, manager) = checkout_ready_manager().await;
    backend.add_interval(open_slot(7));

    let mut submission = delivery_submission();
    submission.delivery_interval_id = Some(7);

    let order = manager.checkout(42, &submission).await.unwrap();
    assert_eq!(order.delivery_interval_id, Some(7));
}

// ========== Promo codes ==========

#[tokio::test]
async fn test_promo_percent_applied() {
    let (backend, manager) = create_promo_manager();
    backend.set_settings(default_settings());
    backend.set_cart(42, vec![cart_line(1, 1, 4.0, 200.0)]);
    backend.add_promo(promo_percent("SPRING", 10.0));

    let mut submission = delivery_submission();
    submission.promo_code = Some("SPRING".to_string());

    let order = manager.checkout(42, &submission).await.unwrap();
    assert_eq!(order.discount_amount, 80.0);
    assert_eq!(order.total, 870.0); // 800 + 150 - 80
    assert_eq!(order.promo_code.as_deref(), Some("SPRING"));
}

#[tokio::test]
async fn test_promo_use_counted_on_success_only() {
    let (backend, manager) = create_promo_manager();
    backend.set_settings(default_settings());
    backend.set_cart(42, vec![cart_line(1, 1, 4.0, 200.0)]);
    backend.add_promo(promo_percent("SPRING", 10.0));

    let mut submission = delivery_submission();
    submission.promo_code = Some("SPRING".to_string());
    submission.customer_name = String::new(); // force rejection

    assert!(manager.checkout(42, &submission).await.is_err());
    let promo = backend.find_promo("SPRING").await.unwrap().unwrap();
    assert_eq!(promo.current_uses, 0);

    submission.customer_name = "Anna".to_string();
    manager.checkout(42, &submission).await.unwrap();
    let promo = backend.find_promo("SPRING").await.unwrap().unwrap();
    assert_eq!(promo.current_uses, 1);
}

#[tokio::test]
async fn test_unknown_promo_rejected() {
    let (backend, manager) = create_promo_manager();
    backend.set_settings(default_settings());
    backend.set_cart(42, vec![cart_line(1, 1, 4.0, 200.0)]);

    let mut submission = delivery_submission();
    submission.promo_code = Some("NOPE".to_string());

    let err = manager.checkout(42, &submission).await.unwrap_err();
    assert!(matches!(err, CheckoutError::Promo(PromoError::UnknownCode)));
    // cart untouched after promo rejection
    assert_eq!(backend.cart_lines(42).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_exhausted_promo_rejected() {
    let (backend, manager) = create_promo_manager();
    backend.set_settings(default_settings());
    backend.set_cart(42, vec![cart_line(1, 1, 4.0, 200.0)]);
    let mut promo = promo_percent("SPRING", 10.0);
    promo.max_uses = Some(1);
    promo.current_uses = 1;
    backend.add_promo(promo);

    let mut submission = delivery_submission();
    submission.promo_code = Some("SPRING".to_string());

    let err = manager.checkout(42, &submission).await.unwrap_err();
    assert!(matches!(err, CheckoutError::Promo(PromoError::Exhausted)));
}

#[tokio::test]
async fn test_promo_code_lookup_is_case_insensitive() {
    let (backend, manager) = create_promo_manager();
    backend.set_settings(default_settings());
    backend.set_cart(42, vec![cart_line(1, 1, 4.0, 200.0)]);
    backend.add_promo(promo_percent("SPRING", 10.0));

    let mut submission = delivery_submission();
    submission.promo_code = Some("spring".to_string());

    let order = manager.checkout(42, &submission).await.unwrap();
    assert_eq!(order.discount_amount, 80.0);
}

#[tokio::test]
async fn test_fixed_promo_never_drives_total_negative() {
    let (backend, manager) = create_promo_manager();
    backend.set_settings(StoreSettings {
        min_order_amount: 0.0,
        free_delivery_from: 0.0,
        delivery_cost: 0.0,
    });
    backend.set_cart(42, vec![cart_line(1, 1, 1.0, 100.0)]);
    let mut promo = promo_percent("BIG", 0.0);
    promo.discount_percent = None;
    promo.discount_fixed = Some(500.0);
    backend.add_promo(promo);

    let mut submission = delivery_submission();
    submission.promo_code = Some("BIG".to_string());

    let order = manager.checkout(42, &submission).await.unwrap();
    assert_eq!(order.discount_amount, 100.0); // capped at subtotal
    assert_eq!(order.total, 0.0);
}

#[tokio::test]
async fn test_blank_promo_code_ignored() {
    let (_backend, manager) = checkout_ready_manager().await;

    let mut submission = delivery_submission();
    submission.promo_code = Some("   ".to_string());

    let order = manager.checkout(42, &submission).await.unwrap();
    assert_eq!(order.discount_amount, 0.0);
}
