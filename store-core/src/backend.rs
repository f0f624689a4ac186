//! Backing store interface
//!
//! The engine never talks to a database or network directly; everything
//! it needs is behind [`StoreBackend`]. The real implementation lives in
//! the transport layer; [`InMemoryBackend`] backs the tests and serves as
//! the reference implementation of the contract.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use shared::models::{Category, DeliveryIntervalSlot, Product, PromoCode, StoreSettings};
use shared::order::{CartLine, Order, OrderStatus};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use thiserror::Error;

/// Backing store failure
///
/// Always recoverable from the caller's point of view: surfaced to the
/// user as a generic retryable failure, never swallowed.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("backing store unavailable: {0}")]
    Unavailable(String),
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Interface to the remote store
///
/// Writes that belong to one order must be applied atomically by the
/// implementation; the engine provides per-order serialization on top.
#[async_trait]
pub trait StoreBackend: Send + Sync {
    /// Current cart lines for a customer
    async fn cart_lines(&self, customer_id: i64) -> BackendResult<Vec<CartLine>>;

    /// Drop all cart lines for a customer (after successful checkout)
    async fn clear_cart(&self, customer_id: i64) -> BackendResult<()>;

    /// Store-wide settings, re-read on every call
    async fn store_settings(&self) -> BackendResult<StoreSettings>;

    /// Delivery intervals with availability computed by the store
    async fn delivery_intervals(&self) -> BackendResult<Vec<DeliveryIntervalSlot>>;

    /// Full product list (active and inactive; the catalog index filters)
    async fn products(&self) -> BackendResult<Vec<Product>>;

    /// Full category list
    async fn categories(&self) -> BackendResult<Vec<Category>>;

    /// Look up a promo code (case-insensitive)
    async fn find_promo(&self, code: &str) -> BackendResult<Option<PromoCode>>;

    /// Count one use against a promo code's budget (after acceptance)
    async fn mark_promo_used(&self, promo_id: i64) -> BackendResult<()>;

    /// Next value of the order-number sequence
    async fn next_order_seq(&self) -> BackendResult<u64>;

    /// Persist a new order; returns the order with its assigned id
    async fn insert_order(&self, order: Order) -> BackendResult<Order>;

    /// Load an order by id
    async fn load_order(&self, order_id: i64) -> BackendResult<Option<Order>>;

    /// Persist a status change for an order
    async fn store_order_status(
        &self,
        order_id: i64,
        status: OrderStatus,
        updated_at: DateTime<Utc>,
    ) -> BackendResult<()>;
}

/// In-memory backing store for tests
#[derive(Default)]
pub struct InMemoryBackend {
    carts: RwLock<HashMap<i64, Vec<CartLine>>>,
    settings: RwLock<StoreSettings>,
    intervals: RwLock<Vec<DeliveryIntervalSlot>>,
    products: RwLock<Vec<Product>>,
    categories: RwLock<Vec<Category>>,
    promos: RwLock<HashMap<String, PromoCode>>,
    orders: RwLock<HashMap<i64, Order>>,
    order_seq: AtomicU64,
    next_order_id: AtomicI64,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self {
            next_order_id: AtomicI64::new(1),
            ..Self::default()
        }
    }

    pub fn set_settings(&self, settings: StoreSettings) {
        *self.settings.write() = settings;
    }

    pub fn set_cart(&self, customer_id: i64, lines: Vec<CartLine>) {
        self.carts.write().insert(customer_id, lines);
    }

    pub fn add_interval(&self, slot: DeliveryIntervalSlot) {
        self.intervals.write().push(slot);
    }

    pub fn add_product(&self, product: Product) {
        self.products.write().push(product);
    }

    pub fn add_category(&self, category: Category) {
        self.categories.write().push(category);
    }

    pub fn add_promo(&self, promo: PromoCode) {
        self.promos.write().insert(promo.code.clone(), promo);
    }

    /// Direct read of a stored order's status (test inspection)
    pub fn order_status(&self, order_id: i64) -> Option<OrderStatus> {
        self.orders.read().get(&order_id).map(|o| o.status)
    }
}

#[async_trait]
impl StoreBackend for InMemoryBackend {
    async fn cart_lines(&self, customer_id: i64) -> BackendResult<Vec<CartLine>> {
        Ok(self.carts.read().get(&customer_id).cloned().unwrap_or_default())
    }

    async fn clear_cart(&self, customer_id: i64) -> BackendResult<()> {
        self.carts.write().remove(&customer_id);
        Ok(())
    }

    async fn store_settings(&self) -> BackendResult<StoreSettings> {
        Ok(self.settings.read().clone())
    }

    async fn delivery_intervals(&self) -> BackendResult<Vec<DeliveryIntervalSlot>> {
        Ok(self.intervals.read().clone())
    }

    async fn products(&self) -> BackendResult<Vec<Product>> {
        Ok(self.products.read().clone())
    }

    async fn categories(&self) -> BackendResult<Vec<Category>> {
        Ok(self.categories.read().clone())
    }

    async fn find_promo(&self, code: &str) -> BackendResult<Option<PromoCode>> {
        Ok(self.promos.read().get(&code.to_uppercase()).cloned())
    }

    async fn mark_promo_used(&self, promo_id: i64) -> BackendResult<()> {
        let mut promos = self.promos.write();
        if let Some(promo) = promos.values_mut().find(|p| p.id == promo_id) {
            promo.current_uses += 1;
        }
        Ok(())
    }

    async fn next_order_seq(&self) -> BackendResult<u64> {
        Ok(self.order_seq.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn insert_order(&self, mut order: Order) -> BackendResult<Order> {
        order.id = self.next_order_id.fetch_add(1, Ordering::SeqCst);
        self.orders.write().insert(order.id, order.clone());
        Ok(order)
    }

    async fn load_order(&self, order_id: i64) -> BackendResult<Option<Order>> {
        Ok(self.orders.read().get(&order_id).cloned())
    }

    async fn store_order_status(
        &self,
        order_id: i64,
        status: OrderStatus,
        updated_at: DateTime<Utc>,
    ) -> BackendResult<()> {
        let mut orders = self.orders.write();
        let order = orders
            .get_mut(&order_id)
            .ok_or_else(|| BackendError::NotFound(format!("order {order_id}")))?;
        order.status = status;
        order.updated_at = updated_at;
        Ok(())
    }
}
