//! Orders Manager
//!
//! Owns order creation and the status lifecycle. Checkout turns a
//! validated submission plus the customer's cart into a persisted order;
//! transitions go through the status table with per-order serialization
//! so two concurrent updates to the same order cannot interleave.

use crate::backend::{BackendError, StoreBackend};
use crate::checkout;
use crate::config::Config;
use crate::money::{to_decimal, to_f64};
use crate::pricing::{PromotionHook, price_summary};
use chrono::Utc;
use dashmap::DashMap;
use rust_decimal::Decimal;
use shared::error::{PromoError, TransitionError, ValidationFailure};
use shared::order::{CheckoutSubmission, Order, OrderLine, OrderStatus};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

#[cfg(test)]
mod tests;

/// Checkout rejection
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// One or more validation rules failed; nothing was persisted
    #[error("checkout rejected: {0:?}")]
    Rejected(Vec<ValidationFailure>),
    /// The submitted promo code was refused; nothing was persisted
    #[error(transparent)]
    Promo(#[from] PromoError),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Order lifecycle failure
#[derive(Debug, Error)]
pub enum OrderUpdateError {
    /// The transition is not in the status table; the stored status is
    /// unchanged
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("order {0} not found")]
    OrderNotFound(i64),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Order creation and lifecycle manager
pub struct OrdersManager {
    backend: Arc<dyn StoreBackend>,
    promotions: Arc<dyn PromotionHook>,
    /// Per-order transition locks; entries are created on demand and
    /// kept for the life of the manager
    locks: DashMap<i64, Arc<Mutex<()>>>,
    order_number_prefix: String,
    /// Manager instance id, logged for correlating restarts
    instance_id: String,
}

impl OrdersManager {
    pub fn new(
        backend: Arc<dyn StoreBackend>,
        promotions: Arc<dyn PromotionHook>,
        order_number_prefix: impl Into<String>,
    ) -> Self {
        let instance_id = Uuid::new_v4().to_string();
        tracing::info!(instance_id = %instance_id, "orders manager started");
        Self {
            backend,
            promotions,
            locks: DashMap::new(),
            order_number_prefix: order_number_prefix.into(),
            instance_id,
        }
    }

    /// Manager configured from the environment-backed [`Config`]
    pub fn from_config(
        backend: Arc<dyn StoreBackend>,
        promotions: Arc<dyn PromotionHook>,
        config: &Config,
    ) -> Self {
        Self::new(backend, promotions, config.order_number_prefix.clone())
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    fn lock_for(&self, order_id: i64) -> Arc<Mutex<()>> {
        self.locks
            .entry(order_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Generate the next order number: `{prefix}{YYYYMMDD}{seq:04}`
    async fn next_order_number(&self) -> Result<String, BackendError> {
        let seq = self.backend.next_order_seq().await?;
        let date = Utc::now().format("%Y%m%d");
        Ok(format!("{}{}{:04}", self.order_number_prefix, date, seq))
    }

    /// Create an order from the customer's cart
    ///
    /// Runs the full pipeline: load cart and settings, price, validate,
    /// evaluate the promo code, persist, then clear the cart. Any
    /// rejection leaves the cart and the promo budget untouched.
    pub async fn checkout(
        &self,
        customer_id: i64,
        submission: &CheckoutSubmission,
    ) -> Result<Order, CheckoutError> {
        let lines = self.backend.cart_lines(customer_id).await?;
        let settings = self.backend.store_settings().await?;
        let pricing = price_summary(&lines, &settings, submission.delivery_type);

        let mut failures = checkout::validate(submission, &pricing, lines.is_empty());
        if submission.delivery_interval_id.is_some() {
            let slots = self.backend.delivery_intervals().await?;
            if let Some(failure) = checkout::validate_interval(submission, &slots) {
                failures.push(failure);
            }
        }
        if !failures.is_empty() {
            tracing::info!(
                customer_id,
                failures = failures.len(),
                "checkout rejected"
            );
            return Err(CheckoutError::Rejected(failures));
        }

        let promo = match submission.promo_code.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => {
                Some(self.promotions.apply(pricing.subtotal, code).await?)
            }
            _ => None,
        };
        let discount = promo.as_ref().map(|p| p.discount).unwrap_or(0.0);

        let now = Utc::now();
        let order_number = self.next_order_number().await?;
        let total = to_f64(
            (to_decimal(pricing.subtotal) + to_decimal(pricing.delivery_fee)
                - to_decimal(discount))
            .max(Decimal::ZERO),
        );

        let order = Order {
            id: 0, // assigned by the backing store
            order_number,
            customer_id,
            customer_name: submission.customer_name.trim().to_string(),
            customer_phone: submission.customer_phone.trim().to_string(),
            delivery_type: submission.delivery_type,
            delivery_address: submission.delivery_address.clone(),
            delivery_district: submission.delivery_district.clone(),
            delivery_interval_id: submission.delivery_interval_id,
            payment_type: submission.payment_type,
            lines: lines.iter().map(OrderLine::from).collect(),
            subtotal: pricing.subtotal,
            delivery_fee: pricing.delivery_fee,
            discount_amount: discount,
            total,
            promo_code: submission.promo_code.clone(),
            comment: submission.comment.clone(),
            status: OrderStatus::New,
            created_at: now,
            updated_at: now,
        };

        let order = self.backend.insert_order(order).await?;
        if let Some(promo_id) = promo.and_then(|p| p.promo_id) {
            self.backend.mark_promo_used(promo_id).await?;
        }
        self.backend.clear_cart(customer_id).await?;

        tracing::info!(
            order_id = order.id,
            order_number = %order.order_number,
            customer_id,
            total = order.total,
            "order created"
        );
        Ok(order)
    }

    /// Move an order to a new status
    ///
    /// Transitions on the same order are serialized; a rejected
    /// transition leaves the stored status untouched. Returns the order
    /// with its updated status.
    pub async fn transition(
        &self,
        order_id: i64,
        target: OrderStatus,
    ) -> Result<Order, OrderUpdateError> {
        let lock = self.lock_for(order_id);
        let _guard = lock.lock().await;

        let mut order = self
            .backend
            .load_order(order_id)
            .await?
            .ok_or(OrderUpdateError::OrderNotFound(order_id))?;

        if !order.status.can_transition_to(target) {
            tracing::warn!(
                order_id,
                from = %order.status,
                to = %target,
                "transition rejected"
            );
            return Err(TransitionError {
                from: order.status,
                to: target,
            }
            .into());
        }

        let now = Utc::now();
        self.backend.store_order_status(order_id, target, now).await?;
        order.status = target;
        order.updated_at = now;

        tracing::info!(order_id, status = %target, "order status changed");
        Ok(order)
    }

    /// Advance an order one step along the normal flow
    pub async fn advance(&self, order_id: i64) -> Result<Order, OrderUpdateError> {
        let lock = self.lock_for(order_id);
        let _guard = lock.lock().await;

        let mut order = self
            .backend
            .load_order(order_id)
            .await?
            .ok_or(OrderUpdateError::OrderNotFound(order_id))?;

        let target = order.status.next_in_flow().ok_or(TransitionError {
            from: order.status,
            to: order.status,
        })?;

        let now = Utc::now();
        self.backend.store_order_status(order_id, target, now).await?;
        order.status = target;
        order.updated_at = now;
        Ok(order)
    }

    /// Cancel an order (allowed from any non-terminal status)
    pub async fn cancel(&self, order_id: i64) -> Result<Order, OrderUpdateError> {
        self.transition(order_id, OrderStatus::Cancelled).await
    }

    /// Load an order without taking its lock
    pub async fn order(&self, order_id: i64) -> Result<Order, OrderUpdateError> {
        self.backend
            .load_order(order_id)
            .await?
            .ok_or(OrderUpdateError::OrderNotFound(order_id))
    }
}
