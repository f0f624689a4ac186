//! Per-session storefront state
//!
//! One [`SessionState`] per customer session: the cart, the current
//! settings snapshot, and a handle to the catalog index. Cart mutations
//! keep line totals in sync and the pricing engine is re-run after every
//! change.

use crate::backend::{BackendResult, StoreBackend};
use crate::catalog::CatalogIndex;
use crate::money::line_total;
use crate::pricing::price_summary;
use parking_lot::RwLock;
use shared::models::StoreSettings;
use shared::order::{CartLine, DeliveryType, PricingSummary, UnitType};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Customer session: cart plus cached store data
pub struct SessionState {
    customer_id: i64,
    settings: RwLock<StoreSettings>,
    catalog: Arc<CatalogIndex>,
    cart: RwLock<Vec<CartLine>>,
    next_line_id: AtomicI64,
}

impl SessionState {
    pub fn new(customer_id: i64, catalog: Arc<CatalogIndex>) -> Self {
        Self {
            customer_id,
            settings: RwLock::new(StoreSettings::default()),
            catalog,
            cart: RwLock::new(Vec::new()),
            next_line_id: AtomicI64::new(1),
        }
    }

    pub fn customer_id(&self) -> i64 {
        self.customer_id
    }

    pub fn settings(&self) -> StoreSettings {
        self.settings.read().clone()
    }

    pub fn catalog(&self) -> &CatalogIndex {
        &self.catalog
    }

    /// Refresh settings, catalog, and cart from the backing store
    pub async fn reload(&self, backend: &dyn StoreBackend) -> BackendResult<()> {
        let settings = backend.store_settings().await?;
        let products = backend.products().await?;
        let categories = backend.categories().await?;
        let lines = backend.cart_lines(self.customer_id).await?;

        *self.settings.write() = settings;
        self.catalog.replace(products, categories);
        *self.cart.write() = lines;
        tracing::debug!(customer_id = self.customer_id, "session reloaded");
        Ok(())
    }

    pub fn lines(&self) -> Vec<CartLine> {
        self.cart.read().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.read().is_empty()
    }

    /// Add a quantity of a product to the cart
    ///
    /// A line with the same product and unit is merged rather than
    /// duplicated. Quantities at or below zero are ignored.
    pub fn add_item(
        &self,
        product_id: i64,
        product_name: &str,
        quantity: f64,
        unit: UnitType,
        unit_price: f64,
    ) {
        if quantity <= 0.0 || quantity.is_nan() {
            return;
        }
        let mut cart = self.cart.write();
        if let Some(line) = cart
            .iter_mut()
            .find(|l| l.product_id == product_id && l.unit == unit)
        {
            line.quantity += quantity;
            line.unit_price = unit_price;
            line.line_total = line_total(line.quantity, line.unit_price);
            return;
        }
        let id = self.next_line_id.fetch_add(1, Ordering::SeqCst);
        cart.push(CartLine {
            id,
            product_id,
            product_name: product_name.to_string(),
            quantity,
            unit,
            unit_price,
            line_total: line_total(quantity, unit_price),
        });
    }

    /// Set the quantity of an existing line; zero or less removes it
    pub fn set_quantity(&self, line_id: i64, quantity: f64) {
        let mut cart = self.cart.write();
        if quantity > 0.0 {
            if let Some(line) = cart.iter_mut().find(|l| l.id == line_id) {
                line.quantity = quantity;
                line.line_total = line_total(quantity, line.unit_price);
            }
        } else {
            cart.retain(|l| l.id != line_id);
        }
    }

    pub fn remove_line(&self, line_id: i64) {
        self.cart.write().retain(|l| l.id != line_id);
    }

    pub fn clear(&self) {
        self.cart.write().clear();
    }

    /// Price the current cart for the chosen delivery type
    pub fn summary(&self, delivery_type: DeliveryType) -> PricingSummary {
        price_summary(&self.cart.read(), &self.settings.read(), delivery_type)
    }
}
