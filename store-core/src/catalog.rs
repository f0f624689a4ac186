//! Catalog index
//!
//! In-memory snapshot of products and categories, refreshed from the
//! backing store in bulk and read lock-free-ish by the session layer.
//! Locks here are sync and never held across an await.

use crate::money::{to_decimal, to_f64};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use shared::models::{Category, Product};
use shared::order::UnitType;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("product {0} not found")]
    ProductNotFound(i64),
    #[error("product {product} has no price for unit {unit:?}")]
    UnitNotPriced { product: i64, unit: UnitType },
}

/// Effective price after a product-level discount
///
/// A percentage discount wins over a fixed one when both are set; the
/// result never drops below zero.
pub fn discounted_price(price: f64, percent: Option<f64>, fixed: Option<f64>) -> f64 {
    let price = to_decimal(price);
    let discounted = if let Some(percent) = percent {
        price - price * to_decimal(percent) / Decimal::ONE_HUNDRED
    } else if let Some(fixed) = fixed {
        price - to_decimal(fixed)
    } else {
        price
    };
    to_f64(discounted.max(Decimal::ZERO))
}

/// Snapshot of the store catalog
#[derive(Default)]
pub struct CatalogIndex {
    products: RwLock<HashMap<i64, Product>>,
    categories: RwLock<HashMap<i64, Category>>,
}

impl CatalogIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole snapshot with fresh data
    pub fn replace(&self, products: Vec<Product>, categories: Vec<Category>) {
        let product_map: HashMap<i64, Product> =
            products.into_iter().map(|p| (p.id, p)).collect();
        let category_map: HashMap<i64, Category> =
            categories.into_iter().map(|c| (c.id, c)).collect();
        tracing::debug!(
            products = product_map.len(),
            categories = category_map.len(),
            "catalog snapshot replaced"
        );
        *self.products.write() = product_map;
        *self.categories.write() = category_map;
    }

    pub fn product(&self, product_id: i64) -> Option<Product> {
        self.products.read().get(&product_id).cloned()
    }

    pub fn category(&self, category_id: i64) -> Option<Category> {
        self.categories.read().get(&category_id).cloned()
    }

    /// Effective unit price for a product, discounts applied
    pub fn unit_price(&self, product_id: i64, unit: UnitType) -> Result<f64, CatalogError> {
        let products = self.products.read();
        let product = products
            .get(&product_id)
            .ok_or(CatalogError::ProductNotFound(product_id))?;
        let base = product
            .unit_price(unit)
            .ok_or(CatalogError::UnitNotPriced {
                product: product_id,
                unit,
            })?;
        Ok(discounted_price(
            base,
            product.discount_percent,
            product.discount_fixed,
        ))
    }

    /// Active, available products of one category, in display order
    pub fn products_in_category(&self, category_id: i64) -> Vec<Product> {
        let mut products: Vec<Product> = self
            .products
            .read()
            .values()
            .filter(|p| p.category_id == category_id && p.is_active && p.is_available)
            .cloned()
            .collect();
        products.sort_by_key(|p| (p.sort_order, p.id));
        products
    }

    /// Active categories in display order
    pub fn active_categories(&self) -> Vec<Category> {
        let mut categories: Vec<Category> = self
            .categories
            .read()
            .values()
            .filter(|c| c.is_active)
            .cloned()
            .collect();
        categories.sort_by_key(|c| (c.sort_order, c.id));
        categories
    }
}
