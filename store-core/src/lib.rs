//! Storefront order core
//!
//! The pricing, validation, and lifecycle engine behind a grocery
//! storefront. The view/transport layer (HTTP, rendering, platform SDK)
//! lives elsewhere and talks to this crate through plain values:
//!
//! - **catalog**: cached products/categories with unit-price selection
//! - **pricing**: pure cart pricing (`price_summary`) and the promotion
//!   extension point
//! - **checkout**: pure submission validation with an ordered failure list
//! - **orders**: order creation and the status transition table, with
//!   per-order serialization of concurrent updates
//! - **backend**: the interface to the remote store
//!
//! # Flow
//!
//! ```text
//! backend loads ──► SessionState (settings + catalog + cart)
//!        cart edits ──► pricing::price_summary (pure, every change)
//!        submit ──► checkout::validate ──► OrdersManager::checkout
//!        admin  ──► OrdersManager::transition (table-enforced)
//! ```

pub mod backend;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod logger;
pub mod money;
pub mod orders;
pub mod pricing;
pub mod state;

// Re-exports
pub use backend::{BackendError, StoreBackend};
pub use catalog::CatalogIndex;
pub use orders::{CheckoutError, OrderUpdateError, OrdersManager};
pub use pricing::price_summary;
pub use state::SessionState;
