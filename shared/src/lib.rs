//! Shared types for the storefront order core
//!
//! Data model and wire-visible types used across crates: catalog models,
//! cart/order types, the order status state machine, and the recoverable
//! error taxonomy.

pub mod error;
pub mod models;
pub mod order;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{PromoError, TransitionError, ValidationFailure};
pub use order::{OrderStatus, PricingSummary};
