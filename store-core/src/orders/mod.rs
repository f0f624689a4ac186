//! Order creation and lifecycle

pub mod manager;

pub use manager::{CheckoutError, OrderUpdateError, OrdersManager};
