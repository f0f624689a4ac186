//! Shared order types
//!
//! Cart lines, checkout submissions, pricing summaries, and the order
//! status state machine shared by the customer and admin flows.

pub mod status;
pub mod types;

pub use status::OrderStatus;
pub use types::{
    CartLine, CheckoutSubmission, DeliveryType, Order, OrderLine, PaymentType, PricingSummary,
    UnitType,
};
