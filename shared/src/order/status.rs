//! Order status state machine
//!
//! The transition table is the single source of truth for both the
//! customer flow (order creation) and the admin flow (status updates).
//! Anything not listed here is rejected by the orders manager; legality
//! is enforced in the core, not in an admin menu.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order status
///
/// Lifecycle: `new → confirmed → preparing → ready → delivering →
/// completed`, with `cancelled` reachable from any non-terminal state.
/// `completed` and `cancelled` are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    New,
    Confirmed,
    Preparing,
    Ready,
    Delivering,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Whether the status accepts no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// The next status on the normal (non-cancel) path, if any.
    pub fn next_in_flow(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::New => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Delivering),
            OrderStatus::Delivering => Some(OrderStatus::Completed),
            OrderStatus::Completed | OrderStatus::Cancelled => None,
        }
    }

    /// Whether `self → target` appears in the transition table.
    pub fn can_transition_to(self, target: OrderStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        target == OrderStatus::Cancelled || self.next_in_flow() == Some(target)
    }

    /// All statuses, in lifecycle order.
    pub fn all() -> [OrderStatus; 7] {
        [
            OrderStatus::New,
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Delivering,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ]
    }

    /// Wire name of the status (matches the serde representation).
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivering => "delivering",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
