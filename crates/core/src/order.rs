//! Order status lifecycle and order number generation.

use crate::error::Error;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle states.
///
/// Cash-on-delivery flow: an order is created `pending`, confirmed by the
/// merchant, shipped, then delivered. Cancellation is only possible before
/// shipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Result<Self, Error> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(Error::InvalidOrderStatus(other.to_string())),
        }
    }

    /// Whether `self -> to` is a legal transition.
    pub fn can_transition(&self, to: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, to),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, Shipped)
                | (Confirmed, Cancelled)
                | (Shipped, Delivered)
        )
    }

    /// Validate a transition, returning a domain error on violation.
    pub fn transition(&self, to: OrderStatus) -> Result<OrderStatus, Error> {
        if self.can_transition(to) {
            Ok(to)
        } else {
            Err(Error::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: to.as_str().to_string(),
            })
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generate a customer-facing order number: `AT-` plus 6 characters from an
/// unambiguous uppercase alphabet. Uniqueness is enforced by the database;
/// callers retry on collision.
pub fn generate_order_number() -> String {
    const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
    let mut rng = rand::thread_rng();
    let suffix: String = (0..6)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("AT-{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_transitions() {
        assert!(OrderStatus::Pending.can_transition(OrderStatus::Confirmed));
        assert!(OrderStatus::Confirmed.can_transition(OrderStatus::Shipped));
        assert!(OrderStatus::Shipped.can_transition(OrderStatus::Delivered));
    }

    #[test]
    fn cancellation_only_before_shipping() {
        assert!(OrderStatus::Pending.can_transition(OrderStatus::Cancelled));
        assert!(OrderStatus::Confirmed.can_transition(OrderStatus::Cancelled));
        assert!(!OrderStatus::Shipped.can_transition(OrderStatus::Cancelled));
        assert!(!OrderStatus::Delivered.can_transition(OrderStatus::Cancelled));
    }

    #[test]
    fn terminal_states_have_no_exits() {
        for to in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert!(!OrderStatus::Delivered.can_transition(to));
            assert!(!OrderStatus::Cancelled.can_transition(to));
        }
    }

    #[test]
    fn transition_error_names_both_states() {
        let err = OrderStatus::Delivered
            .transition(OrderStatus::Pending)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid status transition: delivered -> pending"
        );
    }

    #[test]
    fn order_number_shape() {
        let number = generate_order_number();
        assert!(number.starts_with("AT-"));
        assert_eq!(number.len(), 9);
    }
}
