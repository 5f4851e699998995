//! Priority escalation for orders due today

use chrono::{DateTime, Utc};
use shared::{Order, OrderId, Priority};

use super::stats::StatusClassifier;

/// Open orders due today that are not yet high priority
pub fn escalation_candidates(orders: &[Order], classifier: &StatusClassifier, now: DateTime<Utc>) -> Vec<OrderId> {
    orders
        .iter()
        .filter(|order| order.priority != Priority::High && classifier.is_due_today(order, now))
        .map(|order| order.id)
        .collect()
}

/// Raise an order to high priority; returns false when nothing changed
pub fn escalate(order: &mut Order, now: DateTime<Utc>) -> bool {
    if order.priority == Priority::High {
        return false;
    }
    order.priority = Priority::High;
    order.touch(now);
    true
}
