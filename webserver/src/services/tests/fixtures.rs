//! Test fixtures for webserver service tests

use chrono::{DateTime, Duration, TimeZone, Utc};
use shared::{Order, OrderId, Priority, Role, User, UserId};

use crate::config::SessionConfig;

/// Fixed clock for deterministic tests
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap()
}

/// Create a test order due `due_in` from [`test_now`]
pub fn create_test_order(order_number: &str, due_in: Duration) -> Order {
    let created_at = test_now() - Duration::days(1);
    Order {
        id: OrderId::new(),
        order_number: order_number.to_string(),
        pages: 2,
        due_date: test_now() + due_in,
        priority: Priority::Low,
        assigned_to: "Jecinta".to_string(),
        note: None,
        completed: false,
        created_at,
        updated_at: created_at,
    }
}

/// Create several orders with distinct numbers
pub fn create_test_orders(count: usize) -> Vec<Order> {
    (0..count)
        .map(|i| create_test_order(&format!("{}", 7_100_000 + i), Duration::days(i as i64 + 1)))
        .collect()
}

pub fn create_test_user(email: &str, username: &str, role: Role) -> User {
    User {
        id: UserId::new(),
        email: email.to_string(),
        username: username.to_string(),
        role,
        password_digest: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaA".to_string(),
        created_at: test_now(),
        updated_at: test_now(),
    }
}

pub fn create_test_session_config() -> SessionConfig {
    SessionConfig {
        secret: b"test-secret-with-enough-bytes".to_vec(),
        ttl: Duration::hours(24),
        secure_cookies: false,
    }
}
