//! Test fixtures for order tracker integration tests
#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use shared::{Order, OrderId, Priority};

pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

/// Order created at `created_at`, due two days later
pub fn order_created(number: &str, created_at: DateTime<Utc>, assignee: &str, completed: bool) -> Order {
    Order {
        id: OrderId::new(),
        order_number: number.to_string(),
        pages: 2,
        due_date: created_at + Duration::days(2),
        priority: Priority::Medium,
        assigned_to: assignee.to_string(),
        note: Some(format!("Note for {number}, with a comma")),
        completed,
        created_at,
        updated_at: created_at,
    }
}

/// Order due at `due_date`, created a few days earlier
pub fn order_due(number: &str, due_date: DateTime<Utc>, priority: Priority, completed: bool) -> Order {
    let created_at = due_date - Duration::days(3);
    Order {
        id: OrderId::new(),
        order_number: number.to_string(),
        pages: 1,
        due_date,
        priority,
        assigned_to: String::new(),
        note: None,
        completed,
        created_at,
        updated_at: created_at,
    }
}

/// Four orders spread over March 2025
pub fn march_orders() -> Vec<Order> {
    vec![
        order_created("7000001", at(2025, 3, 1, 9), "Jecinta", true),
        order_created("7000002", at(2025, 3, 10, 18), "Donvine", false),
        order_created("7000003", at(2025, 3, 10, 23), "", false),
        order_created("7000004", at(2025, 3, 20, 8), "Mwambire", false),
    ]
}
