//! Demo orders for a fresh installation
//!
//! Dates are placed relative to the current calendar day so the dashboard
//! always shows a mix of completed, upcoming and due-soon work.

use chrono::{DateTime, Days, FixedOffset, NaiveTime, TimeZone, Utc};
use shared::time::calendar_date;
use shared::{Order, OrderId, Priority};

struct SampleRow {
    order_number: &'static str,
    pages: u32,
    due: (i64, u32, u32),
    priority: Priority,
    assigned_to: &'static str,
    note: &'static str,
    completed: bool,
    created: (i64, u32, u32),
    updated: (i64, u32, u32),
}

const SAMPLE_ROWS: [SampleRow; 7] = [
    SampleRow {
        order_number: "7227442",
        pages: 3,
        due: (-1, 8, 3),
        priority: Priority::Low,
        assigned_to: "Jecinta",
        note: "Submitted",
        completed: true,
        created: (-3, 10, 0),
        updated: (-1, 15, 0),
    },
    SampleRow {
        order_number: "7985733",
        pages: 1,
        due: (1, 14, 46),
        priority: Priority::High,
        assigned_to: "Mwambire",
        note: "Pending revision",
        completed: false,
        created: (-2, 9, 0),
        updated: (-2, 9, 0),
    },
    SampleRow {
        order_number: "7985953",
        pages: 1,
        due: (2, 0, 3),
        priority: Priority::Medium,
        assigned_to: "Jecinta",
        note: "",
        completed: false,
        created: (-1, 12, 0),
        updated: (-1, 12, 0),
    },
    SampleRow {
        order_number: "7985967",
        pages: 1,
        due: (2, 0, 3),
        priority: Priority::High,
        assigned_to: "",
        note: "Pending clarification",
        completed: false,
        created: (-1, 14, 30),
        updated: (-1, 14, 30),
    },
    SampleRow {
        order_number: "7985632",
        pages: 2,
        due: (2, 7, 3),
        priority: Priority::Low,
        assigned_to: "Donvine",
        note: "Completed but not uploaded",
        completed: true,
        created: (-2, 11, 0),
        updated: (0, 16, 0),
    },
    SampleRow {
        order_number: "7984756",
        pages: 7,
        due: (2, 23, 3),
        priority: Priority::Low,
        assigned_to: "Donvine",
        note: "",
        completed: false,
        created: (-3, 8, 0),
        updated: (-3, 8, 0),
    },
    SampleRow {
        order_number: "7985970",
        pages: 4,
        due: (3, 10, 3),
        priority: Priority::Medium,
        assigned_to: "",
        note: "",
        completed: false,
        created: (-1, 9, 0),
        updated: (-1, 9, 0),
    },
];

/// The seven demo orders, relative to the day containing `now`
pub fn sample_orders(now: DateTime<Utc>, offset: FixedOffset) -> Vec<Order> {
    let today = calendar_date(now, offset);
    let at = |(days, hour, minute): (i64, u32, u32)| -> DateTime<Utc> {
        let date = if days >= 0 {
            today.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            today.checked_sub_days(Days::new(days.unsigned_abs()))
        }
        .unwrap_or(today);
        let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);

        offset
            .from_local_datetime(&date.and_time(time))
            .single()
            .map(|local| local.with_timezone(&Utc))
            .unwrap_or(now)
    };

    SAMPLE_ROWS
        .iter()
        .map(|row| Order {
            id: OrderId::new(),
            order_number: row.order_number.to_string(),
            pages: row.pages,
            due_date: at(row.due),
            priority: row.priority,
            assigned_to: row.assigned_to.to_string(),
            note: (!row.note.is_empty()).then(|| row.note.to_string()),
            completed: row.completed,
            created_at: at(row.created),
            updated_at: at(row.updated),
        })
        .collect()
}
