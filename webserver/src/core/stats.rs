//! Dashboard status counts
//!
//! Pure business logic with no I/O dependencies. The four counts overlap:
//! `in_progress` counts every open order, including those that are also due
//! today or overdue.

use chrono::{DateTime, Duration, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use shared::Order;
use shared::time::calendar_date;

/// When an open order counts as overdue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverdueRule {
    /// Due before now, on an earlier calendar day than today
    #[default]
    PastDay,
    /// Due before `now + buffer`
    Buffer(Duration),
}

/// Aggregate counts shown on the dashboard cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub due_today: usize,
    pub overdue: usize,
    pub in_progress: usize,
    pub completed: usize,
}

/// Derives status buckets from due dates and completion flags
#[derive(Debug, Clone, Copy)]
pub struct StatusClassifier {
    overdue_rule: OverdueRule,
    offset: FixedOffset,
}

impl StatusClassifier {
    /// Create a classifier; calendar days are taken in `offset`
    pub fn new(overdue_rule: OverdueRule, offset: FixedOffset) -> Self {
        Self { overdue_rule, offset }
    }

    pub fn overdue_rule(&self) -> OverdueRule {
        self.overdue_rule
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn is_due_today(&self, order: &Order, now: DateTime<Utc>) -> bool {
        !order.completed && calendar_date(order.due_date, self.offset) == calendar_date(now, self.offset)
    }

    pub fn is_overdue(&self, order: &Order, now: DateTime<Utc>) -> bool {
        if order.completed {
            return false;
        }

        match self.overdue_rule {
            OverdueRule::PastDay => {
                order.due_date < now && calendar_date(order.due_date, self.offset) != calendar_date(now, self.offset)
            }
            // A limit past the end of representable time covers every due date
            OverdueRule::Buffer(buffer) => now
                .checked_add_signed(buffer)
                .is_none_or(|limit| order.due_date < limit),
        }
    }

    /// Count every bucket in a single pass
    pub fn summarize<'a, I>(&self, orders: I, now: DateTime<Utc>) -> StatusSummary
    where
        I: IntoIterator<Item = &'a Order>,
    {
        orders.into_iter().fold(StatusSummary::default(), |mut summary, order| {
            if order.completed {
                summary.completed += 1;
                return summary;
            }

            summary.in_progress += 1;
            if self.is_due_today(order, now) {
                summary.due_today += 1;
            }
            if self.is_overdue(order, now) {
                summary.overdue += 1;
            }
            summary
        })
    }
}

impl Default for StatusClassifier {
    fn default() -> Self {
        Self::new(OverdueRule::default(), Utc.fix())
    }
}
