//! Report query filter
//!
//! Narrows orders to those created inside an inclusive date range, optionally
//! matching an assignee substring and a completion flag. Used for the report
//! listing and to pick the rows of a CSV export.

use chrono::{DateTime, FixedOffset, Utc};
use shared::Order;
use shared::time::{DayBound, parse_timestamp};

use crate::error::{WebServerError, WebServerResult};
use crate::types::ReportRequest;

pub const INVALID_DATE_RANGE: &str = "Invalid date range";
pub const INVALID_DATE_FORMAT: &str = "Invalid date format";

/// A validated report query
#[derive(Debug, Clone, PartialEq)]
pub struct ReportQuery {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    /// Lowercased needle; `None` means any assignee
    assignee: Option<String>,
    completed: Option<bool>,
}

impl ReportQuery {
    /// Create a query over `[start, end]`; an inverted range is rejected
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> WebServerResult<Self> {
        if start > end {
            return Err(WebServerError::validation(INVALID_DATE_RANGE));
        }

        Ok(Self {
            start,
            end,
            assignee: None,
            completed: None,
        })
    }

    /// Restrict to assignees containing `assignee`; blank input removes the filter
    pub fn with_assignee(mut self, assignee: Option<&str>) -> Self {
        self.assignee = assignee
            .map(str::trim)
            .filter(|needle| !needle.is_empty())
            .map(str::to_lowercase);
        self
    }

    pub fn with_completed(mut self, completed: Option<bool>) -> Self {
        self.completed = completed;
        self
    }

    /// Validate a client request; bare dates cover the whole day at either end
    pub fn from_request(request: &ReportRequest, offset: FixedOffset) -> WebServerResult<Self> {
        let (Some(start), Some(end)) = (non_blank(&request.start_date), non_blank(&request.end_date)) else {
            return Err(WebServerError::validation(INVALID_DATE_RANGE));
        };

        let start = parse_timestamp(start, offset, DayBound::Start)
            .map_err(|_| WebServerError::validation(INVALID_DATE_FORMAT))?;
        let end = parse_timestamp(end, offset, DayBound::End)
            .map_err(|_| WebServerError::validation(INVALID_DATE_FORMAT))?;

        Ok(Self::new(start, end)?
            .with_assignee(request.assignee.as_deref())
            .with_completed(request.completed))
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn matches(&self, order: &Order) -> bool {
        if order.created_at < self.start || order.created_at > self.end {
            return false;
        }

        if let Some(needle) = &self.assignee {
            if !order.assigned_to.to_lowercase().contains(needle.as_str()) {
                return false;
            }
        }

        self.completed.is_none_or(|completed| order.completed == completed)
    }

    /// Keep matching orders, preserving their order
    pub fn apply(&self, orders: Vec<Order>) -> Vec<Order> {
        orders.into_iter().filter(|order| self.matches(order)).collect()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|value| !value.is_empty())
}
