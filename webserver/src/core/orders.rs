//! Order drafts, patches and the completion toggle
//!
//! Request bodies arrive with every field optional. This module validates them
//! into typed drafts and patches before any store is touched.

use chrono::{DateTime, FixedOffset, Utc};
use shared::time::{DayBound, parse_timestamp};
use shared::{Order, OrderId, Priority, normalize_assignee, validate_order_number};

use crate::error::{WebServerError, WebServerResult};
use crate::types::{CreateOrderRequest, UpdateOrderRequest};

pub const MAX_NOTE_LEN: usize = 2048;

/// A validated new order, still without an order number if none was supplied
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    order_number: Option<String>,
    pages: u32,
    due_date: DateTime<Utc>,
    priority: Priority,
    assigned_to: String,
    note: Option<String>,
    completed: bool,
}

impl OrderDraft {
    pub fn from_request(request: &CreateOrderRequest, offset: FixedOffset) -> WebServerResult<Self> {
        let due_date = request.due_date.as_deref().map(str::trim).filter(|due| !due.is_empty());
        let (Some(pages), Some(due_date)) = (request.pages, due_date) else {
            let mut missing = Vec::new();
            if request.pages.is_none() {
                missing.push("pages");
            }
            if due_date.is_none() {
                missing.push("dueDate");
            }
            return Err(missing_fields(&missing));
        };

        Ok(Self {
            order_number: parse_order_number(request.order_number.as_deref())?,
            pages: parse_pages(pages)?,
            due_date: parse_due_date(due_date, offset)?,
            priority: parse_priority(request.priority.as_deref())?.unwrap_or_default(),
            assigned_to: request.assigned_to.as_deref().map(normalize_assignee).unwrap_or_default(),
            note: parse_note(request.note.as_deref())?,
            completed: request.completed.unwrap_or(false),
        })
    }

    /// Order number chosen by the client, if any
    pub fn order_number(&self) -> Option<&str> {
        self.order_number.as_deref()
    }

    /// Build the stored order; `order_number` is used when the client gave none
    pub fn into_order(self, order_number: String, now: DateTime<Utc>) -> Order {
        Order {
            id: OrderId::new(),
            order_number: self.order_number.unwrap_or(order_number),
            pages: self.pages,
            due_date: self.due_date,
            priority: self.priority,
            assigned_to: self.assigned_to,
            note: self.note,
            completed: self.completed,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A validated partial update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderPatch {
    order_number: Option<String>,
    pages: Option<u32>,
    due_date: Option<DateTime<Utc>>,
    priority: Option<Priority>,
    assigned_to: Option<String>,
    /// `Some(None)` clears the note
    note: Option<Option<String>>,
    completed: Option<bool>,
}

impl OrderPatch {
    pub fn from_request(request: &UpdateOrderRequest, offset: FixedOffset) -> WebServerResult<Self> {
        let patch = Self {
            order_number: match request.order_number.as_deref() {
                Some(number) => Some(validate_order_number(number)?),
                None => None,
            },
            pages: request.pages.map(parse_pages).transpose()?,
            due_date: request
                .due_date
                .as_deref()
                .map(|due| parse_due_date(due, offset))
                .transpose()?,
            priority: parse_priority(request.priority.as_deref())?,
            assigned_to: request.assigned_to.as_deref().map(normalize_assignee),
            note: match request.note.as_deref() {
                Some(note) => Some(parse_note(Some(note))?),
                None => None,
            },
            completed: request.completed,
        };

        if patch.is_empty() {
            return Err(WebServerError::validation("No fields to update"));
        }
        Ok(patch)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// New order number, when the patch changes it
    pub fn order_number(&self) -> Option<&str> {
        self.order_number.as_deref()
    }

    pub fn apply(&self, order: &mut Order, now: DateTime<Utc>) {
        if let Some(order_number) = &self.order_number {
            order.order_number.clone_from(order_number);
        }
        if let Some(pages) = self.pages {
            order.pages = pages;
        }
        if let Some(due_date) = self.due_date {
            order.due_date = due_date;
        }
        if let Some(priority) = self.priority {
            order.priority = priority;
        }
        if let Some(assigned_to) = &self.assigned_to {
            order.assigned_to.clone_from(assigned_to);
        }
        if let Some(note) = &self.note {
            order.note.clone_from(note);
        }
        if let Some(completed) = self.completed {
            order.completed = completed;
        }
        order.touch(now);
    }
}

/// Flip the completion flag
pub fn toggle_completed(order: &mut Order, now: DateTime<Utc>) {
    order.completed = !order.completed;
    order.touch(now);
}

fn missing_fields(fields: &[&str]) -> WebServerError {
    WebServerError::validation(format!("Missing required fields: {}", fields.join(", ")))
}

fn parse_order_number(input: Option<&str>) -> WebServerResult<Option<String>> {
    match input.map(str::trim) {
        Some(number) if !number.is_empty() => Ok(Some(validate_order_number(number)?)),
        _ => Ok(None),
    }
}

fn parse_pages(pages: i64) -> WebServerResult<u32> {
    u32::try_from(pages)
        .ok()
        .filter(|pages| *pages >= 1)
        .ok_or_else(|| WebServerError::validation("Pages must be a positive number"))
}

/// A bare date means the order is due by the end of that day
fn parse_due_date(input: &str, offset: FixedOffset) -> WebServerResult<DateTime<Utc>> {
    parse_timestamp(input, offset, DayBound::End).map_err(|_| WebServerError::validation("Invalid due date"))
}

fn parse_priority(input: Option<&str>) -> WebServerResult<Option<Priority>> {
    match input.map(str::trim) {
        Some(priority) if !priority.is_empty() => Ok(Some(priority.parse()?)),
        _ => Ok(None),
    }
}

fn parse_note(input: Option<&str>) -> WebServerResult<Option<String>> {
    let Some(note) = input.map(str::trim).filter(|note| !note.is_empty()) else {
        return Ok(None);
    };

    if note.chars().count() > MAX_NOTE_LEN {
        return Err(WebServerError::validation(format!(
            "Note must be at most {MAX_NOTE_LEN} characters"
        )));
    }
    Ok(Some(note.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap()
    }

    fn create_request() -> CreateOrderRequest {
        CreateOrderRequest {
            pages: Some(3),
            due_date: Some("2025-03-16T14:30".to_string()),
            ..CreateOrderRequest::default()
        }
    }

    #[test]
    fn test_draft_defaults() {
        let draft = OrderDraft::from_request(&create_request(), utc()).unwrap();
        assert_eq!(draft.order_number(), None);

        let order = draft.into_order("7123456".to_string(), now());
        assert_eq!(order.order_number, "7123456");
        assert_eq!(order.pages, 3);
        assert_eq!(order.priority, Priority::Low);
        assert_eq!(order.due_date, Utc.with_ymd_and_hms(2025, 3, 16, 14, 30, 0).unwrap());
        assert!(order.is_unassigned());
        assert!(!order.completed);
        assert_eq!(order.created_at, now());
        assert_eq!(order.updated_at, now());
    }

    #[test]
    fn test_draft_keeps_client_order_number() {
        let request = CreateOrderRequest {
            order_number: Some(" 7985733 ".to_string()),
            priority: Some("High".to_string()),
            assigned_to: Some("  Mwambire ".to_string()),
            note: Some("Pending revision".to_string()),
            ..create_request()
        };
        let order = OrderDraft::from_request(&request, utc()).unwrap().into_order("7000000".to_string(), now());

        assert_eq!(order.order_number, "7985733");
        assert_eq!(order.priority, Priority::High);
        assert_eq!(order.assigned_to, "Mwambire");
        assert_eq!(order.note.as_deref(), Some("Pending revision"));
    }

    #[test]
    fn test_missing_fields_are_named_together() {
        let error = OrderDraft::from_request(&CreateOrderRequest::default(), utc()).unwrap_err();
        assert_eq!(error.to_string(), "Missing required fields: pages, dueDate");

        let request = CreateOrderRequest {
            due_date: Some("   ".to_string()),
            ..create_request()
        };
        let error = OrderDraft::from_request(&request, utc()).unwrap_err();
        assert_eq!(error.to_string(), "Missing required fields: dueDate");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        for pages in [0, -4, i64::from(u32::MAX) + 1] {
            let request = CreateOrderRequest {
                pages: Some(pages),
                ..create_request()
            };
            assert!(OrderDraft::from_request(&request, utc()).is_err(), "pages {pages}");
        }

        let bad_number = CreateOrderRequest {
            order_number: Some("72-27".to_string()),
            ..create_request()
        };
        assert!(OrderDraft::from_request(&bad_number, utc()).is_err());

        let bad_priority = CreateOrderRequest {
            priority: Some("urgent".to_string()),
            ..create_request()
        };
        assert!(OrderDraft::from_request(&bad_priority, utc()).is_err());

        let long_note = CreateOrderRequest {
            note: Some("x".repeat(MAX_NOTE_LEN + 1)),
            ..create_request()
        };
        assert!(OrderDraft::from_request(&long_note, utc()).is_err());
    }

    #[test]
    fn test_bare_due_date_is_end_of_day() {
        let request = CreateOrderRequest {
            due_date: Some("2025-03-16".to_string()),
            ..create_request()
        };
        let order = OrderDraft::from_request(&request, utc()).unwrap().into_order("7000001".to_string(), now());
        assert_eq!(order.due_date.date_naive(), chrono::NaiveDate::from_ymd_opt(2025, 3, 16).unwrap());
        assert!(order.due_date > Utc.with_ymd_and_hms(2025, 3, 16, 23, 59, 0).unwrap());
    }

    #[test]
    fn test_patch_updates_only_supplied_fields() {
        let mut order = OrderDraft::from_request(&create_request(), utc())
            .unwrap()
            .into_order("7000001".to_string(), now());
        order.note = Some("Old note".to_string());

        let request = UpdateOrderRequest {
            priority: Some("medium".to_string()),
            assigned_to: Some("unassigned".to_string()),
            note: Some(String::new()),
            ..UpdateOrderRequest::default()
        };
        let later = now() + Duration::minutes(5);
        OrderPatch::from_request(&request, utc()).unwrap().apply(&mut order, later);

        assert_eq!(order.priority, Priority::Medium);
        assert!(order.is_unassigned());
        assert_eq!(order.note, None);
        assert_eq!(order.pages, 3);
        assert_eq!(order.order_number, "7000001");
        assert_eq!(order.created_at, now());
        assert_eq!(order.updated_at, later);
    }

    #[test]
    fn test_empty_patch_is_rejected() {
        let error = OrderPatch::from_request(&UpdateOrderRequest::default(), utc()).unwrap_err();
        assert_eq!(error.to_string(), "No fields to update");
    }

    #[test]
    fn test_toggle_flips_and_touches() {
        let mut order = OrderDraft::from_request(&create_request(), utc())
            .unwrap()
            .into_order("7000001".to_string(), now());
        let later = now() + Duration::hours(1);

        toggle_completed(&mut order, later);
        assert!(order.completed);
        assert_eq!(order.updated_at, later);

        toggle_completed(&mut order, later);
        assert!(!order.completed);
    }
}
