//! CSV export of report rows
//!
//! Six fixed columns, dates as `yyyy-MM-dd`. Fields containing commas, quotes
//! or newlines are quoted, so an export can be read back with [`parse_csv`].

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use shared::time::format_day;
use shared::{Order, OrderId, UNASSIGNED_LABEL};
use std::collections::HashSet;

use crate::error::{WebServerError, WebServerResult};

pub const CSV_HEADER: [&str; 6] = ["#Order", "Pages", "Due Date", "Writer", "Status", "Notes"];
pub const STATUS_COMPLETED: &str = "Completed";
pub const STATUS_IN_PROGRESS: &str = "In Progress";
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// One parsed CSV row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub order_number: String,
    pub pages: u32,
    pub due_date: NaiveDate,
    /// Assignee, or empty when the row said "Unassigned"
    pub writer: String,
    pub completed: bool,
    pub note: String,
}

/// Keep the selected orders, in report order
pub fn select_for_export(orders: Vec<Order>, selected: &[OrderId]) -> WebServerResult<Vec<Order>> {
    if orders.is_empty() {
        return Err(WebServerError::validation("No data to export"));
    }
    if selected.is_empty() {
        return Err(WebServerError::validation("Please select at least one order to export"));
    }

    let selected: HashSet<&OrderId> = selected.iter().collect();
    let rows: Vec<Order> = orders.into_iter().filter(|order| selected.contains(&order.id)).collect();

    if rows.is_empty() {
        return Err(WebServerError::validation("No data to export"));
    }
    Ok(rows)
}

/// Render orders as CSV text with the fixed header
pub fn write_csv(orders: &[Order], offset: FixedOffset) -> WebServerResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;

    for order in orders {
        let status = if order.completed { STATUS_COMPLETED } else { STATUS_IN_PROGRESS };
        writer.write_record([
            order.order_number.as_str(),
            &order.pages.to_string(),
            &format_day(order.due_date, offset),
            order.assignee_label(),
            status,
            order.note.as_deref().unwrap_or_default(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| WebServerError::internal(format!("Failed to flush CSV: {e}")))?;
    String::from_utf8(bytes).map_err(|e| WebServerError::internal(format!("CSV is not UTF-8: {e}")))
}

/// Read back CSV produced by [`write_csv`]
pub fn parse_csv(input: &str) -> WebServerResult<Vec<ExportRow>> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(input.as_bytes());

    let headers = reader.headers()?.clone();
    if !headers.iter().eq(CSV_HEADER.iter().copied()) {
        return Err(WebServerError::validation("Unexpected CSV header"));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let field = |index: usize| record.get(index).unwrap_or_default();

        let pages = field(1)
            .parse::<u32>()
            .map_err(|_| WebServerError::validation(format!("Invalid pages value: {}", field(1))))?;
        let due_date = NaiveDate::parse_from_str(field(2), "%Y-%m-%d")
            .map_err(|_| WebServerError::validation(format!("Invalid due date: {}", field(2))))?;
        let completed = match field(4) {
            STATUS_COMPLETED => true,
            STATUS_IN_PROGRESS => false,
            other => return Err(WebServerError::validation(format!("Invalid status: {other}"))),
        };
        let writer = if field(3) == UNASSIGNED_LABEL { String::new() } else { field(3).to_string() };

        rows.push(ExportRow {
            order_number: field(0).to_string(),
            pages,
            due_date,
            writer,
            completed,
            note: field(5).to_string(),
        });
    }

    Ok(rows)
}

/// Download name for a report covering `[start, end]`
pub fn report_filename(start: DateTime<Utc>, end: DateTime<Utc>, offset: FixedOffset) -> String {
    format!(
        "orders_report_{}_to_{}.csv",
        format_day(start, offset),
        format_day(end, offset)
    )
}
