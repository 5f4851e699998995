//! Orders table query: filtering, sorting and pagination

use serde::{Deserialize, Serialize};
use shared::{Order, Priority, StatusFilter, normalize_assignee};
use std::cmp::Ordering;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    OrderNumber,
    Pages,
    DueDate,
    Priority,
    AssignedTo,
    #[default]
    CreatedAt,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Query string of `GET /api/orders`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableQuery {
    pub status: StatusFilter,
    pub priority: Option<Priority>,
    /// Exact, case-insensitive assignee; "unassigned" selects orders without one
    pub assignee: Option<String>,
    pub sort: SortField,
    pub direction: SortDirection,
    /// 1-based page number
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl TableQuery {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    pub fn page_size(&self) -> usize {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    pub fn matches(&self, order: &Order) -> bool {
        if !self.status.matches(order.completed) {
            return false;
        }

        if self.priority.is_some_and(|priority| order.priority != priority) {
            return false;
        }

        match &self.assignee {
            Some(assignee) if !assignee.trim().is_empty() => {
                normalize_assignee(assignee).to_lowercase() == order.assigned_to.to_lowercase()
            }
            _ => true,
        }
    }

    fn compare(&self, a: &Order, b: &Order) -> Ordering {
        let ordering = match self.sort {
            // Order numbers are digit strings; shorter means smaller
            SortField::OrderNumber => a
                .order_number
                .len()
                .cmp(&b.order_number.len())
                .then_with(|| a.order_number.cmp(&b.order_number)),
            SortField::Pages => a.pages.cmp(&b.pages),
            SortField::DueDate => a.due_date.cmp(&b.due_date),
            SortField::Priority => a.priority.cmp(&b.priority),
            SortField::AssignedTo => a.assigned_to.to_lowercase().cmp(&b.assigned_to.to_lowercase()),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        };

        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Filter, sort (stable) and slice out the requested page
    pub fn apply(&self, orders: Vec<Order>) -> Page<Order> {
        let mut rows: Vec<Order> = orders.into_iter().filter(|order| self.matches(order)).collect();
        rows.sort_by(|a, b| self.compare(a, b));

        let total = rows.len();
        let page = self.page();
        let page_size = self.page_size();
        let total_pages = total.div_ceil(page_size);

        let items = rows
            .into_iter()
            .skip((page - 1).saturating_mul(page_size))
            .take(page_size)
            .collect();

        Page {
            items,
            total,
            page,
            page_size,
            total_pages,
        }
    }
}
