//! Order records and the value types they are built from

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::SharedError;

/// Label shown wherever an order has no assignee
pub const UNASSIGNED_LABEL: &str = "Unassigned";

/// Unique identifier for orders
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for OrderId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrderId {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| SharedError::InvalidUuid { input: s.to_string() })
    }
}

/// Order priority, ordered low < medium < high
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    #[serde(alias = "Low", alias = "LOW")]
    Low,
    #[serde(alias = "Medium", alias = "MEDIUM")]
    Medium,
    #[serde(alias = "High", alias = "HIGH")]
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(SharedError::InvalidPriority { input: s.to_string() }),
        }
    }
}

/// Completion filter for order listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    #[serde(alias = "all")]
    Any,
    Completed,
    #[serde(alias = "inProgress", alias = "in-progress")]
    InProgress,
}

impl StatusFilter {
    /// Whether an order with the given completion flag passes this filter
    pub fn matches(&self, completed: bool) -> bool {
        match self {
            StatusFilter::Any => true,
            StatusFilter::Completed => completed,
            StatusFilter::InProgress => !completed,
        }
    }
}

/// A tracked writing task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub order_number: String,
    pub pages: u32,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub assigned_to: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn is_unassigned(&self) -> bool {
        self.assigned_to.is_empty()
    }

    /// Assignee as displayed to people, with the unassigned label substituted
    pub fn assignee_label(&self) -> &str {
        if self.is_unassigned() {
            UNASSIGNED_LABEL
        } else {
            &self.assigned_to
        }
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

/// Normalize free-text assignee input; blank and "unassigned" map to the empty sentinel
pub fn normalize_assignee(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case(UNASSIGNED_LABEL) {
        String::new()
    } else {
        trimmed.to_string()
    }
}

/// Validate a human-facing order number (non-empty, digits only)
pub fn validate_order_number(input: &str) -> Result<String, SharedError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(SharedError::InvalidOrderNumber { input: input.to_string() });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_parsing_is_case_insensitive() {
        assert_eq!("High".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!(" medium ".parse::<Priority>().unwrap(), Priority::Medium);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
    }

    #[test]
    fn test_priority_accepts_capitalized_json() {
        let parsed: Priority = serde_json::from_str("\"Medium\"").unwrap();
        assert_eq!(parsed, Priority::Medium);
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
    }

    #[test]
    fn test_status_filter_sentinels() {
        let any: StatusFilter = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(any, StatusFilter::Any);
        let in_progress: StatusFilter = serde_json::from_str("\"in_progress\"").unwrap();
        assert!(in_progress.matches(false));
        assert!(!in_progress.matches(true));
        assert!(StatusFilter::Completed.matches(true));
    }

    #[test]
    fn test_normalize_assignee() {
        assert_eq!(normalize_assignee("  Jecinta "), "Jecinta");
        assert_eq!(normalize_assignee("unassigned"), "");
        assert_eq!(normalize_assignee("   "), "");
    }

    #[test]
    fn test_validate_order_number() {
        assert_eq!(validate_order_number(" 7227442 ").unwrap(), "7227442");
        assert!(validate_order_number("72a7").is_err());
        assert!(validate_order_number("").is_err());
    }

    #[test]
    fn test_order_serializes_camel_case() {
        let now = Utc::now();
        let order = Order {
            id: OrderId::new(),
            order_number: "7985733".to_string(),
            pages: 1,
            due_date: now,
            priority: Priority::High,
            assigned_to: String::new(),
            note: None,
            completed: false,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["orderNumber"], "7985733");
        assert_eq!(json["assignedTo"], "");
        assert_eq!(order.assignee_label(), UNASSIGNED_LABEL);
    }
}
