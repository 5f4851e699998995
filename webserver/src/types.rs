//! Type definitions for webserver
//!
//! Request and response bodies exchanged with browser clients. Fields are
//! optional where the handlers report missing values themselves.

use serde::{Deserialize, Serialize};
use shared::{OrderId, UserSummary};

/// Body of `POST /api/orders`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub order_number: Option<String>,
    pub pages: Option<i64>,
    pub due_date: Option<String>,
    pub priority: Option<String>,
    pub assigned_to: Option<String>,
    pub note: Option<String>,
    pub completed: Option<bool>,
}

/// Body of `PUT /api/orders/:id`; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    pub order_number: Option<String>,
    pub pages: Option<i64>,
    pub due_date: Option<String>,
    pub priority: Option<String>,
    pub assigned_to: Option<String>,
    /// An empty note clears the stored one
    pub note: Option<String>,
    pub completed: Option<bool>,
}

/// Body of `POST /api/reports`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub assignee: Option<String>,
    pub completed: Option<bool>,
}

/// Body of `POST /api/reports/export`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    #[serde(flatten)]
    pub report: ReportRequest,
    #[serde(default)]
    pub selected: Vec<OrderId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Body of `POST /api/members`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewMemberRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub role: Option<String>,
    pub password: Option<String>,
}

/// Response to a successful login or registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub success: bool,
    pub user: UserSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
