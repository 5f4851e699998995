//! Order CRUD, completion toggle and dashboard counts

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use shared::{Order, OrderId, ProcessId, process_info};
use std::collections::HashSet;

use crate::core::{OrderDraft, OrderPatch, Page, StatusSummary, TableQuery, pick_unused, toggle_completed};
use crate::error::{WebServerError, WebServerResult};
use crate::services::spawn_escalation;
use crate::traits::{OrderChange, OrderStore, UserStore};
use crate::types::{CreateOrderRequest, SuccessResponse, UpdateOrderRequest};
use crate::web::extract::{JsonBody, QueryParams};
use crate::webserver_impl::WebServer;

/// `GET /api/orders`: filtered, sorted page of orders
///
/// Also kicks off escalation of orders due today without waiting for it.
pub async fn list_orders<O, U>(
    State(webserver): State<WebServer<O, U>>,
    QueryParams(query): QueryParams<TableQuery>,
) -> WebServerResult<Json<Page<Order>>>
where
    O: OrderStore + 'static,
    U: UserStore + 'static,
{
    let orders = webserver.orders().list().await?;
    spawn_escalation(webserver.orders().clone(), *webserver.classifier(), Utc::now());

    Ok(Json(query.apply(orders)))
}

/// `POST /api/orders`
pub async fn create_order<O, U>(
    State(webserver): State<WebServer<O, U>>,
    JsonBody(request): JsonBody<CreateOrderRequest>,
) -> WebServerResult<(StatusCode, Json<Order>)>
where
    O: OrderStore + 'static,
    U: UserStore + 'static,
{
    let draft = OrderDraft::from_request(&request, webserver.utc_offset())?;

    let order_number = match draft.order_number() {
        Some(number) => number.to_string(),
        None => {
            let existing = webserver.orders().list().await?;
            let taken: HashSet<&str> = existing.iter().map(|order| order.order_number.as_str()).collect();
            pick_unused(&mut rand::thread_rng(), |candidate| taken.contains(candidate))?
        }
    };

    let order = webserver
        .orders()
        .insert(draft.into_order(order_number, Utc::now()))
        .await?;

    process_info!(ProcessId::current(), "📝 Created order {}", order.order_number);
    Ok((StatusCode::CREATED, Json(order)))
}

/// `GET /api/orders/:id`
pub async fn get_order<O, U>(
    State(webserver): State<WebServer<O, U>>,
    Path(id): Path<String>,
) -> WebServerResult<Json<Order>>
where
    O: OrderStore + 'static,
    U: UserStore + 'static,
{
    Ok(Json(fetch(&webserver, &id).await?))
}

/// `PUT /api/orders/:id`
pub async fn update_order<O, U>(
    State(webserver): State<WebServer<O, U>>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateOrderRequest>,
) -> WebServerResult<Json<Order>>
where
    O: OrderStore + 'static,
    U: UserStore + 'static,
{
    let patch = OrderPatch::from_request(&request, webserver.utc_offset())?;
    let order_id: OrderId = id.parse()?;
    let now = Utc::now();

    let apply = move |order: &mut Order| {
        patch.apply(order, now);
        true
    };
    let order = edit(&webserver, order_id, Box::new(apply)).await?;

    process_info!(ProcessId::current(), "✏️ Updated order {}", order.order_number);
    Ok(Json(order))
}

/// `DELETE /api/orders/:id`
pub async fn delete_order<O, U>(
    State(webserver): State<WebServer<O, U>>,
    Path(id): Path<String>,
) -> WebServerResult<Json<SuccessResponse>>
where
    O: OrderStore + 'static,
    U: UserStore + 'static,
{
    let order_id: OrderId = id.parse()?;
    if !webserver.orders().delete(order_id).await? {
        return Err(WebServerError::not_found("Order", order_id));
    }

    process_info!(ProcessId::current(), "🗑️ Deleted order {}", order_id);
    Ok(Json(SuccessResponse::ok()))
}

/// `POST /api/orders/:id/toggle`
pub async fn toggle_order<O, U>(
    State(webserver): State<WebServer<O, U>>,
    Path(id): Path<String>,
) -> WebServerResult<Json<Order>>
where
    O: OrderStore + 'static,
    U: UserStore + 'static,
{
    let order_id: OrderId = id.parse()?;
    let now = Utc::now();

    let toggle = move |order: &mut Order| {
        toggle_completed(order, now);
        true
    };
    Ok(Json(edit(&webserver, order_id, Box::new(toggle)).await?))
}

/// `GET /api/stats`
pub async fn order_stats<O, U>(State(webserver): State<WebServer<O, U>>) -> WebServerResult<Json<StatusSummary>>
where
    O: OrderStore + 'static,
    U: UserStore + 'static,
{
    let orders = webserver.orders().list().await?;
    Ok(Json(webserver.classifier().summarize(&orders, Utc::now())))
}

async fn fetch<O, U>(webserver: &WebServer<O, U>, id: &str) -> WebServerResult<Order>
where
    O: OrderStore + 'static,
    U: UserStore + 'static,
{
    let order_id: OrderId = id.parse()?;
    webserver
        .orders()
        .get(order_id)
        .await?
        .ok_or_else(|| WebServerError::not_found("Order", order_id))
}

/// Apply `change` under the store's lock and return the stored result
async fn edit<O, U>(webserver: &WebServer<O, U>, order_id: OrderId, change: OrderChange) -> WebServerResult<Order>
where
    O: OrderStore + 'static,
    U: UserStore + 'static,
{
    webserver
        .orders()
        .modify(order_id, change)
        .await?
        .map(|modified| modified.order)
        .ok_or_else(|| WebServerError::not_found("Order", order_id))
}
