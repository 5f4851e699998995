//! Liveness probe

use axum::{extract::State, response::Json};
use serde_json::{Value, json};

use crate::traits::{OrderStore, UserStore};
use crate::webserver_impl::WebServer;

/// `GET /health`
pub async fn health_check<O, U>(State(webserver): State<WebServer<O, U>>) -> Json<Value>
where
    O: OrderStore + 'static,
    U: UserStore + 'static,
{
    let state = webserver.state();

    Json(json!({
        "status": if state.is_running() { "ok" } else { "stopping" },
        "uptimeSeconds": state.get_uptime_seconds(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
