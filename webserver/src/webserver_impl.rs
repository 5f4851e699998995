//! Main webserver implementation
//!
//! The WebServer struct owns the injected stores and services and builds the
//! Axum router. Handlers receive a clone of it as router state.

use axum::{
    Router, middleware,
    routing::{get, post},
};
use chrono::FixedOffset;
use shared::{ProcessId, logging, process_info};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::core::StatusClassifier;
use crate::error::{WebServerError, WebServerResult};
use crate::services::SessionManager;
use crate::state::WebServerState;
use crate::traits::{OrderStore, PasswordHasher, UserStore};
use crate::web::handlers::{auth, health, members, orders, reports};
use crate::web::middleware::require_session;

/// Main webserver struct with dependency injection
pub struct WebServer<O, U>
where
    O: OrderStore,
    U: UserStore,
{
    state: Arc<WebServerState>,
    orders: Arc<O>,
    users: Arc<U>,
    hasher: Arc<dyn PasswordHasher>,
    sessions: Arc<SessionManager>,
    classifier: StatusClassifier,
}

impl<O, U> Clone for WebServer<O, U>
where
    O: OrderStore,
    U: UserStore,
{
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            orders: self.orders.clone(),
            users: self.users.clone(),
            hasher: self.hasher.clone(),
            sessions: self.sessions.clone(),
            classifier: self.classifier,
        }
    }
}

impl<O, U> WebServer<O, U>
where
    O: OrderStore + 'static,
    U: UserStore + 'static,
{
    /// Create a new webserver with dependency injection
    pub fn new(config: &ServerConfig, orders: Arc<O>, users: Arc<U>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            state: Arc::new(WebServerState::new(config.bind_address)),
            orders,
            users,
            hasher,
            sessions: Arc::new(SessionManager::new(&config.session)),
            classifier: StatusClassifier::new(config.overdue_rule, config.utc_offset),
        }
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        let protected = Router::new()
            .route("/api/orders", get(orders::list_orders::<O, U>).post(orders::create_order::<O, U>))
            .route(
                "/api/orders/:id",
                get(orders::get_order::<O, U>)
                    .put(orders::update_order::<O, U>)
                    .delete(orders::delete_order::<O, U>),
            )
            .route("/api/orders/:id/toggle", post(orders::toggle_order::<O, U>))
            .route("/api/stats", get(orders::order_stats::<O, U>))
            .route("/api/reports", post(reports::run_report::<O, U>))
            .route("/api/reports/export", post(reports::export_report::<O, U>))
            .route("/api/members", get(members::list_members::<O, U>).post(members::add_member::<O, U>))
            .route_layer(middleware::from_fn_with_state(self.clone(), require_session::<O, U>));

        Router::new()
            .route("/health", get(health::health_check::<O, U>))
            .route("/api/auth/login", post(auth::login::<O, U>))
            .route("/api/auth/register", post(auth::register::<O, U>))
            .route("/api/auth/logout", post(auth::logout::<O, U>))
            .merge(protected)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::permissive()),
            )
            .with_state(self.clone())
    }

    /// Serve until Ctrl+C
    pub async fn run(&self) -> WebServerResult<()> {
        let router = self.build_router();
        let bind_address = self.state.bind_address;

        let listener = tokio::net::TcpListener::bind(bind_address)
            .await
            .map_err(|e| WebServerError::ServerStartup(format!("Failed to bind to {bind_address}: {e}")))?;

        process_info!(ProcessId::current(), "🌐 Order tracker listening on http://{}", bind_address);

        let state = self.state.clone();
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    logging::log_shutdown(ProcessId::current(), "received Ctrl+C");
                }
                state.set_running(false);
            })
            .await
            .map_err(|e| WebServerError::ServerStartup(format!("Server error: {e}")))?;

        Ok(())
    }

    pub fn state(&self) -> &Arc<WebServerState> {
        &self.state
    }

    pub fn orders(&self) -> &Arc<O> {
        &self.orders
    }

    pub fn users(&self) -> &Arc<U> {
        &self.users
    }

    pub fn hasher(&self) -> &Arc<dyn PasswordHasher> {
        &self.hasher
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    pub fn classifier(&self) -> &StatusClassifier {
        &self.classifier
    }

    /// Offset used for calendar days and bare dates
    pub fn utc_offset(&self) -> FixedOffset {
        self.classifier.offset()
    }
}
