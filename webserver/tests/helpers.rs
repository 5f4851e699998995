//! Test helper utilities for order tracker integration tests
#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use shared::{Role, User, UserId};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceExt;

use order_tracker::{
    InMemoryOrderStore, InMemoryUserStore, OrderStore, PasswordHasher, ServerConfig, UserStore, WebServer,
    WebServerResult,
};

pub const TEST_SECRET: &str = "integration-test-secret-key";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin-password";
pub const USER_EMAIL: &str = "jecinta@example.com";
pub const USER_PASSWORD: &str = "writer-password";

/// Reversible "hash" so integration tests skip Argon2's cost
pub struct PlainTextHasher;

impl PasswordHasher for PlainTextHasher {
    fn hash(&self, password: &str) -> WebServerResult<String> {
        Ok(format!("plain:{password}"))
    }

    fn verify(&self, password: &str, digest: &str) -> WebServerResult<bool> {
        Ok(digest == format!("plain:{password}"))
    }
}

pub struct TestApp<O: OrderStore> {
    pub router: Router,
    pub orders: Arc<O>,
    pub users: Arc<InMemoryUserStore>,
}

pub fn test_config() -> ServerConfig {
    let bind_addr: SocketAddr = "127.0.0.1:3000".parse().unwrap();
    ServerConfig::new(bind_addr, TEST_SECRET).unwrap()
}

/// App over in-memory stores with an admin and a regular user
pub async fn spawn_app() -> TestApp<InMemoryOrderStore> {
    spawn_app_with_orders(InMemoryOrderStore::new()).await
}

/// App over the given order store with an admin and a regular user
pub async fn spawn_app_with_orders<O: OrderStore + 'static>(orders: O) -> TestApp<O> {
    let orders = Arc::new(orders);
    let users = Arc::new(InMemoryUserStore::new());

    let now = Utc::now();
    create_user(&users, ADMIN_EMAIL, "admin", ADMIN_PASSWORD, Role::Admin, now - Duration::minutes(10)).await;
    create_user(&users, USER_EMAIL, "Jecinta", USER_PASSWORD, Role::User, now - Duration::minutes(5)).await;

    let webserver = WebServer::new(&test_config(), orders.clone(), users.clone(), Arc::new(PlainTextHasher));

    TestApp {
        router: webserver.build_router(),
        orders,
        users,
    }
}

pub async fn create_user(
    users: &InMemoryUserStore,
    email: &str,
    username: &str,
    password: &str,
    role: Role,
    created_at: DateTime<Utc>,
) -> User {
    users
        .insert(User {
            id: UserId::new(),
            email: email.to_string(),
            username: username.to_string(),
            role,
            password_digest: PlainTextHasher.hash(password).unwrap(),
            created_at,
            updated_at: created_at,
        })
        .await
        .unwrap()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).unwrap()
    }

    pub fn error(&self) -> String {
        self.json()["error"].as_str().unwrap().to_string()
    }

    pub fn header(&self, name: header::HeaderName) -> String {
        self.headers.get(name).unwrap().to_str().unwrap().to_string()
    }
}

pub async fn send(router: &Router, request: Request<Body>) -> TestResponse {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();

    TestResponse { status, headers, body }
}

pub fn json_request(method: Method, uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: Method, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// Log in and return the `session=...` pair to send back as a Cookie header
pub async fn login(router: &Router, email: &str, password: &str) -> String {
    let response = send(
        router,
        json_request(
            Method::POST,
            "/api/auth/login",
            None,
            serde_json::json!({ "email": email, "password": password }),
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.text());

    response
        .header(header::SET_COOKIE)
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

pub async fn login_admin(router: &Router) -> String {
    login(router, ADMIN_EMAIL, ADMIN_PASSWORD).await
}

pub async fn login_user(router: &Router) -> String {
    login(router, USER_EMAIL, USER_PASSWORD).await
}

/// Helper to wait for async conditions with timeout
pub async fn wait_for_condition<F, Fut>(mut condition: F, timeout_ms: u64) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let start = std::time::Instant::now();
    let timeout = std::time::Duration::from_millis(timeout_ms);

    loop {
        if condition().await {
            return true;
        }

        if start.elapsed() > timeout {
            return false;
        }

        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
}
