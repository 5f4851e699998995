//! Service trait definitions for dependency injection
//!
//! Storage and password hashing are abstracted through these traits so the
//! handlers and core logic can run against in-memory fakes and mocks.

use async_trait::async_trait;
use shared::{Order, OrderId, User};

use crate::error::WebServerResult;

/// In-place edit of one order; returns whether anything changed
pub type OrderChange = Box<dyn FnOnce(&mut Order) -> bool + Send>;

/// Outcome of [`OrderStore::modify`]
#[derive(Debug, Clone, PartialEq)]
pub struct Modified {
    pub order: Order,
    pub changed: bool,
}

/// Persistent collection of orders
///
/// Implementations keep insertion order and enforce order-number uniqueness.
#[mockall::automock]
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Insert a new order; fails with a conflict if the order number is taken
    async fn insert(&self, order: Order) -> WebServerResult<Order>;

    /// Fetch an order by id
    async fn get(&self, id: OrderId) -> WebServerResult<Option<Order>>;

    /// All orders in insertion order
    async fn list(&self) -> WebServerResult<Vec<Order>>;

    /// Apply `change` to the stored order under the store's write lock
    ///
    /// `None` when no order has this id. A change that reports `false` is
    /// not written; one that takes a used order number fails with a conflict.
    async fn modify(&self, id: OrderId, change: OrderChange) -> WebServerResult<Option<Modified>>;

    /// Remove an order permanently, reporting whether it existed
    async fn delete(&self, id: OrderId) -> WebServerResult<bool>;
}

/// Persistent collection of team members
#[mockall::automock]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user; fails with a conflict on duplicate email or username
    async fn insert(&self, user: User) -> WebServerResult<User>;

    /// Case-insensitive lookup by email
    async fn find_by_email(&self, email: &str) -> WebServerResult<Option<User>>;

    async fn list(&self) -> WebServerResult<Vec<User>>;
}

/// Password hashing algorithm
#[mockall::automock]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing digest
    fn hash(&self, password: &str) -> WebServerResult<String>;

    /// Check a plaintext password against a stored digest
    fn verify(&self, password: &str, digest: &str) -> WebServerResult<bool>;
}
