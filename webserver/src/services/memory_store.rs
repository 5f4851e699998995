//! In-memory store implementations
//!
//! Records live in a vector behind a `tokio::sync::RwLock`, so insertion order
//! is the listing order. The record helpers are shared with the JSON file
//! stores, which apply them to a copy before persisting.

use async_trait::async_trait;
use shared::{Order, OrderId, User};
use tokio::sync::RwLock;

use crate::error::{WebServerError, WebServerResult};
use crate::traits::{Modified, OrderChange, OrderStore, UserStore};

/// Uniqueness-checked mutations over a record vector
pub(crate) mod records {
    use super::*;

    pub fn insert_order(orders: &mut Vec<Order>, order: Order) -> WebServerResult<Order> {
        if orders.iter().any(|existing| existing.id == order.id) {
            return Err(WebServerError::conflict(format!("Order {} already exists", order.id)));
        }
        if orders.iter().any(|existing| existing.order_number == order.order_number) {
            return Err(duplicate_order_number(&order.order_number));
        }
        orders.push(order.clone());
        Ok(order)
    }

    /// Edit a copy of the order, then swap it in if the order number is still unique
    pub fn modify_order(orders: &mut [Order], id: OrderId, change: OrderChange) -> WebServerResult<Option<Modified>> {
        let Some(index) = orders.iter().position(|order| order.id == id) else {
            return Ok(None);
        };

        let mut order = orders[index].clone();
        if !change(&mut order) {
            return Ok(Some(Modified { order, changed: false }));
        }

        if orders
            .iter()
            .any(|existing| existing.id != id && existing.order_number == order.order_number)
        {
            return Err(duplicate_order_number(&order.order_number));
        }

        orders[index] = order.clone();
        Ok(Some(Modified { order, changed: true }))
    }

    pub fn delete_order(orders: &mut Vec<Order>, id: OrderId) -> bool {
        let before = orders.len();
        orders.retain(|order| order.id != id);
        orders.len() != before
    }

    pub fn insert_user(users: &mut Vec<User>, user: User) -> WebServerResult<User> {
        if users.iter().any(|existing| existing.email.eq_ignore_ascii_case(&user.email)) {
            return Err(WebServerError::conflict("Email already registered"));
        }
        if users
            .iter()
            .any(|existing| existing.username.eq_ignore_ascii_case(&user.username))
        {
            return Err(WebServerError::conflict("Username already taken"));
        }
        users.push(user.clone());
        Ok(user)
    }

    /// Reject a loaded snapshot that breaks order-number uniqueness
    pub fn check_unique_orders(orders: &[Order]) -> WebServerResult<()> {
        let mut seen = std::collections::HashSet::new();
        for order in orders {
            if !seen.insert(order.order_number.as_str()) {
                return Err(duplicate_order_number(&order.order_number));
            }
        }
        Ok(())
    }

    fn duplicate_order_number(order_number: &str) -> WebServerError {
        WebServerError::conflict(format!("Order number {order_number} already exists"))
    }
}

/// Order store kept entirely in memory
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<Vec<Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing orders; duplicate order numbers are rejected
    pub fn with_orders(orders: Vec<Order>) -> WebServerResult<Self> {
        records::check_unique_orders(&orders)?;
        Ok(Self {
            orders: RwLock::new(orders),
        })
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, order: Order) -> WebServerResult<Order> {
        records::insert_order(&mut *self.orders.write().await, order)
    }

    async fn get(&self, id: OrderId) -> WebServerResult<Option<Order>> {
        Ok(self.orders.read().await.iter().find(|order| order.id == id).cloned())
    }

    async fn list(&self) -> WebServerResult<Vec<Order>> {
        Ok(self.orders.read().await.clone())
    }

    async fn modify(&self, id: OrderId, change: OrderChange) -> WebServerResult<Option<Modified>> {
        records::modify_order(&mut self.orders.write().await, id, change)
    }

    async fn delete(&self, id: OrderId) -> WebServerResult<bool> {
        Ok(records::delete_order(&mut *self.orders.write().await, id))
    }
}

/// User store kept entirely in memory
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: User) -> WebServerResult<User> {
        records::insert_user(&mut *self.users.write().await, user)
    }

    async fn find_by_email(&self, email: &str) -> WebServerResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|user| user.email.eq_ignore_ascii_case(email.trim()))
            .cloned())
    }

    async fn list(&self) -> WebServerResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }
}
