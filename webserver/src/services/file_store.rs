//! JSON file store implementations
//!
//! Each collection is one pretty-printed JSON array. The whole array is loaded
//! at startup and rewritten after every mutation with a temp file and rename,
//! so a crash never leaves a half-written snapshot behind. Entries that fail
//! to decode are kept aside and written back unchanged on every save.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{Order, OrderId, ProcessId, User, process_debug, process_info, process_warn};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;

use super::memory_store::records;
use crate::error::{WebServerError, WebServerResult};
use crate::traits::{Modified, OrderChange, OrderStore, UserStore};

/// Contents of a collection file
#[derive(Debug)]
pub struct Loaded<T> {
    pub records: Vec<T>,
    /// Raw entries that did not decode as `T`
    pub rejected: Vec<Value>,
}

/// Load a JSON array of records, setting aside entries that fail to decode
///
/// A missing file is an empty collection.
pub async fn load_records<T: DeserializeOwned>(path: &Path) -> WebServerResult<Loaded<T>> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(Loaded { records: Vec::new(), rejected: Vec::new() });
        }
        Err(e) => return Err(WebServerError::storage("load", format!("{}: {e}", path.display()))),
    };

    if content.trim().is_empty() {
        return Ok(Loaded { records: Vec::new(), rejected: Vec::new() });
    }

    let raw: Vec<Value> = serde_json::from_str(&content)
        .map_err(|e| WebServerError::storage("load", format!("{}: {e}", path.display())))?;

    let total = raw.len();
    let mut decoded = Vec::with_capacity(total);
    let mut rejected = Vec::new();
    for (index, value) in raw.into_iter().enumerate() {
        match T::deserialize(&value) {
            Ok(record) => decoded.push(record),
            Err(e) => {
                process_warn!(
                    ProcessId::current(),
                    "⚠️ Skipping record {} in {}: {}",
                    index,
                    path.display(),
                    e
                );
                rejected.push(value);
            }
        }
    }

    process_debug!(
        ProcessId::current(),
        "📂 Loaded {}/{} records from {}",
        decoded.len(),
        total,
        path.display()
    );
    Ok(Loaded { records: decoded, rejected })
}

/// Atomically replace `path` with `records` followed by the `rejected` raw entries
pub async fn save_records<T: Serialize>(path: &Path, records: &[T], rejected: &[Value]) -> WebServerResult<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| WebServerError::storage("save", e))?;
    }

    let mut entries = records
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<Value>, _>>()?;
    entries.extend(rejected.iter().cloned());

    let content = serde_json::to_string_pretty(&entries)?;
    let temp_path = path.with_extension("json.tmp");

    fs::write(&temp_path, content)
        .await
        .map_err(|e| WebServerError::storage("save", e))?;
    fs::rename(&temp_path, path)
        .await
        .map_err(|e| WebServerError::storage("save", e))?;

    Ok(())
}

/// Order store backed by a JSON file
#[derive(Debug)]
pub struct FileOrderStore {
    path: PathBuf,
    orders: RwLock<Vec<Order>>,
    rejected: Vec<Value>,
}

impl FileOrderStore {
    /// Open (or create on first write) the orders file at `path`
    pub async fn open(path: impl Into<PathBuf>) -> WebServerResult<Self> {
        let path = path.into();
        let Loaded { records: orders, rejected } = load_records::<Order>(&path).await?;
        records::check_unique_orders(&orders)?;

        process_info!(
            ProcessId::current(),
            "📦 Order store opened at {} ({} orders, {} unreadable)",
            path.display(),
            orders.len(),
            rejected.len()
        );
        Ok(Self {
            path,
            orders: RwLock::new(orders),
            rejected,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `mutation` to a copy and, when it reports a change, persist then publish it
    async fn mutate<R>(
        &self,
        mutation: impl FnOnce(&mut Vec<Order>) -> WebServerResult<(R, bool)>,
    ) -> WebServerResult<R> {
        let mut orders = self.orders.write().await;
        let mut next = orders.clone();
        let (result, changed) = mutation(&mut next)?;
        if changed {
            save_records(&self.path, &next, &self.rejected).await?;
            *orders = next;
        }
        Ok(result)
    }
}

#[async_trait]
impl OrderStore for FileOrderStore {
    async fn insert(&self, order: Order) -> WebServerResult<Order> {
        self.mutate(|orders| records::insert_order(orders, order).map(|order| (order, true)))
            .await
    }

    async fn get(&self, id: OrderId) -> WebServerResult<Option<Order>> {
        Ok(self.orders.read().await.iter().find(|order| order.id == id).cloned())
    }

    async fn list(&self) -> WebServerResult<Vec<Order>> {
        Ok(self.orders.read().await.clone())
    }

    async fn modify(&self, id: OrderId, change: OrderChange) -> WebServerResult<Option<Modified>> {
        self.mutate(|orders| {
            let modified = records::modify_order(orders, id, change)?;
            let changed = modified.as_ref().is_some_and(|modified| modified.changed);
            Ok((modified, changed))
        })
        .await
    }

    async fn delete(&self, id: OrderId) -> WebServerResult<bool> {
        self.mutate(|orders| {
            let removed = records::delete_order(orders, id);
            Ok((removed, removed))
        })
        .await
    }
}

/// User store backed by a JSON file
#[derive(Debug)]
pub struct FileUserStore {
    path: PathBuf,
    users: RwLock<Vec<User>>,
    rejected: Vec<Value>,
}

impl FileUserStore {
    pub async fn open(path: impl Into<PathBuf>) -> WebServerResult<Self> {
        let path = path.into();
        let Loaded { records: users, rejected } = load_records::<User>(&path).await?;

        process_info!(
            ProcessId::current(),
            "👥 User store opened at {} ({} users, {} unreadable)",
            path.display(),
            users.len(),
            rejected.len()
        );
        Ok(Self {
            path,
            users: RwLock::new(users),
            rejected,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl UserStore for FileUserStore {
    async fn insert(&self, user: User) -> WebServerResult<User> {
        let mut users = self.users.write().await;
        let mut next = users.clone();
        let user = records::insert_user(&mut next, user)?;
        save_records(&self.path, &next, &self.rejected).await?;
        *users = next;
        Ok(user)
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
