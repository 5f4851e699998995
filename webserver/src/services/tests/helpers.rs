//! Test helpers for webserver service tests

use std::path::PathBuf;
use tempfile::TempDir;

use crate::config::StorageBackend;
use crate::traits::OrderStore;

/// Temporary data directory laid out the way the server opens it
pub struct TestDataDir {
    dir: TempDir,
}

impl TestDataDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn storage(&self) -> StorageBackend {
        StorageBackend::JsonFiles {
            data_dir: self.dir.path().to_path_buf(),
        }
    }

    pub fn orders_path(&self) -> PathBuf {
        self.storage().orders_path().unwrap()
    }

    pub fn users_path(&self) -> PathBuf {
        self.storage().users_path().unwrap()
    }
}

/// Order numbers in listing order
pub async fn listed_numbers<O: OrderStore + ?Sized>(store: &O) -> Vec<String> {
    store
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|order| order.order_number)
        .collect()
}
