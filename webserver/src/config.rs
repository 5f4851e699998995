//! Server configuration
//!
//! Built from command line arguments and environment variables in `main`, and
//! validated before any service is constructed.

use chrono::{Duration, FixedOffset};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::core::OverdueRule;
use crate::error::{WebServerError, WebServerResult};

/// Shortest accepted session signing secret, in bytes
pub const MIN_SECRET_LEN: usize = 16;

/// Session lifetime, matching the cookie Max-Age
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

/// Where order and user records are kept
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    InMemory,
    JsonFiles { data_dir: PathBuf },
}

impl StorageBackend {
    pub fn orders_path(&self) -> Option<PathBuf> {
        match self {
            StorageBackend::InMemory => None,
            StorageBackend::JsonFiles { data_dir } => Some(data_dir.join("orders.json")),
        }
    }

    pub fn users_path(&self) -> Option<PathBuf> {
        match self {
            StorageBackend::InMemory => None,
            StorageBackend::JsonFiles { data_dir } => Some(data_dir.join("users.json")),
        }
    }
}

/// Session cookie and token settings
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub secret: Vec<u8>,
    pub ttl: Duration,
    pub secure_cookies: bool,
}

/// Validated configuration for the whole server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: SocketAddr,
    pub storage: StorageBackend,
    pub session: SessionConfig,
    pub overdue_rule: OverdueRule,
    pub utc_offset: FixedOffset,
}

impl ServerConfig {
    /// Create a configuration with defaults for everything except the secret
    pub fn new(bind_address: SocketAddr, jwt_secret: &str) -> WebServerResult<Self> {
        if jwt_secret.len() < MIN_SECRET_LEN {
            return Err(WebServerError::config(format!(
                "JWT secret must be at least {MIN_SECRET_LEN} bytes"
            )));
        }

        Ok(Self {
            bind_address,
            storage: StorageBackend::InMemory,
            session: SessionConfig {
                secret: jwt_secret.as_bytes().to_vec(),
                ttl: Duration::hours(DEFAULT_SESSION_TTL_HOURS),
                secure_cookies: false,
            },
            overdue_rule: OverdueRule::PastDay,
            utc_offset: FixedOffset::east_opt(0).ok_or_else(|| WebServerError::config("UTC offset"))?,
        })
    }

    pub fn with_storage(mut self, storage: StorageBackend) -> Self {
        self.storage = storage;
        self
    }

    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.session.secure_cookies = secure;
        self
    }

    /// Switch the overdue threshold to `due < now + buffer`
    pub fn with_overdue_buffer_minutes(mut self, minutes: Option<i64>) -> WebServerResult<Self> {
        if let Some(minutes) = minutes {
            if minutes < 0 {
                return Err(WebServerError::config("Overdue buffer must not be negative"));
            }
            let buffer = Duration::try_minutes(minutes)
                .ok_or_else(|| WebServerError::config(format!("Overdue buffer out of range: {minutes} minutes")))?;
            self.overdue_rule = OverdueRule::Buffer(buffer);
        }
        Ok(self)
    }

    pub fn with_utc_offset_minutes(mut self, minutes: i32) -> WebServerResult<Self> {
        self.utc_offset = shared::time::offset_from_minutes(minutes)
            .ok_or_else(|| WebServerError::config(format!("Invalid UTC offset: {minutes} minutes")))?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> SocketAddr {
        "127.0.0.1:8080".parse().unwrap()
    }

    #[test]
    fn test_rejects_short_secret() {
        assert!(ServerConfig::new(addr(), "short").is_err());
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::new(addr(), "a-sufficiently-long-secret").unwrap();
        assert_eq!(config.storage, StorageBackend::InMemory);
        assert_eq!(config.overdue_rule, OverdueRule::PastDay);
        assert_eq!(config.session.ttl, Duration::hours(24));
        assert!(!config.session.secure_cookies);
    }

    #[test]
    fn test_overdue_buffer_switches_rule() {
        let config = ServerConfig::new(addr(), "a-sufficiently-long-secret")
            .unwrap()
            .with_overdue_buffer_minutes(Some(120))
            .unwrap();
        assert_eq!(config.overdue_rule, OverdueRule::Buffer(Duration::minutes(120)));

        let negative = ServerConfig::new(addr(), "a-sufficiently-long-secret")
            .unwrap()
            .with_overdue_buffer_minutes(Some(-5));
        assert!(negative.is_err());
    }

    #[test]
    fn test_overdue_buffer_out_of_range() {
        let result = ServerConfig::new(addr(), "a-sufficiently-long-secret")
            .unwrap()
            .with_overdue_buffer_minutes(Some(i64::MAX));
        assert!(matches!(result, Err(WebServerError::Config(_))));
    }

    #[test]
    fn test_invalid_offset() {
        let result = ServerConfig::new(addr(), "a-sufficiently-long-secret")
            .unwrap()
            .with_utc_offset_minutes(24 * 60);
        assert!(result.is_err());
    }

    #[test]
    fn test_json_file_paths() {
        let storage = StorageBackend::JsonFiles { data_dir: PathBuf::from("/tmp/tracker") };
        assert_eq!(storage.orders_path(), Some(PathBuf::from("/tmp/tracker/orders.json")));
        assert_eq!(StorageBackend::InMemory.users_path(), None);
    }
}
