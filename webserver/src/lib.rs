//! Order tracker web service
//!
//! A JSON HTTP API for tracking writing orders through a todo-style workflow,
//! with dashboard status counts, date-ranged reports with CSV export, and
//! cookie-based sessions.

pub mod config;
pub mod core;
pub mod error;
pub mod services;
pub mod state;
pub mod traits;
pub mod types;
pub mod web;
pub mod webserver_impl;

// Re-export main types
pub use config::{ServerConfig, StorageBackend};
pub use error::{WebServerError, WebServerResult};
pub use state::WebServerState;
pub use webserver_impl::WebServer;

// Re-export trait definitions
pub use traits::{OrderStore, PasswordHasher, UserStore};

// Re-export service implementations
pub use services::{Argon2PasswordHasher, FileOrderStore, FileUserStore, InMemoryOrderStore, InMemoryUserStore};
