//! Service implementations
//!
//! Real implementations of the storage, hashing and session services

pub mod escalation;
pub mod file_store;
pub mod memory_store;
pub mod password;
pub mod session;

#[cfg(test)]
pub mod tests;

// Re-export service implementations
pub use escalation::{escalate_due_today, spawn_escalation};
pub use file_store::{FileOrderStore, FileUserStore};
pub use memory_store::{InMemoryOrderStore, InMemoryUserStore};
pub use password::{Argon2PasswordHasher, hash_password, verify_password};
pub use session::{SESSION_COOKIE, SessionClaims, SessionManager, token_from_headers};
