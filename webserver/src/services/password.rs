//! Argon2id password hashing

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use rand::RngCore;
use std::sync::Arc;
use tokio::task;

use crate::error::{WebServerError, WebServerResult};
use crate::traits::PasswordHasher;

/// Argon2id with the crate's default parameters, producing PHC strings
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> WebServerResult<String> {
        let mut salt_bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut salt_bytes);

        let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| WebServerError::PasswordHashError(e.to_string()))?;

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| WebServerError::PasswordHashError(e.to_string()))
    }

    fn verify(&self, password: &str, digest: &str) -> WebServerResult<bool> {
        let parsed = PasswordHash::new(digest).map_err(|e| WebServerError::PasswordHashError(e.to_string()))?;

        Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
    }
}

/// Hash on the blocking pool so request tasks keep running
pub async fn hash_password(hasher: Arc<dyn PasswordHasher>, password: String) -> WebServerResult<String> {
    task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| WebServerError::internal(format!("Password hashing task failed: {e}")))?
}

/// Verify on the blocking pool
pub async fn verify_password(hasher: Arc<dyn PasswordHasher>, password: String, digest: String) -> WebServerResult<bool> {
    task::spawn_blocking(move || hasher.verify(&password, &digest))
        .await
        .map_err(|e| WebServerError::internal(format!("Password verification task failed: {e}")))?
}
