//! Shared error types for the order tracker

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SharedError {
    #[error("Invalid priority: {input}")]
    InvalidPriority { input: String },

    #[error("Invalid role: {input}")]
    InvalidRole { input: String },

    #[error("Invalid timestamp: {input}")]
    InvalidTimestamp { input: String },

    #[error("Invalid UUID: {input}")]
    InvalidUuid { input: String },

    #[error("Invalid order number: {input}")]
    InvalidOrderNumber { input: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
