//! Shared types for the order tracker
//!
//! Domain records, identifiers and timestamp parsing used by the server and the
//! seeding tool, plus the process-aware tracing setup.

pub mod types;
pub mod errors;
pub mod logging;
pub mod time;

pub use types::*;
pub use errors::*;
