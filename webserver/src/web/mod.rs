//! HTTP layer: JSON handlers and the session guard

pub mod extract;
pub mod handlers;
pub mod middleware;
