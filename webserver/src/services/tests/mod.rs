//! Service tests for webserver
//!
//! Stores are exercised through their traits so the in-memory and file
//! implementations are held to the same behavior.

pub mod fixtures;
pub mod helpers;
pub mod session;
