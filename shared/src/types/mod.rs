//! Core types used throughout the order tracker

pub mod order;
pub mod process;
pub mod user;

pub use order::{
    Order, OrderId, Priority, StatusFilter, UNASSIGNED_LABEL, normalize_assignee, validate_order_number,
};
pub use process::ProcessId;
pub use user::{Role, User, UserId, UserSummary};
