//! Core business logic modules
//!
//! Pure business logic with no I/O dependencies

pub mod accounts;
pub mod escalation;
pub mod export;
pub mod order_number;
pub mod orders;
pub mod report;
pub mod sample;
pub mod stats;
pub mod table;

// Re-export commonly used types
pub use accounts::NewAccount;
pub use escalation::{escalate, escalation_candidates};
pub use export::{ExportRow, parse_csv, report_filename, select_for_export, write_csv};
pub use order_number::pick_unused;
pub use orders::{OrderDraft, OrderPatch, toggle_completed};
pub use report::ReportQuery;
pub use sample::sample_orders;
pub use stats::{OverdueRule, StatusClassifier, StatusSummary};
pub use table::{Page, SortDirection, SortField, TableQuery};
