//! Process identity used to tag log events

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Global process ID singleton - set once at startup
static PROCESS_ID: OnceLock<ProcessId> = OnceLock::new();

/// Identity reported before any `init_*` call (tests, library use)
static FALLBACK_PROCESS_ID: ProcessId = ProcessId::WebServer;

/// Process identifier for the binaries in the workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessId {
    /// HTTP server process
    WebServer,
    /// One-shot seeding tool
    Seed,
}

impl ProcessId {
    /// Initialize the global process ID for the webserver
    pub fn init_webserver() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::WebServer)
    }

    /// Initialize the global process ID for the seeding tool
    pub fn init_seed() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::Seed)
    }

    /// Get the global process ID, falling back to the webserver identity
    pub fn current() -> &'static ProcessId {
        PROCESS_ID.get().unwrap_or(&FALLBACK_PROCESS_ID)
    }

    /// Crate targets this process logs under
    pub fn log_targets(&self) -> &'static [&'static str] {
        match self {
            ProcessId::WebServer => &["order_tracker", "shared"],
            ProcessId::Seed => &["seed", "order_tracker", "shared"],
        }
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessId::WebServer => write!(f, "webserver"),
            ProcessId::Seed => write!(f, "seed"),
        }
    }
}
