//! Webserver state management
//!
//! Process-level state shared by every request: where the server listens,
//! whether it is still accepting work, and when it started.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Core webserver state
#[derive(Debug)]
pub struct WebServerState {
    pub bind_address: SocketAddr,
    pub is_running: Arc<AtomicBool>,
    pub server_start_time: Instant,
}

impl WebServerState {
    pub fn new(bind_address: SocketAddr) -> Self {
        Self {
            bind_address,
            is_running: Arc::new(AtomicBool::new(true)),
            server_start_time: Instant::now(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::Relaxed)
    }

    pub fn set_running(&self, running: bool) {
        self.is_running.store(running, Ordering::Relaxed);
    }

    /// Get server uptime in seconds
    pub fn get_uptime_seconds(&self) -> u64 {
        self.server_start_time.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    fn test_webserver_state_creation() {
        let bind_addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000);
        let state = WebServerState::new(bind_addr);

        assert_eq!(state.bind_address, bind_addr);
        assert!(state.is_running());
        assert!(state.get_uptime_seconds() < 5);
    }

    #[test]
    fn test_running_flag() {
        let state = WebServerState::new(SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000));

        state.set_running(false);
        assert!(!state.is_running());
        state.set_running(true);
        assert!(state.is_running());
    }
}
