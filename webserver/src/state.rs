//! Webserver state management

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Process-level server state, independent of the catalog session
#[derive(Debug)]
pub struct WebServerState {
    pub bind_address: SocketAddr,
    pub server_start_time: Instant,
    pub is_running: AtomicBool,
}

impl WebServerState {
    pub fn new(bind_address: SocketAddr) -> Self {
        Self {
            bind_address,
            server_start_time: Instant::now(),
            is_running: AtomicBool::new(true),
        }
    }

    pub fn get_uptime_seconds(&self) -> u64 {
        self.server_start_time.elapsed().as_secs()
    }

    pub fn set_running(&self, running: bool) {
        self.is_running.store(running, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::SeqCst)
    }
}
