//! `[serve]` section configuration.
//!
//! Contains development server settings.
//!
//! # Example
//!
//! ```toml
//! [serve]
//! interface = "127.0.0.1"     # Network interface (127.0.0.1 = localhost only)
//! port = 5277                 # HTTP port number
//! watch = true                # Refresh the preview on file changes
//! debounce_ms = 50            # Fold the burst of OS events one save produces
//! ```
//!
//! Use `interface = "0.0.0.0"` to make the preview reachable from other devices.

use std::net::{IpAddr, Ipv4Addr};

use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;

/// Development server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Network interface to bind.
    /// - `127.0.0.1` (default): localhost only
    /// - `0.0.0.0`: all interfaces (LAN accessible)
    pub interface: IpAddr,

    /// HTTP port number.
    pub port: u16,

    /// Enable file watcher for live preview.
    pub watch: bool,

    /// Window in which repeated events for the same file count as one.
    /// `0` forwards every event as it arrives.
    pub debounce_ms: u64,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: 5277,
            watch: true,
            debounce_ms: 50,
        }
    }
}

impl ServeConfig {
    pub(crate) fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.port == 0 {
            diag.error("serve.port", "port must be non-zero");
        }
    }
}
