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
//! watch = true                # Rebuild on file changes
//! respect_prefix = false      # Ignore the site.url prefix for local development
//! ```
//!
//! Use `interface = "0.0.0.0"` to make the server accessible from LAN.
//!
//! Set `respect_prefix = true` to test deployment paths (e.g., a GitHub Pages subdirectory).

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

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

    /// Rebuild when config, markdown or public files change.
    pub watch: bool,

    /// Respect the URL prefix from `site.url` during local development.
    /// - `false` (default): Ignore prefix, access pages at `/`
    /// - `true`: Keep prefix, access at `/my-project/`
    pub respect_prefix: bool,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: 5277,
            watch: true,
            respect_prefix: false,
        }
    }
}

impl ServeConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        // Port retry walks upward from the configured port
        if self.port == 0 {
            diag.error_with_hint(
                FieldPath::new("serve.port"),
                "port must be non-zero",
                "the default is 5277",
            );
        }
        if self.interface.is_unspecified() {
            diag.warn(
                FieldPath::new("serve.interface"),
                "the preview is reachable from other machines on the network",
            );
        }
    }

    /// Address printed after binding, including the kept prefix.
    pub fn page_url(addr: SocketAddr, prefix: &Path) -> String {
        let prefix = prefix.to_string_lossy();
        let prefix = prefix.trim_matches('/');
        if prefix.is_empty() {
            format!("http://{addr}/")
        } else {
            format!("http://{addr}/{prefix}/")
        }
    }
}
