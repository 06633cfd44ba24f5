//! Process-wide serve state.
//!
//! Two concerns share this module:
//! - build health: the version served pages poll, and the last build error
//! - shutdown: Ctrl+C unblocks a registered server and stops the watcher

use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use tiny_http::Server;

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// HTTP server reference for graceful shutdown
static SERVER: OnceLock<Arc<Server>> = OnceLock::new();

/// Shutdown signal sender for the watcher thread
static SHUTDOWN_TX: OnceLock<crossbeam::channel::Sender<()>> = OnceLock::new();

/// Bumped after every build, successful or not, so polling pages reload.
static BUILD_VERSION: AtomicU64 = AtomicU64::new(0);

/// Error of the most recent build. `None` while healthy.
static BUILD_ERROR: RwLock<Option<String>> = RwLock::new(None);

// =============================================================================
// Build health
// =============================================================================

/// Record a successful build.
pub fn record_build_success() {
    *BUILD_ERROR.write() = None;
    BUILD_VERSION.fetch_add(1, Ordering::SeqCst);
}

/// Record a failed build; pages show `error` until the next success.
pub fn record_build_failure(error: String) {
    *BUILD_ERROR.write() = Some(error);
    BUILD_VERSION.fetch_add(1, Ordering::SeqCst);
}

pub fn build_version() -> u64 {
    BUILD_VERSION.load(Ordering::SeqCst)
}

/// Error of the last build, cloned so no lock is held while responding.
pub fn build_error() -> Option<String> {
    BUILD_ERROR.read().clone()
}

pub fn is_healthy() -> bool {
    BUILD_ERROR.read().is_none()
}

// =============================================================================
// Shutdown
// =============================================================================

/// Setup the global Ctrl+C handler. Call once at program start
///
/// - Before `register_server()`: exit immediately
/// - After `register_server()`: unblock the server and stop the watcher
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        SHUTDOWN.store(true, Ordering::SeqCst);

        if let Some(tx) = SHUTDOWN_TX.get() {
            let _ = tx.send(());
        }

        if let Some(server) = SERVER.get() {
            crate::log!("serve"; "shutting down...");
            server.unblock();
        } else {
            std::process::exit(0);
        }
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Register the HTTP server for graceful shutdown
///
/// Call this after binding the server, before entering the request loop
pub fn register_server(server: Arc<Server>, shutdown_tx: crossbeam::channel::Sender<()>) {
    let _ = SERVER.set(server);
    let _ = SHUTDOWN_TX.set(shutdown_tx);
}

/// Check if shutdown has been requested
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_shut_down_by_default() {
        assert!(!is_shutdown());
    }

    #[test]
    fn test_build_health_cycle() {
        let start = build_version();

        record_build_failure("sections[0].id: duplicate".into());
        assert!(!is_healthy());
        assert_eq!(build_error().as_deref(), Some("sections[0].id: duplicate"));

        record_build_success();
        assert!(is_healthy());
        assert_eq!(build_error(), None);
        assert!(build_version() >= start + 2);
    }
}
