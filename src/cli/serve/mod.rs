//! Development server with rebuild-on-change.

mod lifecycle;
mod path;
mod response;
mod watch;

use crate::{
    config::{ServeConfig, SiteConfig, cfg, clear_clean_flag},
    core, debug, log,
};
use anyhow::Result;
use crossbeam::channel;
use std::net::SocketAddr;
use std::sync::Arc;
use tiny_http::{Request, Server};

/// Path polled by served pages in watch mode.
pub const VERSION_PATH: &str = "/.folio/version";

/// Bound server ready to accept requests
pub struct BoundServer {
    server: Arc<Server>,
    addr: SocketAddr,
    shutdown_rx: channel::Receiver<()>,
}

/// Bind the HTTP server without starting the request loop
pub fn bind_server() -> Result<BoundServer> {
    let config = cfg();
    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);

    let (shutdown_tx, shutdown_rx) = channel::unbounded::<()>();
    lifecycle::register_server_for_shutdown(Arc::clone(&server), shutdown_tx);

    log!("serve"; "{}", ServeConfig::page_url(addr, &config.build.path_prefix));
    if config.serve.watch {
        debug!("serve"; "watching for changes");
    }

    Ok(BoundServer {
        server,
        addr,
        shutdown_rx,
    })
}

impl BoundServer {
    /// Get the bound address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the request loop (blocking).
    pub fn run(self) -> Result<()> {
        let watcher = lifecycle::spawn_watcher(cfg().serve.watch, self.shutdown_rx);
        run_request_loop(&self.server)?;
        lifecycle::wait_for_shutdown(watcher);
        Ok(())
    }
}

fn run_request_loop(server: &Server) -> Result<()> {
    // Range requests for videos and models must not stall the page itself
    let pool = rayon::ThreadPoolBuilder::new().num_threads(4).build()?;

    for request in server.incoming_requests() {
        // Config may be swapped by a rebuild between requests
        let config = cfg();
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &config) {
                log!("serve"; "request error: {e}");
            }
        });
    }
    Ok(())
}

/// Handle a single HTTP request
fn handle_request(request: Request, config: &SiteConfig) -> Result<()> {
    if core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    let reload_url = config
        .serve
        .watch
        .then(|| config.paths().url_for(VERSION_PATH));

    if reload_url.as_deref() == Some(request.url()) {
        return response::respond_version(request, core::build_version());
    }

    if let Some(error) = core::build_error() {
        return response::respond_build_error(request, &error, reload_url.as_deref());
    }

    match path::resolve_path(request.url(), &config.build.output, &config.build.path_prefix) {
        Some(path) => response::respond_file(request, &path, reload_url.as_deref()),
        None => response::respond_not_found(request),
    }
}

/// Build, then serve until Ctrl+C.
///
/// With watching on, a failed initial build still starts the server so the
/// next fix is picked up; otherwise the error is returned.
pub fn serve_site(config: &SiteConfig) -> Result<()> {
    match crate::cli::build::build_site(config, false) {
        // A failed build keeps the flag so the next rebuild still cleans
        Ok(_) => {
            core::record_build_success();
            clear_clean_flag();
        }
        Err(e) if config.serve.watch => {
            crate::logger::status_error("build failed", &format!("{e:#}"));
            core::record_build_failure(format!("{e:#}"));
        }
        Err(e) => return Err(e),
    }

    bind_server()?.run()
}
