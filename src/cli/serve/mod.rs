//! Playground server: shell page, preview artifact, downloads.
//!
//! The HTTP side is read-only. It serves what the host actor last
//! published; all mutations travel over the WebSocket link.

mod lifecycle;
mod response;

use crate::{
    actor::Published,
    config::{PlaypenConfig, cfg},
    debug, log,
};
use anyhow::Result;
use crossbeam::channel;
use percent_encoding::percent_decode_str;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU16, Ordering};
use tiny_http::{Request, Server};

/// Default WebSocket port for the shell link
pub const DEFAULT_WS_PORT: u16 = 35730;

/// Number of request handler threads
const REQUEST_THREADS: usize = 4;

/// Actual WebSocket port (may differ from the configured one if it was in use)
/// Updated by coordinator after WebSocket server binds successfully
static ACTUAL_WS_PORT: AtomicU16 = AtomicU16::new(DEFAULT_WS_PORT);

/// Update the actual WebSocket port (called by coordinator after binding)
pub fn set_actual_ws_port(port: u16) {
    ACTUAL_WS_PORT.store(port, Ordering::Relaxed);
}

/// Get the actual WebSocket port
fn get_actual_ws_port() -> u16 {
    ACTUAL_WS_PORT.load(Ordering::Relaxed)
}

/// Bound server ready to accept requests
pub struct BoundServer {
    server: Arc<Server>,
    addr: SocketAddr,
    published: Arc<Published>,
    shutdown_rx: channel::Receiver<()>,
}

/// Bind the HTTP server without starting the request loop.
pub fn bind_server(published: Arc<Published>) -> Result<BoundServer> {
    let config = cfg();
    set_actual_ws_port(config.serve.ws_port);

    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);

    let (shutdown_tx, shutdown_rx) = channel::unbounded::<()>();
    crate::core::register_server(Arc::clone(&server), shutdown_tx);

    log!("serve"; "http://{}", addr);
    if !config.serve.is_loopback() {
        log!("serve"; "listening on {}, anyone on the network can edit this project", config.serve.interface);
    }

    Ok(BoundServer {
        server,
        addr,
        published,
        shutdown_rx,
    })
}

impl BoundServer {
    /// Start the actors and the request loop (blocking).
    pub fn run(self) -> Result<()> {
        let config = cfg();
        let actor_handle = lifecycle::spawn_actors(
            Arc::clone(&config),
            Arc::clone(&self.published),
            self.shutdown_rx,
        );

        if config.serve.open {
            crate::utils::platform::open_browser(&format!("http://{}", self.addr));
        }

        run_request_loop(&self.server, &self.published);
        lifecycle::wait_for_shutdown(actor_handle);
        Ok(())
    }
}

fn run_request_loop(server: &Server, published: &Arc<Published>) {
    let pool = match rayon::ThreadPoolBuilder::new()
        .num_threads(REQUEST_THREADS)
        .build()
    {
        Ok(pool) => pool,
        Err(e) => {
            log!("serve"; "failed to create thread pool: {}", e);
            return;
        }
    };

    for request in server.incoming_requests() {
        let published = Arc::clone(published);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &published) {
                log!("serve"; "request error: {e}");
            }
        });
    }
}

/// What a request URL asks for.
#[derive(Debug, PartialEq, Eq)]
enum Route {
    Shell,
    Preview,
    Copy,
    Download(String),
    NotFound,
}

impl Route {
    fn parse(url: &str) -> Self {
        let path = url.split(['?', '#']).next().unwrap_or_default();
        match path {
            "/" | "/index.html" => Self::Shell,
            "/preview" => Self::Preview,
            "/copy" => Self::Copy,
            _ => match path.strip_prefix("/download/") {
                Some(name) if !name.is_empty() => {
                    Self::Download(percent_decode_str(name).decode_utf8_lossy().into_owned())
                }
                _ => Self::NotFound,
            },
        }
    }
}

/// Handle a single HTTP request
fn handle_request(request: Request, published: &Published) -> Result<()> {
    if crate::core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    let route = Route::parse(request.url());
    debug!("serve"; "{} {} -> {:?}", request.method(), request.url(), route);

    match route {
        Route::Shell => response::respond_shell(request, get_actual_ws_port()),
        Route::Preview => response::respond_preview(request, published.document().as_deref()),
        Route::Copy => response::respond_copy(request, published.document().as_deref()),
        Route::Download(name) => {
            let snapshot = published.snapshot();
            response::respond_download(request, snapshot.get(&name))
        }
        Route::NotFound => response::respond_not_found(request),
    }
}

/// Config values the server reports at startup.
pub fn describe(config: &PlaypenConfig) -> String {
    let source = config
        .config_path
        .as_ref()
        .map_or_else(|| "defaults".to_string(), |p| p.display().to_string());
    format!(
        "config {}, storage {}, debounce {}ms, viewport {}",
        source,
        config.storage.path.display(),
        config.preview.debounce_ms,
        config.preview.viewport
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_parse() {
        assert_eq!(Route::parse("/"), Route::Shell);
        assert_eq!(Route::parse("/?x=1"), Route::Shell);
        assert_eq!(Route::parse("/preview"), Route::Preview);
        assert_eq!(Route::parse("/preview#top"), Route::Preview);
        assert_eq!(Route::parse("/copy"), Route::Copy);
        assert_eq!(
            Route::parse("/download/styles.css"),
            Route::Download("styles.css".to_string())
        );
        assert_eq!(Route::parse("/download/"), Route::NotFound);
        assert_eq!(Route::parse("/favicon.ico"), Route::NotFound);
    }

    #[test]
    fn test_route_download_decodes_name() {
        assert_eq!(
            Route::parse("/download/my%20notes.md"),
            Route::Download("my notes.md".to_string())
        );
    }

    #[test]
    fn test_describe() {
        let config = crate::config::test_parse_config("[preview]\ndebounce_ms = 120");
        let text = describe(&config);
        assert!(text.contains("120ms"));
        assert!(text.contains("desktop"));
    }
}
