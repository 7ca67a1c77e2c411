//! Ctrl+C handling.
//!
//! One-shot commands exit on the first interrupt. Once `serve` has registered
//! its HTTP server, the first interrupt raises the stop flag, wakes the
//! coordinator and unblocks `tiny_http`; a second one exits immediately.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use anyhow::Context;
use crossbeam::channel::Sender;
use tiny_http::Server;

/// Exit status for an interrupted process.
const INTERRUPTED: i32 = 130;

static STOP: AtomicBool = AtomicBool::new(false);

struct Registration {
    server: Arc<Server>,
    coordinator: Sender<()>,
}

static REGISTRATION: OnceLock<Registration> = OnceLock::new();

/// Install the process-wide Ctrl+C handler. Call once from `main`.
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(on_interrupt).context("failed to set Ctrl+C handler")
}

fn on_interrupt() {
    let Some(registration) = REGISTRATION.get() else {
        std::process::exit(INTERRUPTED);
    };
    if STOP.swap(true, Ordering::SeqCst) {
        std::process::exit(INTERRUPTED);
    }
    crate::log!("serve"; "stopping (Ctrl+C again to force)");
    let _ = registration.coordinator.send(());
    registration.server.unblock();
}

/// Hand the bound server and the coordinator's wake-up channel to the
/// interrupt handler. Later registrations are ignored.
pub fn register_server(server: Arc<Server>, coordinator: Sender<()>) {
    let _ = REGISTRATION.set(Registration {
        server,
        coordinator,
    });
}

/// Polled by the WebSocket threads and the request loop.
pub fn is_shutdown() -> bool {
    STOP.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_until_interrupted() {
        assert!(!is_shutdown());
        assert!(REGISTRATION.get().is_none());
    }
}
