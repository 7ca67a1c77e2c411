//! WebSocket Hub - the production execution surface
//!
//! Every connected browser shell hosts one preview iframe. The hub keeps
//! the sockets, broadcasts host messages to all of them, and forwards what
//! the shells send back to the [`HostActor`](super::host::HostActor).
//!
//! ```text
//! HostActor --[ShellMsg]--> WsHub --[broadcast]--> Shells
//!     ^                                              |
//!     +--------------[ClientMsg]---------------------+
//! ```

mod client_io;
mod delivery;
mod server;

pub use server::start_ws_server;

use std::net::TcpStream;
use std::sync::Arc;

use parking_lot::Mutex;
use tungstenite::WebSocket;

use crate::protocol::ShellMsg;
use crate::sandbox::{Surface, Viewport};

/// Connected shells (shared between the host, acceptor and reader threads)
#[derive(Clone, Default)]
pub struct WsHub {
    clients: Arc<Mutex<Vec<WebSocket<TcpStream>>>>,
}

impl WsHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of connected shells
    pub fn client_count(&self) -> usize {
        self.clients.lock().len()
    }
}

impl Surface for WsHub {
    fn is_mounted(&self) -> bool {
        self.client_count() > 0
    }

    fn load(&self, html: &str, viewport: Viewport) {
        self.broadcast(&ShellMsg::load(html, viewport));
    }

    fn post(&self, message: &ShellMsg) {
        self.broadcast(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_hub_is_not_mounted() {
        let hub = WsHub::new();
        assert!(!hub.is_mounted());
        assert_eq!(hub.client_count(), 0);
        // Broadcasting without clients is a no-op.
        hub.post(&ShellMsg::ConsoleCleared);
    }

    #[test]
    fn test_clones_share_clients() {
        let hub = WsHub::new();
        let other = hub.clone();
        assert!(Arc::ptr_eq(&hub.clients, &other.clients));
    }
}
