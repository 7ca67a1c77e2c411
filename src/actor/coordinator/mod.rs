//! Actor Coordinator - wires up the playground actor system
//!
//! The Coordinator is a thin orchestrator that:
//! - Creates the host channel
//! - Starts the WebSocket hub (the production surface)
//! - Runs the host actor until shutdown

mod runtime;

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use anyhow::Result;
use crossbeam::channel::Receiver;
use tokio::sync::mpsc;

use super::host::{HostActor, HostOptions};
use super::messages::HostMsg;
use super::published::Published;
use super::ws::{WsHub, start_ws_server};
use crate::store::SharedStorage;

const CHANNEL_BUFFER: usize = 32;

/// Coordinator - wires up and runs the actor system.
pub struct Coordinator {
    storage: SharedStorage,
    published: Arc<Published>,
    options: HostOptions,
    interface: IpAddr,
    ws_port: u16,
    shutdown_rx: Option<Receiver<()>>,
}

impl Coordinator {
    pub fn new(storage: SharedStorage, published: Arc<Published>) -> Self {
        Self {
            storage,
            published,
            options: HostOptions::default(),
            interface: IpAddr::V4(Ipv4Addr::LOCALHOST),
            ws_port: crate::cli::serve::DEFAULT_WS_PORT,
            shutdown_rx: None,
        }
    }

    /// Set debounce, settle and initial viewport.
    pub fn with_options(mut self, options: HostOptions) -> Self {
        self.options = options;
        self
    }

    /// Set WebSocket interface and base port.
    pub fn with_ws(mut self, interface: IpAddr, port: u16) -> Self {
        self.interface = interface;
        self.ws_port = port;
        self
    }

    /// Set shutdown signal receiver.
    pub fn with_shutdown_signal(mut self, rx: Receiver<()>) -> Self {
        self.shutdown_rx = Some(rx);
        self
    }

    /// Run the actor system.
    pub async fn run(mut self) -> Result<()> {
        let (host_tx, host_rx) = mpsc::channel::<HostMsg>(CHANNEL_BUFFER);
        let hub = WsHub::new();

        match start_ws_server(self.interface, self.ws_port, hub.clone(), host_tx.clone()) {
            Ok(actual_port) => {
                crate::cli::serve::set_actual_ws_port(actual_port);
                crate::debug!("ws"; "ws://{}:{}", self.interface, actual_port);
            }
            Err(e) => {
                crate::log!("actor"; "websocket server failed: {}", e);
            }
        }

        let host = HostActor::new(
            host_rx,
            host_tx.clone(),
            self.storage,
            hub,
            self.options,
            self.published,
        );

        crate::debug!("actor"; "start");
        let shutdown_rx = self.shutdown_rx.take();
        runtime::run_host(host, host_tx, shutdown_rx).await;

        crate::debug!("actor"; "stopped");
        Ok(())
    }
}
