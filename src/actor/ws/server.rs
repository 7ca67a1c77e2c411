//! WebSocket listener for browser shells.

use std::net::{IpAddr, SocketAddr, TcpListener};
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;

use super::WsHub;
use crate::actor::messages::HostMsg;

/// Maximum port retry attempts
const MAX_PORT_RETRIES: u16 = 10;

/// Poll interval of the non-blocking acceptor
const ACCEPT_INTERVAL: Duration = Duration::from_millis(100);

/// Start the WebSocket server for `hub`.
///
/// Spawns an acceptor thread (handshake, then `ClientConnected` to the host)
/// and a reader thread (shell messages to the host). Returns the bound port,
/// which may differ from `base_port` if it was in use.
pub fn start_ws_server(
    interface: IpAddr,
    base_port: u16,
    hub: WsHub,
    host_tx: mpsc::Sender<HostMsg>,
) -> Result<u16> {
    let (listener, actual_port) = try_bind_port(interface, base_port, MAX_PORT_RETRIES)?;
    listener.set_nonblocking(true)?;

    let reader_hub = hub.clone();
    let reader_tx = host_tx.clone();
    std::thread::spawn(move || reader_hub.client_reader_loop(reader_tx));

    std::thread::spawn(move || {
        loop {
            if crate::core::is_shutdown() {
                break;
            }
            match listener.accept() {
                Ok((stream, addr)) => {
                    crate::debug!("ws"; "connection from {}", addr);

                    // Set blocking for the handshake
                    let _ = stream.set_nonblocking(false);
                    if hub.add_client(stream)
                        && host_tx.blocking_send(HostMsg::ClientConnected).is_err()
                    {
                        crate::log!("ws"; "failed to notify host of new client");
                        break;
                    }
                }
                Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    std::thread::sleep(ACCEPT_INTERVAL);
                }
                Err(e) => {
                    crate::log!("ws"; "accept error: {}", e);
                    std::thread::sleep(ACCEPT_INTERVAL);
                }
            }
        }
    });

    Ok(actual_port)
}

/// Try binding to port, retry with incremented port if in use
fn try_bind_port(
    interface: IpAddr,
    base_port: u16,
    max_retries: u16,
) -> Result<(TcpListener, u16)> {
    let mut last_error = None;

    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        match TcpListener::bind(SocketAddr::new(interface, port)) {
            Ok(listener) => {
                let actual_port = listener.local_addr()?.port();
                if offset > 0 {
                    crate::log!("ws"; "port {} in use, using {} instead", base_port, actual_port);
                }
                return Ok((listener, actual_port));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow::anyhow!(
        "Failed to bind WebSocket server after {} attempts: {}",
        max_retries,
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}
