use std::io::ErrorKind;
use std::net::TcpStream;
use std::time::Duration;

use tokio::sync::mpsc;
use tungstenite::protocol::Message;

use crate::actor::messages::HostMsg;
use crate::protocol::{ClientMsg, ShellMsg};

use super::WsHub;

/// Poll interval for client reads
const READ_INTERVAL: Duration = Duration::from_millis(100);

impl WsHub {
    /// Complete the handshake and register a new shell.
    ///
    /// Returns `false` when the client could not be added.
    pub(super) fn add_client(&self, stream: TcpStream) -> bool {
        // Keep blocking mode during handshake, switch to non-blocking after
        match tungstenite::accept(stream) {
            Ok(mut ws) => {
                let _ = ws.get_ref().set_nonblocking(true);

                let connected = ShellMsg::connected();
                if let Err(e) = ws.send(Message::Text(connected.to_json().into())) {
                    crate::log!("ws"; "failed to send connected message: {}", e);
                    return false;
                }

                let mut clients = self.clients.lock();
                crate::debug!("ws"; "client connected (total: {})", clients.len() + 1);
                clients.push(ws);
                true
            }
            Err(e) => {
                crate::log!("ws"; "handshake failed: {}", e);
                false
            }
        }
    }

    /// Background thread reading shell messages (non-blocking poll).
    ///
    /// Messages are collected under the lock and forwarded after releasing
    /// it, so the host can broadcast while its channel is full.
    pub(super) fn client_reader_loop(self, host_tx: mpsc::Sender<HostMsg>) {
        loop {
            std::thread::sleep(READ_INTERVAL);
            if crate::core::is_shutdown() {
                break;
            }

            let texts = self.drain_incoming();
            for text in texts {
                let msg = match ClientMsg::from_json(&text) {
                    Ok(msg) => msg,
                    Err(e) => {
                        crate::log!("ws"; "unrecognized client message: {}", e);
                        crate::debug!("ws"; "payload: {}", text);
                        continue;
                    }
                };
                if host_tx.blocking_send(HostMsg::Client(msg)).is_err() {
                    crate::debug!("ws"; "host stopped, reader exiting");
                    return;
                }
            }
        }
    }

    /// Read every pending text frame and drop closed sockets
    fn drain_incoming(&self) -> Vec<String> {
        let mut clients = self.clients.lock();
        let mut texts = Vec::new();

        clients.retain_mut(|ws| loop {
            match ws.read() {
                Ok(Message::Text(text)) => texts.push(text.as_str().to_owned()),
                Ok(Message::Close(_)) => {
                    crate::debug!("ws"; "client closed");
                    return false;
                }
                Ok(_) => {}
                Err(tungstenite::Error::Io(ref e)) if e.kind() == ErrorKind::WouldBlock => {
                    return true;
                }
                Err(e) => {
                    crate::debug!("ws"; "client dropped: {}", e);
                    return false;
                }
            }
        });

        texts
    }
}
