use tungstenite::protocol::Message;

use crate::protocol::ShellMsg;

use super::WsHub;

impl WsHub {
    /// Broadcast a message to all connected shells, dropping dead sockets
    pub(super) fn broadcast(&self, msg: &ShellMsg) {
        let mut clients = self.clients.lock();
        let count = clients.len();

        if count == 0 {
            crate::debug!("ws"; "no clients connected");
            return;
        }

        let msg = Message::Text(msg.to_json().into());
        clients.retain_mut(|ws| match ws.send(msg.clone()) {
            Ok(_) => true,
            Err(e) => {
                crate::debug!("ws"; "client disconnected: {}", e);
                false
            }
        });
    }
}
