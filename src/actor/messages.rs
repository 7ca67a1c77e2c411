//! Actor Message Definitions
//!
//! Everything that mutates host state arrives as a [`HostMsg`]:
//!
//! ```text
//! WsHub reader --Client--> HostActor <--MockSettled-- delayed mock task
//! WsHub acceptor --ClientConnected--^
//! ```

use crate::mock::MockResponse;
use crate::protocol::ClientMsg;

/// Messages to the Host Actor
#[derive(Debug)]
pub enum HostMsg {
    /// Intent forwarded from a browser shell
    Client(ClientMsg),
    /// A shell finished the WebSocket handshake
    ClientConnected,
    /// A delayed mock endpoint is ready to answer
    MockSettled { url: String, response: MockResponse },
    /// Shutdown
    Shutdown,
}
