//! Actor System for the Playground
//!
//! Message-passing concurrency for `playpen serve`:
//!
//! ```text
//! Shells <--ws--> WsHub --HostMsg--> HostActor --publish--> HTTP server
//! ```
//!
//! # Module Structure
//!
//! - `messages` - Message types sent to the host
//! - `host` - Owns all state; compose, render, mock
//! - `published` - Immutable snapshots read by the HTTP server
//! - `ws` - WebSocket hub, the production execution surface
//! - `coordinator` - Wires up and runs actors

pub mod coordinator;
pub mod host;
pub mod messages;
pub mod published;
pub mod ws;

pub use coordinator::Coordinator;
pub use host::HostOptions;
pub use published::Published;
