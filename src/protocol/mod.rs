//! Cross-context message protocols.
//!
//! - [`sandbox`]: between the preview iframe and the host, relayed by the shell
//! - [`shell`]: between the browser shell and the host, over WebSocket
//!
//! Both are serde unions tagged on `type`. Shapes that do not match a variant
//! fail to deserialize and are logged by the receiver.

pub mod sandbox;
pub mod shell;

pub use sandbox::{ConsoleLevel, FetchOptions, HostToSandbox, SandboxMessage};
pub use shell::{ClientMsg, NoticeLevel, ShellMsg};
