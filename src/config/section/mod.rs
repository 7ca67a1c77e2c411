//! Configuration section definitions.
//!
//! Each module corresponds to a section in `playpen.toml`:
//!
//! | Module    | TOML Section  | Purpose                              |
//! |-----------|---------------|--------------------------------------|
//! | `serve`   | `[serve]`     | HTTP and WebSocket server            |
//! | `preview` | `[preview]`   | Debounce, settle delay, viewport     |
//! | `storage` | `[storage]`   | Where the project is persisted       |

mod preview;
mod serve;
mod storage;

pub use preview::PreviewConfig;
pub use serve::ServeConfig;
pub use storage::StorageConfig;
