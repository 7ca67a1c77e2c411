//! Config error type and the process-wide `cfg()` handle.

mod error;
mod handle;

pub use error::ConfigError;
pub use handle::{cfg, init_config};
