//! Core process state shared across the server and actors.

mod state;

pub use state::{is_shutdown, register_server, setup_shutdown_handler};
