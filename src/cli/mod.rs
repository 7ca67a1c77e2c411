//! Command-line interface module.

mod args;
pub mod compose;
pub mod file;
pub mod mock;
pub mod serve;

pub use args::{Cli, Commands, FileAction, MockAction};
