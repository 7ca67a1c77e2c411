//! Playpen - a local HTML/CSS/JS playground with a sandboxed live preview.

mod actor;
mod cli;
mod compose;
mod config;
mod core;
mod embed;
mod instrument;
mod logger;
mod mock;
mod protocol;
mod refresh;
mod sandbox;
mod store;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{PlaypenConfig, init_config};
use std::io::stdout;
use store::SharedStorage;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = init_config(PlaypenConfig::load(&cli)?);
    let storage = || -> SharedStorage { store::open_shared(&config.storage.path) };

    match &cli.command {
        Commands::Serve { .. } => serve(&config),
        Commands::Compose { file, output } => cli::compose::run_compose(
            file.as_deref(),
            output.as_deref(),
            &storage(),
            &mut stdout().lock(),
        ),
        Commands::Export { out } => cli::compose::run_export(out, &storage()).map(|_| ()),
        Commands::File { action } => cli::file::run_file(action, storage(), &mut stdout().lock()),
        Commands::Mock { action } => cli::mock::run_mock(action, storage(), &mut stdout().lock()),
    }
}

/// Bind the server, then run actors and the request loop until Ctrl+C.
fn serve(config: &PlaypenConfig) -> Result<()> {
    let published = actor::Published::new();
    let bound_server = cli::serve::bind_server(published)?;
    debug!("serve"; "{}", cli::serve::describe(config));
    bound_server.run()
}
