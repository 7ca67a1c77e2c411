//! Binding, actor startup and teardown for `playpen serve`.

use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use anyhow::{Result, bail};
use crossbeam::channel::Receiver;
use tiny_http::Server;

use crate::{
    actor::{Coordinator, Published},
    config::PlaypenConfig,
    log,
    store,
};

/// Ports tried, starting at the configured one.
const MAX_PORT_RETRIES: u16 = 10;

/// How long the request loop waits for the actors after Ctrl+C.
const ACTOR_GRACE: Duration = Duration::from_secs(2);

/// Bind the HTTP server, moving up one port at a time while the port is taken.
pub fn bind_with_retry(interface: IpAddr, base_port: u16) -> Result<(Server, SocketAddr)> {
    let mut last_error = String::new();

    for port in (0..MAX_PORT_RETRIES).map(|offset| base_port.saturating_add(offset)) {
        let addr = SocketAddr::new(interface, port);
        match Server::http(addr) {
            Ok(server) => {
                if port != base_port {
                    log!("serve"; "port {} is taken, serving on {}", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_error = e.to_string(),
        }
    }

    bail!(
        "no free port in {}..={} on {}: {}",
        base_port,
        base_port.saturating_add(MAX_PORT_RETRIES - 1),
        interface,
        last_error
    )
}

/// Run the coordinator and host actor on a dedicated tokio runtime thread.
pub fn spawn_actors(
    config: Arc<PlaypenConfig>,
    published: Arc<Published>,
    shutdown_rx: Receiver<()>,
) -> JoinHandle<()> {
    thread::spawn(move || run_actor_system(&config, published, shutdown_rx))
}

fn run_actor_system(config: &PlaypenConfig, published: Arc<Published>, shutdown_rx: Receiver<()>) {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build();
    let runtime = match runtime {
        Ok(runtime) => runtime,
        Err(e) => {
            log!("error"; "cannot start the actor runtime: {}", e);
            return;
        }
    };

    let storage = store::open_shared(&config.storage.path);
    let coordinator = Coordinator::new(storage, published)
        .with_options(config.preview.host_options())
        .with_ws(config.serve.interface, config.serve.ws_port)
        .with_shutdown_signal(shutdown_rx);

    if let Err(e) = runtime.block_on(coordinator.run()) {
        log!("error"; "actor system stopped: {:#}", e);
    }
}

/// Give the actors up to two seconds to flush and stop.
pub fn wait_for_shutdown(handle: JoinHandle<()>) {
    let deadline = Instant::now() + ACTOR_GRACE;
    while !handle.is_finished() {
        if Instant::now() >= deadline {
            log!("serve"; "actors did not stop in time, exiting anyway");
            return;
        }
        thread::sleep(Duration::from_millis(50));
    }
    let _ = handle.join();
}
