use std::time::Duration;

use crossbeam::channel::Receiver;
use tokio::sync::mpsc;

use crate::actor::host::HostActor;
use crate::actor::messages::HostMsg;
use crate::sandbox::Surface;

/// Poll interval for the crossbeam shutdown signal
const SHUTDOWN_POLL: Duration = Duration::from_millis(100);

/// Run the host actor until it stops or shutdown is signalled.
pub(super) async fn run_host<S: Surface + 'static>(
    host: HostActor<S>,
    host_tx: mpsc::Sender<HostMsg>,
    shutdown_rx: Option<Receiver<()>>,
) {
    let mut host_handle = tokio::spawn(async move { host.run().await });

    if let Some(rx) = shutdown_rx {
        loop {
            if rx.try_recv().is_ok() {
                crate::debug!("actor"; "shutdown signal received");
                break;
            }
            tokio::select! {
                _ = &mut host_handle => return,
                _ = tokio::time::sleep(SHUTDOWN_POLL) => {}
            }
        }
    } else {
        let _ = (&mut host_handle).await;
        return;
    }

    crate::debug!("actor"; "sending shutdown to host");
    let _ = host_tx.send(HostMsg::Shutdown).await;

    let _ = tokio::time::timeout(Duration::from_millis(500), host_handle).await;
}
