//! Host Actor - owns every piece of playground state
//!
//! File store, settings, layout, mock backend, renderer and refresh
//! scheduler live here and are only touched from this loop. Shells talk to
//! it through [`HostMsg`]; the HTTP server reads what it publishes.
//!
//! ```text
//! HostMsg --> handle() --> RefreshScheduler --poll--> compose --> SandboxRenderer
//!                                  ^                                    |
//!                                  +--------- render_complete ---------+
//! ```


use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio::time::sleep;

use super::messages::HostMsg;
use super::published::Published;
use crate::compose::compose;
use crate::instrument::Injector;
use crate::mock::{MockBackend, MockRequest, Resolution};
use crate::protocol::{ClientMsg, FetchOptions, NoticeLevel, ShellMsg};
use crate::refresh::{Poll, RefreshScheduler, Trigger};
use crate::sandbox::{FetchRequest, RenderError, SandboxRenderer, Surface, Viewport};
use crate::store::prefs::{Layout, Settings, editor_style};
use crate::store::{FileKind, FileStore, SharedStorage};
use crate::logger;

/// Wait used when neither a debounce nor a settle is pending
const IDLE_WAIT: Duration = Duration::from_secs(3600);

/// Timing knobs, taken from the `[preview]` config section.
#[derive(Debug, Clone, Copy)]
pub struct HostOptions {
    pub debounce: Duration,
    pub settle: Duration,
    pub viewport: Viewport,
}

impl Default for HostOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
            settle: Duration::from_millis(300),
            viewport: Viewport::Desktop,
        }
    }
}

pub struct HostActor<S: Surface> {
    rx: mpsc::Receiver<HostMsg>,
    /// Loopback for delayed mock responses
    tx: mpsc::Sender<HostMsg>,
    storage: SharedStorage,
    store: FileStore,
    settings: Settings,
    layout: Layout,
    backend: MockBackend,
    renderer: SandboxRenderer<S>,
    scheduler: RefreshScheduler,
    published: Arc<Published>,
}

impl<S: Surface> HostActor<S> {
    /// Hydrate all state from `storage`.
    pub fn new(
        rx: mpsc::Receiver<HostMsg>,
        tx: mpsc::Sender<HostMsg>,
        storage: SharedStorage,
        surface: S,
        options: HostOptions,
        published: Arc<Published>,
    ) -> Self {
        let store = FileStore::load(Arc::clone(&storage));
        let settings = Settings::load(&storage);
        let layout = Layout::load(&storage);
        let backend = MockBackend::load(&storage);
        let scheduler = RefreshScheduler::new(options.debounce, settings.auto_update);
        let renderer = SandboxRenderer::new(surface, options.viewport, options.settle);

        published.set_snapshot(store.snapshot());

        Self {
            rx,
            tx,
            storage,
            store,
            settings,
            layout,
            backend,
            renderer,
            scheduler,
            published,
        }
    }

    /// Run the actor event loop
    pub async fn run(mut self) {
        // Compose once up front so `/preview` works before any shell connects
        self.scheduler.request(Trigger::Mount, Instant::now());
        self.tick(Instant::now());

        loop {
            let wait = self.next_wakeup(Instant::now()).unwrap_or(IDLE_WAIT);

            tokio::select! {
                biased;

                msg = self.rx.recv() => match msg {
                    Some(HostMsg::Shutdown) | None => {
                        crate::debug!("host"; "shutdown");
                        break;
                    }
                    Some(msg) => self.handle(msg, Instant::now()),
                },

                _ = sleep(wait) => {}
            }

            self.tick(Instant::now());
        }
    }

    /// Time until the next timer the loop must wake for.
    fn next_wakeup(&self, now: Instant) -> Option<Duration> {
        match (
            self.scheduler.next_wakeup(now),
            self.renderer.next_settle(now),
        ) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Advance timers: finish a settled cycle, then compose if due.
    pub(super) fn tick(&mut self, now: Instant) {
        if self.renderer.settle(now) {
            self.scheduler.render_complete();
        }
        if self.scheduler.poll(now) == Poll::Compose {
            self.render(now);
        }
    }

    fn render(&mut self, now: Instant) {
        let snapshot = self.store.snapshot();
        let instrumentation = Injector::for_backend(&self.backend);
        let doc = compose(&snapshot, &instrumentation);
        let summary = format!("rendered {} ({})", doc.file, doc.mode);
        crate::debug!("render"; "{} [{}]", summary, crate::utils::hash::fingerprint(&doc.html));

        let result = self.renderer.reload(doc, now);
        // The renderer's document is the one source for every export path
        if let Some(doc) = self.renderer.current() {
            self.published.set_document(doc.clone());
        }
        match result {
            Ok(()) => logger::status_success(&summary),
            Err(RenderError::NotReady) => {
                crate::debug!("render"; "no shell connected, waiting");
                self.scheduler.render_failed();
            }
        }
    }

    pub(super) fn handle(&mut self, msg: HostMsg, now: Instant) {
        match msg {
            HostMsg::Client(msg) => self.handle_client(msg, now),
            HostMsg::ClientConnected => {
                self.post_state();
                self.post_style();
                self.renderer.set_viewport(self.renderer.viewport());
                self.scheduler.request(Trigger::Mount, now);
            }
            HostMsg::MockSettled { url, response } => self.renderer.respond(url, response),
            HostMsg::Shutdown => {}
        }
    }

    fn handle_client(&mut self, msg: ClientMsg, now: Instant) {
        match msg {
            ClientMsg::Sandbox { message } => {
                if let Some(FetchRequest { url, options }) = self.renderer.on_message(message) {
                    self.resolve_fetch(url, &options);
                }
            }
            ClientMsg::Select { name } => {
                let result = self.store.select(&name);
                if self.report(result) {
                    self.post_state();
                    self.scheduler.request(Trigger::Switch, now);
                }
            }
            ClientMsg::Edit { name, content } => {
                let result = self.store.update(&name, content);
                if self.report(result) {
                    self.publish_snapshot();
                    self.scheduler.request(Trigger::Edit, now);
                }
            }
            ClientMsg::Add { name, kind } => {
                let kind = kind.unwrap_or_else(|| FileKind::from_name(&name));
                let result = self.store.add(&name, kind);
                if self.report(result) {
                    // A fresh file opens in the editor
                    let selected = self.store.select(&name);
                    self.report(selected);
                    self.structure_changed(now);
                }
            }
            ClientMsg::Delete { name } => {
                let result = self.store.delete(&name);
                if self.report(result) {
                    self.structure_changed(now);
                }
            }
            ClientMsg::Rename { from, to } => {
                let result = self.store.rename(&from, &to);
                if self.report(result) {
                    self.structure_changed(now);
                }
            }
            ClientMsg::Refresh => {
                self.scheduler.request(Trigger::Manual, now);
            }
            ClientMsg::ClearConsole => self.renderer.clear_console(),
            ClientMsg::Viewport { viewport } => self.renderer.set_viewport(viewport),
            ClientMsg::Settings { settings } => {
                self.settings = settings;
                self.settings.save(&self.storage);
                self.scheduler.set_auto_update(self.settings.auto_update);
                self.post_style();
            }
            ClientMsg::Layout { layout } => {
                self.layout = layout.normalized();
                self.layout.save(&self.storage);
                self.post_state();
            }
            ClientMsg::Copy => match self.renderer.copy_payload() {
                Some(text) => self.renderer.surface().post(&ShellMsg::Clipboard { text }),
                None => self.notice(NoticeLevel::Info, "nothing rendered yet"),
            },
            ClientMsg::AddEndpoint {
                path,
                method,
                status_code,
                response_body,
                delay_ms,
            } => {
                let result = self.backend.add_endpoint_json(
                    &path,
                    &method,
                    status_code,
                    &response_body,
                    delay_ms,
                );
                if self.report(result) {
                    self.backend.save(&self.storage);
                    self.notice(
                        NoticeLevel::Info,
                        format!("mock {} {} registered", method.to_ascii_uppercase(), path),
                    );
                    // The network shim is only injected while mocks exist
                    self.scheduler.request(Trigger::Structure, now);
                }
            }
            ClientMsg::AddCollection { name, items } => {
                let result = self.backend.set_collection_json(&name, &items);
                if self.report(result) {
                    self.backend.save(&self.storage);
                    self.notice(NoticeLevel::Info, format!("collection {name} registered"));
                    self.scheduler.request(Trigger::Structure, now);
                }
            }
        }
    }

    /// Answer a sandbox `fetch` from the mock backend.
    fn resolve_fetch(&mut self, url: String, options: &FetchOptions) {
        let request = MockRequest::from_fetch(&url, options);
        let Resolution { response, delay } = self.backend.resolve(&request);
        crate::debug!("mock"; "{} {} -> {} (+{:?})", request.method, request.path, response.status, delay);

        if request.method != "GET" {
            // Collections may have changed
            self.backend.save(&self.storage);
        }

        if delay.is_zero() {
            self.renderer.respond(url, response);
            return;
        }

        let tx = self.tx.clone();
        tokio::spawn(async move {
            sleep(delay).await;
            let _ = tx.send(HostMsg::MockSettled { url, response }).await;
        });
    }

    fn structure_changed(&mut self, now: Instant) {
        self.post_state();
        self.scheduler.request(Trigger::Structure, now);
    }

    /// Surface a failed mutation as a notice. Returns whether it succeeded.
    fn report<E: std::fmt::Display>(&self, result: Result<(), E>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                crate::log!("host"; "{}", e);
                self.notice(NoticeLevel::Error, e.to_string());
                false
            }
        }
    }

    fn notice(&self, level: NoticeLevel, text: impl Into<String>) {
        self.renderer.surface().post(&ShellMsg::notice(level, text));
    }

    fn publish_snapshot(&self) {
        self.published.set_snapshot(self.store.snapshot());
    }

    fn post_state(&self) {
        self.publish_snapshot();
        let content = self
            .store
            .get(self.store.selected())
            .map(|f| f.content.clone())
            .unwrap_or_default();
        self.renderer.surface().post(&ShellMsg::State {
            files: self.store.list(),
            selected: self.store.selected().to_string(),
            content,
            settings: self.settings.clone(),
            layout: self.layout.clone(),
        });
    }

    fn post_style(&self) {
        self.renderer.surface().post(&ShellMsg::Style {
            style: editor_style(&self.settings),
        });
    }

    #[cfg(test)]
    pub(super) fn renderer(&self) -> &SandboxRenderer<S> {
        &self.renderer
    }

    #[cfg(test)]
    pub(super) fn store(&self) -> &FileStore {
        &self.store
    }

    #[cfg(test)]
    pub(super) fn scheduler(&self) -> &RefreshScheduler {
        &self.scheduler
    }
}
