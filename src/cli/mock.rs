//! `playpen mock`: author and exercise the mock backend.

use super::args::MockAction;
use crate::log;
use crate::mock::{MockBackend, MockError, MockRequest, ROUTE_PREFIX};
use crate::store::SharedStorage;
use anyhow::{Context, Result, bail};
use std::io::Write;

pub fn run_mock(action: &MockAction, storage: SharedStorage, out: &mut dyn Write) -> Result<()> {
    let mut backend = MockBackend::load(&storage);

    match action {
        MockAction::Ls => {
            for e in backend.endpoints() {
                writeln!(
                    out,
                    "{:<6} {} -> {} (+{}ms)",
                    e.method, e.path, e.status_code, e.delay_ms
                )?;
            }
            for name in backend.collections().names() {
                let count = backend.collections().get(name).map_or(0, <[_]>::len);
                writeln!(out, "{:<6} {}{} ({} items)", "*", ROUTE_PREFIX, name, count)?;
            }
        }
        MockAction::Add {
            path,
            method,
            status,
            body,
            delay,
        } => {
            backend.add_endpoint_json(path, method, *status, body, *delay)?;
            backend.save(&storage);
            log!("mock"; "{} {} -> {}", method.to_ascii_uppercase(), path, status);
        }
        MockAction::Rm { path, method } => {
            if !backend.remove_endpoint(path, method) {
                bail!("no mock endpoint {} {}", method.to_ascii_uppercase(), path);
            }
            backend.save(&storage);
            log!("mock"; "removed {} {}", method.to_ascii_uppercase(), path);
        }
        MockAction::Collection { name, items } => {
            match items {
                Some(items) => {
                    backend.set_collection_json(name, items)?;
                    log!("mock"; "collection {}{}", ROUTE_PREFIX, name);
                }
                None => {
                    if !backend.remove_collection(name) {
                        bail!("no mock collection `{}`", name);
                    }
                    log!("mock"; "removed collection {}", name);
                }
            }
            backend.save(&storage);
        }
        MockAction::Fetch { url, method, body } => {
            let body = body
                .as_deref()
                .map(serde_json::from_str)
                .transpose()
                .map_err(MockError::from)?;
            let request = MockRequest::new(method, url, body);

            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
                .context("failed to create tokio runtime")?;
            let response = rt.block_on(backend.handle(&request));
            if request.method != "GET" {
                backend.save(&storage);
            }

            writeln!(out, "{}", serde_json::to_string_pretty(&response)?)?;
        }
    }
    Ok(())
}
