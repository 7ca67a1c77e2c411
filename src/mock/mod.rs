//! Simulated REST backend for `fetch` calls made inside the sandbox.
//!
//! Explicit endpoints are matched first on exact `(path, method)`, then
//! collections under `/api/<name>`. Anything else gets a 404. The backend is
//! an owned value: the host actor holds it and hands it to the injector.

mod collections;
mod error;
mod request;

pub use collections::{Collections, ROUTE_PREFIX};
pub use error::MockError;
pub use request::{MockRequest, MockResponse, Resolution};

use crate::store::SharedStorage;
use crate::store::persist;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::time::Duration;

/// Statuses a `Response` can be constructed with in the sandbox.
pub const FETCH_STATUSES: RangeInclusive<u16> = 200..=599;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub path: String,
    pub method: String,
    pub status_code: u16,
    pub response_body: Value,
    #[serde(default)]
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    endpoints: Vec<Endpoint>,
    collections: Collections,
}

impl MockBackend {
    pub fn load(storage: &SharedStorage) -> Self {
        let endpoints: Vec<Endpoint> =
            persist::load_json(storage, persist::MOCK_ENDPOINTS).unwrap_or_default();
        let collections: BTreeMap<String, Vec<Value>> =
            persist::load_json(storage, persist::MOCK_COLLECTIONS).unwrap_or_default();
        let mut backend = Self {
            endpoints: Vec::new(),
            collections: Collections::from_map(collections),
        };
        for endpoint in endpoints {
            if FETCH_STATUSES.contains(&endpoint.status_code) {
                backend.add_endpoint(endpoint);
            } else {
                crate::log!(
                    "mock";
                    "dropping {} {}: status {} is out of range",
                    endpoint.method, endpoint.path, endpoint.status_code
                );
            }
        }
        backend
    }

    pub fn save(&self, storage: &SharedStorage) {
        persist::save_json(storage, persist::MOCK_ENDPOINTS, &self.endpoints);
        persist::save_json(storage, persist::MOCK_COLLECTIONS, self.collections.as_map());
    }

    /// Whether the network shim should be injected.
    pub fn is_active(&self) -> bool {
        !self.endpoints.is_empty() || !self.collections.is_empty()
    }

    /// Register an endpoint, replacing one with the same path and method.
    pub fn add_endpoint(&mut self, mut endpoint: Endpoint) {
        endpoint.method = endpoint.method.to_ascii_uppercase();
        match self
            .endpoints
            .iter_mut()
            .find(|e| e.path == endpoint.path && e.method == endpoint.method)
        {
            Some(existing) => *existing = endpoint,
            None => self.endpoints.push(endpoint),
        }
    }

    /// Register an endpoint from user-typed JSON text.
    pub fn add_endpoint_json(
        &mut self,
        path: &str,
        method: &str,
        status_code: u16,
        response_body: &str,
        delay_ms: u64,
    ) -> Result<(), MockError> {
        if !path.starts_with('/') {
            return Err(MockError::InvalidPath(path.to_string()));
        }
        if !FETCH_STATUSES.contains(&status_code) {
            return Err(MockError::InvalidStatus(status_code));
        }
        let response_body = serde_json::from_str(response_body)?;
        self.add_endpoint(Endpoint {
            path: path.to_string(),
            method: method.to_string(),
            status_code,
            response_body,
            delay_ms,
        });
        Ok(())
    }

    pub fn remove_endpoint(&mut self, path: &str, method: &str) -> bool {
        let method = method.to_ascii_uppercase();
        let before = self.endpoints.len();
        self.endpoints
            .retain(|e| !(e.path == path && e.method == method));
        self.endpoints.len() != before
    }

    /// Replace a collection from user-typed JSON array text.
    pub fn set_collection_json(&mut self, name: &str, items: &str) -> Result<(), MockError> {
        if name.is_empty() || name.contains(['/', '?', '#']) {
            return Err(MockError::InvalidName(name.to_string()));
        }
        match serde_json::from_str(items)? {
            Value::Array(items) => {
                self.collections.set(name, items);
                Ok(())
            }
            _ => Err(MockError::NotAnArray(name.to_string())),
        }
    }

    pub fn remove_collection(&mut self, name: &str) -> bool {
        self.collections.remove(name)
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn collections(&self) -> &Collections {
        &self.collections
    }

    /// Decide the response and its delay. Collection requests may mutate state.
    pub fn resolve(&mut self, request: &MockRequest) -> Resolution {
        if let Some(endpoint) = self
            .endpoints
            .iter()
            .find(|e| e.path == request.path && e.method == request.method)
        {
            return Resolution {
                response: MockResponse::json(endpoint.status_code, endpoint.response_body.clone()),
                delay: Duration::from_millis(endpoint.delay_ms),
            };
        }
        let response = self
            .collections
            .handle(request)
            .unwrap_or_else(|| MockResponse::not_found(request));
        Resolution::immediate(response)
    }

    /// Resolve and wait out the endpoint delay.
    pub async fn handle(&mut self, request: &MockRequest) -> MockResponse {
        let Resolution { response, delay } = self.resolve(request);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        response
    }
}
