//! Normalized view of a `fetch` issued inside the sandbox.

use crate::protocol::FetchOptions;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

/// Origin relative URLs are resolved against. Only its path survives.
const SANDBOX_ORIGIN: &str = "http://sandbox.invalid/";

#[derive(Debug, Clone, PartialEq)]
pub struct MockRequest {
    /// Upper-cased HTTP method.
    pub method: String,
    /// Path without origin or query string.
    pub path: String,
    /// Parsed JSON body; non-JSON bodies are kept as a string value.
    pub body: Option<Value>,
}

impl MockRequest {
    pub fn new(method: &str, url: &str, body: Option<Value>) -> Self {
        Self {
            method: method.to_ascii_uppercase(),
            path: path_of(url),
            body,
        }
    }

    pub fn from_fetch(url: &str, options: &FetchOptions) -> Self {
        let method = options.method.as_deref().unwrap_or("GET");
        let body = options.body.as_deref().map(|raw| {
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
        });
        Self::new(method, url, body)
    }
}

/// Strip origin, query and fragment from `url`.
fn path_of(url: &str) -> String {
    let parsed = Url::parse(url).or_else(|_| {
        Url::parse(SANDBOX_ORIGIN).and_then(|base| base.join(url))
    });
    match parsed {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}

/// What the network shim turns into a `Response`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub data: Value,
}

impl MockResponse {
    /// A JSON response; `content-type` is always set.
    pub fn json(status: u16, data: Value) -> Self {
        let headers = BTreeMap::from([(
            "content-type".to_string(),
            "application/json".to_string(),
        )]);
        Self {
            status,
            headers,
            data,
        }
    }

    /// Response for requests nothing matched.
    pub fn not_found(request: &MockRequest) -> Self {
        Self::json(
            404,
            json!({
                "error": "Not found",
                "method": request.method,
                "path": request.path,
            }),
        )
    }
}

/// A response together with how long to wait before delivering it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub response: MockResponse,
    pub delay: Duration,
}

impl Resolution {
    pub fn immediate(response: MockResponse) -> Self {
        Self {
            response,
            delay: Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_strips_origin_and_query() {
        assert_eq!(path_of("/api/x"), "/api/x");
        assert_eq!(path_of("/api/x?page=2#top"), "/api/x");
        assert_eq!(path_of("https://example.com/api/x?y=1"), "/api/x");
        assert_eq!(path_of("api/x"), "/api/x");
    }

    #[test]
    fn test_from_fetch_normalizes() {
        let options = FetchOptions {
            method: Some("post".into()),
            body: Some(r#"{"title":"a"}"#.into()),
            ..FetchOptions::default()
        };
        let req = MockRequest::from_fetch("/api/todos", &options);
        assert_eq!(req.method, "POST");
        assert_eq!(req.body, Some(json!({"title": "a"})));

        let req = MockRequest::from_fetch("/api/todos", &FetchOptions::default());
        assert_eq!(req.method, "GET");
        assert_eq!(req.body, None);
    }

    #[test]
    fn test_non_json_body_kept_as_string() {
        let options = FetchOptions {
            method: Some("PUT".into()),
            body: Some("plain".into()),
            ..FetchOptions::default()
        };
        let req = MockRequest::from_fetch("/api/x", &options);
        assert_eq!(req.body, Some(Value::String("plain".into())));
    }
}
