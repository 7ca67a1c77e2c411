//! Messages exchanged with the code running inside the preview iframe.
//!
//! | direction       | `type`                 | payload                   |
//! |-----------------|------------------------|---------------------------|
//! | sandbox -> host | `console-log`          | `level`, `content`        |
//! | sandbox -> host | `mock-fetch`           | `url`, `options`          |
//! | host -> sandbox | `mock-fetch-response`  | `url`, `response`         |

use crate::mock::MockResponse;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleLevel {
    Log,
    Warn,
    Error,
}

impl fmt::Display for ConsoleLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Log => "log",
            Self::Warn => "warn",
            Self::Error => "error",
        })
    }
}

/// The subset of `fetch` init options the network shim forwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// Posted by the instrumentation shim to `window.parent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SandboxMessage {
    ConsoleLog {
        level: ConsoleLevel,
        content: String,
    },
    MockFetch {
        url: String,
        #[serde(default)]
        options: FetchOptions,
    },
}

/// Posted into the iframe by the shell on the host's behalf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum HostToSandbox {
    MockFetchResponse { url: String, response: MockResponse },
}

impl SandboxMessage {
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}
