//! Messages between the browser shell and the host.
//!
//! The shell holds no project state. It forwards user intent as
//! [`ClientMsg`] and renders whatever [`ShellMsg`] the host sends back.

use super::sandbox::{HostToSandbox, SandboxMessage};
use crate::sandbox::{ConsoleEvent, Viewport};
use crate::store::prefs::{EditorStyle, Layout, Settings};
use crate::store::{FileEntry, FileKind};
use serde::{Deserialize, Serialize};

/// Shell -> host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientMsg {
    /// A message the iframe posted, relayed verbatim.
    Sandbox { message: SandboxMessage },
    Select { name: String },
    Edit { name: String, content: String },
    Add {
        name: String,
        #[serde(default)]
        kind: Option<FileKind>,
    },
    Delete { name: String },
    Rename { from: String, to: String },
    Refresh,
    ClearConsole,
    Viewport { viewport: Viewport },
    Settings { settings: Settings },
    Layout { layout: Layout },
    Copy,
    AddEndpoint {
        path: String,
        #[serde(default = "default_method")]
        method: String,
        #[serde(default = "default_status")]
        status_code: u16,
        /// JSON text as typed by the user; validated by the host.
        response_body: String,
        #[serde(default)]
        delay_ms: u64,
    },
    AddCollection {
        name: String,
        /// JSON array text as typed by the user.
        items: String,
    },
}

fn default_method() -> String {
    "GET".to_string()
}

const fn default_status() -> u16 {
    200
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Host -> shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ShellMsg {
    Connected {
        version: String,
    },
    /// Everything the shell needs to redraw its chrome.
    State {
        files: Vec<FileEntry>,
        selected: String,
        content: String,
        settings: Settings,
        layout: Layout,
    },
    /// Replace the iframe document.
    Load {
        html: String,
        viewport: Viewport,
        width: String,
    },
    Loading {
        active: bool,
    },
    Viewport {
        viewport: Viewport,
        width: String,
    },
    Console {
        event: ConsoleEvent,
    },
    ConsoleCleared,
    Notice {
        level: NoticeLevel,
        text: String,
    },
    Clipboard {
        text: String,
    },
    /// Forward into the iframe.
    Sandbox {
        message: HostToSandbox,
    },
    Style {
        style: EditorStyle,
    },
}

impl ClientMsg {
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

impl ShellMsg {
    pub fn connected() -> Self {
        Self::Connected {
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn load(html: impl Into<String>, viewport: Viewport) -> Self {
        Self::Load {
            html: html.into(),
            viewport,
            width: viewport.width().to_string(),
        }
    }

    pub fn viewport(viewport: Viewport) -> Self {
        Self::Viewport {
            viewport,
            width: viewport.width().to_string(),
        }
    }

    pub fn notice(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self::Notice {
            level,
            text: text.into(),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"type":"console-cleared"}"#.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ConsoleLevel;

    #[test]
    fn test_client_messages_parse() {
        assert_eq!(
            ClientMsg::from_json(r#"{"type":"clear-console"}"#).unwrap(),
            ClientMsg::ClearConsole
        );
        assert_eq!(
            ClientMsg::from_json(r#"{"type":"rename","from":"a.js","to":"b.js"}"#).unwrap(),
            ClientMsg::Rename {
                from: "a.js".into(),
                to: "b.js".into()
            }
        );
        assert_eq!(
            ClientMsg::from_json(r#"{"type":"add","name":"x.md"}"#).unwrap(),
            ClientMsg::Add {
                name: "x.md".into(),
                kind: None
            }
        );
        assert_eq!(
            ClientMsg::from_json(r#"{"type":"viewport","viewport":"tablet"}"#).unwrap(),
            ClientMsg::Viewport {
                viewport: Viewport::Tablet
            }
        );
    }

    #[test]
    fn test_relayed_sandbox_message() {
        let msg = ClientMsg::from_json(
            r#"{"type":"sandbox","message":{"type":"console-log","level":"warn","content":"hm"}}"#,
        )
        .unwrap();
        assert_eq!(
            msg,
            ClientMsg::Sandbox {
                message: SandboxMessage::ConsoleLog {
                    level: ConsoleLevel::Warn,
                    content: "hm".into()
                }
            }
        );
    }

    #[test]
    fn test_add_endpoint_defaults_and_camel_case() {
        let msg = ClientMsg::from_json(
            r#"{"type":"add-endpoint","path":"/api/x","statusCode":201,"responseBody":"{\"ok\":true}"}"#,
        )
        .unwrap();
        assert_eq!(
            msg,
            ClientMsg::AddEndpoint {
                path: "/api/x".into(),
                method: "GET".into(),
                status_code: 201,
                response_body: r#"{"ok":true}"#.into(),
                delay_ms: 0,
            }
        );
    }

    #[test]
    fn test_unknown_client_message_fails() {
        assert!(ClientMsg::from_json(r#"{"type":"format-code"}"#).is_err());
        assert!(ClientMsg::from_json(r#"{"type":"edit","name":"a.js"}"#).is_err());
    }

    #[test]
    fn test_shell_message_shapes() {
        let json = ShellMsg::load("<p>x</p>", Viewport::Mobile).to_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "load");
        assert_eq!(value["viewport"], "mobile");
        assert_eq!(value["width"], "375px");

        let json = ShellMsg::ConsoleCleared.to_json();
        assert_eq!(json, r#"{"type":"console-cleared"}"#);

        let json = ShellMsg::Loading { active: true }.to_json();
        assert_eq!(json, r#"{"type":"loading","active":true}"#);
    }
}
