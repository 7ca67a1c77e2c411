//! MIME types for the routes of `playpen serve`.

use crate::store::FileKind;

/// Common MIME type constants.
pub mod types {
    pub const HTML: &str = "text/html; charset=utf-8";
    pub const PLAIN: &str = "text/plain; charset=utf-8";
    pub const CSS: &str = "text/css; charset=utf-8";
    pub const JAVASCRIPT: &str = "text/javascript; charset=utf-8";
    pub const JSON: &str = "application/json";
    pub const MARKDOWN: &str = "text/markdown; charset=utf-8";
    pub const SVG: &str = "image/svg+xml";
    pub const OCTET_STREAM: &str = "application/octet-stream";
}

/// MIME type of a project file, used for `/download/<name>`.
pub fn for_kind(kind: FileKind) -> &'static str {
    match kind {
        FileKind::Html => types::HTML,
        FileKind::Css => types::CSS,
        FileKind::Js => types::JAVASCRIPT,
        FileKind::Svg => types::SVG,
        FileKind::Markdown => types::MARKDOWN,
        FileKind::Json => types::JSON,
        FileKind::Other => types::OCTET_STREAM,
    }
}

/// Check if the MIME type represents text content.
pub fn is_text(mime: &str) -> bool {
    mime.starts_with("text/") || mime == types::JSON || mime == types::SVG
}
