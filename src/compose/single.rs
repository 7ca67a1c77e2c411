//! Single-file previews, chosen by file kind.

use super::markdown;
use crate::embed::preview::{
    FRAGMENT_HTML, JSON_HTML, MARKDOWN_HTML, PageVars, SOURCE_HTML, SVG_HTML,
};
use crate::instrument::Instrumentation;
use crate::store::{File, FileKind};
use crate::utils::html::escape;

pub fn render(file: &File, instrumentation: &Instrumentation) -> String {
    let shim = instrumentation.as_str();
    let wrap = |body: &str| -> String {
        match file.kind {
            FileKind::Svg => SVG_HTML.render(&page(&file.name, shim, body)),
            FileKind::Markdown => MARKDOWN_HTML.render(&page(&file.name, shim, body)),
            FileKind::Json => JSON_HTML.render(&page(&file.name, shim, body)),
            FileKind::Html => FRAGMENT_HTML.render(&page(&file.name, shim, body)),
            FileKind::Css | FileKind::Js | FileKind::Other => {
                SOURCE_HTML.render(&page(&file.name, "", body))
            }
        }
    };

    match file.kind {
        FileKind::Svg | FileKind::Html => wrap(&file.content),
        FileKind::Markdown => wrap(&markdown::to_html(&file.content)),
        FileKind::Json => wrap(&json_body(&file.content)),
        FileKind::Css | FileKind::Js | FileKind::Other => wrap(&escape(&file.content)),
    }
}

fn page<'a>(title: &'a str, shim: &'a str, body: &'a str) -> PageVars<'a> {
    PageVars {
        title,
        shim,
        body,
        ..PageVars::default()
    }
}

/// Pretty form when parseable, otherwise a visible notice plus the raw text.
fn json_body(content: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(content) {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(pretty) => format!("<pre>{}</pre>", escape(&pretty)),
            Err(e) => invalid_json(content, &e),
        },
        Err(e) => invalid_json(content, &e),
    }
}

fn invalid_json(content: &str, error: &serde_json::Error) -> String {
    format!(
        "<div class=\"json-error\" data-invalid-json>Invalid JSON: {}</div>\n<pre>{}</pre>",
        escape(&error.to_string()),
        escape(content)
    )
}
