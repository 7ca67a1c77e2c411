//! Whole-project composition around the entry HTML.

use crate::embed::preview::{AGGREGATE_HTML, PageVars};
use crate::instrument::Instrumentation;
use crate::store::{ENTRY_CSS, ENTRY_HTML, ENTRY_JS, FileKind, ProjectSnapshot};
use crate::utils::html::{attribute, neutralize_end_tag, parse_attributes};
use regex::{Captures, Regex};
use std::sync::LazyLock;

static LINK_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<link\b([^>]*)>").unwrap());
static SCRIPT_SRC_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b([^>]*)>\s*</script\s*>").unwrap());

/// Styles in the head, shim and scripts at the end of the body, entry HTML
/// as the body. Entry files come first, the rest follow in listing order.
pub fn render(snapshot: &ProjectSnapshot, instrumentation: &Instrumentation) -> String {
    let style = join(snapshot, FileKind::Css, ENTRY_CSS);
    let style = neutralize_end_tag(&style, "style");

    let scripts = join(snapshot, FileKind::Js, ENTRY_JS);
    let script = format!("{}\n{scripts}", instrumentation.as_str());
    let script = neutralize_end_tag(&script, "script");

    let body = snapshot
        .get(ENTRY_HTML)
        .map(|entry| strip_inlined_references(&entry.content, snapshot))
        .unwrap_or_default();

    AGGREGATE_HTML.render(&PageVars {
        title: ENTRY_HTML,
        shim: "",
        style: &style,
        body: &body,
        script: &script,
    })
}

fn join(snapshot: &ProjectSnapshot, kind: FileKind, entry: &str) -> String {
    snapshot
        .entry_first(kind, entry)
        .map(|f| f.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Remove `<link rel="stylesheet">` and `<script src>` tags that point at a
/// project file. Everything else is kept byte for byte.
fn strip_inlined_references(html: &str, snapshot: &ProjectSnapshot) -> String {
    let is_project_file = |reference: &str| {
        let name = reference.strip_prefix("./").unwrap_or(reference);
        snapshot.get(name).is_some()
    };

    let html = LINK_TAG.replace_all(html, |caps: &Captures| {
        let attrs = parse_attributes(&caps[1]);
        let is_stylesheet = attribute(&attrs, "rel").is_some_and(|rel| {
            rel.split_ascii_whitespace()
                .any(|token| token.eq_ignore_ascii_case("stylesheet"))
        });
        match attribute(&attrs, "href") {
            Some(href) if is_stylesheet && is_project_file(href) => String::new(),
            _ => caps[0].to_string(),
        }
    });

    SCRIPT_SRC_TAG
        .replace_all(&html, |caps: &Captures| {
            let attrs = parse_attributes(&caps[1]);
            match attribute(&attrs, "src") {
                Some(src) if is_project_file(src) => String::new(),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}
