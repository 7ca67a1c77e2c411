//! Embedded static resources for playpen.
//!
//! # Module Structure
//!
//! - `template` - Template types for typed variable injection
//! - `preview` - Document skeletons the composer fills in
//! - `shim` - Instrumentation scripts spliced into composed documents
//! - `serve` - The browser shell page served at `/`
//!
//! # Usage
//!
//! ```ignore
//! use embed::preview::{AGGREGATE_HTML, PageVars};
//! use embed::serve::{SHELL_HTML, ShellVars};
//!
//! let html = AGGREGATE_HTML.render(&PageVars { body: "<p>hi</p>", ..Default::default() });
//! let shell = SHELL_HTML.render(&ShellVars { ws_port: 35730 });
//! ```

mod template;

pub use template::{Template, TemplateVars, substitute};

pub mod preview {
    use super::{Template, TemplateVars, substitute};

    /// Variables shared by every preview skeleton.
    ///
    /// A skeleton ignores the placeholders it does not carry.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct PageVars<'a> {
        pub title: &'a str,
        pub shim: &'a str,
        pub style: &'a str,
        pub body: &'a str,
        pub script: &'a str,
    }

    impl TemplateVars for PageVars<'_> {
        fn apply(&self, content: &str) -> String {
            // File names are user text; `<title>` is not a raw-text element
            let title = crate::utils::html::escape(self.title);
            substitute(
                content,
                &[
                    ("__TITLE__", &title),
                    ("__SHIM__", self.shim),
                    ("__STYLE__", self.style),
                    ("__BODY__", self.body),
                    ("__SCRIPT__", self.script),
                ],
            )
        }
    }

    /// Whole-project document: one `<style>` in the head, one `<script>` at the end of the body.
    pub const AGGREGATE_HTML: Template<PageVars<'static>> =
        Template::new(include_str!("preview/aggregate.html"));

    /// Centered layout for a single SVG.
    pub const SVG_HTML: Template<PageVars<'static>> = Template::new(include_str!("preview/svg.html"));

    /// Readable typography for converted Markdown.
    pub const MARKDOWN_HTML: Template<PageVars<'static>> =
        Template::new(include_str!("preview/markdown.html"));

    pub const JSON_HTML: Template<PageVars<'static>> =
        Template::new(include_str!("preview/json.html"));

    /// Minimal document around a non-entry HTML file.
    pub const FRAGMENT_HTML: Template<PageVars<'static>> =
        Template::new(include_str!("preview/fragment.html"));

    /// Escaped, non-executed source text.
    pub const SOURCE_HTML: Template<PageVars<'static>> =
        Template::new(include_str!("preview/source.html"));
}

pub mod shim {
    /// Console and error capture, posting `console-log` messages to the parent.
    pub const CONSOLE_JS: &str = include_str!("shim/console.js");

    /// `window.fetch` replacement answered by the mock backend.
    pub const NETWORK_JS: &str = include_str!("shim/network.js");
}

pub mod serve {
    use super::{Template, TemplateVars, substitute};

    /// Variables for shell.html.
    pub struct ShellVars {
        pub ws_port: u16,
    }

    impl TemplateVars for ShellVars {
        fn apply(&self, content: &str) -> String {
            let port = self.ws_port.to_string();
            substitute(
                content,
                &[
                    ("__WS_PORT__", &port),
                    ("__VERSION__", env!("CARGO_PKG_VERSION")),
                ],
            )
        }
    }

    /// Browser shell hosting the sandboxed iframe.
    pub const SHELL_HTML: Template<ShellVars> = Template::new(include_str!("serve/shell.html"));
}

#[cfg(test)]
mod tests {
    use super::preview::*;
    use super::serve::*;

    #[test]
    fn test_aggregate_skeleton_has_single_style_and_script() {
        let html = AGGREGATE_HTML.render(&PageVars {
            title: "index.html",
            style: "p{}",
            body: "<p>x</p>",
            script: "run()",
            ..Default::default()
        });
        assert_eq!(html.matches("<style>").count(), 1);
        assert_eq!(html.matches("<script>").count(), 1);
        assert!(html.find("<p>x</p>").unwrap() < html.find("run()").unwrap());
        assert!(!html.contains("__"));
    }

    #[test]
    fn test_title_is_escaped() {
        let html = SVG_HTML.render(&PageVars {
            title: "a</title><b>.svg",
            ..Default::default()
        });
        assert!(html.contains("<title>a&lt;/title&gt;&lt;b&gt;.svg</title>"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_source_skeleton_has_no_script() {
        let html = SOURCE_HTML.render(&PageVars {
            shim: "should not appear",
            body: "a &lt; b",
            ..Default::default()
        });
        assert!(!html.contains("<script"));
        assert!(!html.contains("should not appear"));
    }

    #[test]
    fn test_shell_injects_port() {
        let html = SHELL_HTML.render(&ShellVars { ws_port: 40001 });
        assert!(html.contains(":40001"));
        assert!(html.contains(
            r#"sandbox="allow-scripts allow-same-origin allow-modals allow-forms allow-popups""#
        ));
        assert!(!html.contains("__WS_PORT__"));
    }
}
