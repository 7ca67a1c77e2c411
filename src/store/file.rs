//! Project files and their kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The HTML entry file: body of every aggregate document.
pub const ENTRY_HTML: &str = "index.html";
/// Inlined first in the aggregate `<style>` block.
pub const ENTRY_CSS: &str = "styles.css";
/// Inlined first (after the shim) in the aggregate `<script>` block.
pub const ENTRY_JS: &str = "script.js";

/// Names that can be neither deleted nor renamed.
pub const PROTECTED: [&str; 3] = [ENTRY_HTML, ENTRY_CSS, ENTRY_JS];

const DEFAULT_HTML: &str = r#"<link rel="stylesheet" href="styles.css">

<main class="card">
  <h1>Hello, playpen!</h1>
  <p>Edit the files on the left and watch this preview update.</p>
  <button id="greet">Click me</button>
  <p id="output"></p>
</main>

<script src="script.js"></script>
"#;

const DEFAULT_CSS: &str = r#"body {
  font-family: system-ui, sans-serif;
  display: grid;
  place-items: center;
  min-height: 100vh;
  margin: 0;
  background: #f4f4f8;
}

.card {
  padding: 2rem 3rem;
  border-radius: 12px;
  background: white;
  box-shadow: 0 8px 24px rgba(0, 0, 0, 0.08);
  text-align: center;
}

#greet {
  padding: 0.6rem 1.4rem;
  border: 0;
  border-radius: 6px;
  background: #5b5bd6;
  color: white;
  font-size: 1rem;
  cursor: pointer;
}
"#;

const DEFAULT_JS: &str = r#"let clicks = 0;

document.getElementById('greet').addEventListener('click', () => {
  clicks += 1;
  document.getElementById('output').textContent = `Clicked ${clicks} time(s)`;
  console.log('greet clicked', clicks);
});
"#;

const SEED_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="200" viewBox="0 0 200 200">
  <circle cx="100" cy="100" r="80" fill="#5b5bd6" />
  <text x="100" y="108" font-size="24" text-anchor="middle" fill="white">SVG</text>
</svg>
"##;

/// Kind of a project file. Immutable once the file exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Html,
    Css,
    Js,
    Svg,
    Markdown,
    Json,
    Other,
}

impl FileKind {
    /// Infer a kind from a file name's extension.
    pub fn from_name(name: &str) -> Self {
        let ext = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "html" | "htm" => Self::Html,
            "css" => Self::Css,
            "js" | "mjs" | "cjs" => Self::Js,
            "svg" => Self::Svg,
            "md" | "markdown" => Self::Markdown,
            "json" => Self::Json,
            _ => Self::Other,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Css => "css",
            Self::Js => "js",
            Self::Svg => "svg",
            Self::Markdown => "markdown",
            Self::Json => "json",
            Self::Other => "other",
        }
    }

    /// Content a freshly added file of this kind starts with.
    pub fn seed(self, name: &str) -> String {
        match self {
            Self::Html => format!(
                "<!DOCTYPE html>\n<html>\n<head>\n  <title>{name}</title>\n</head>\n<body>\n  <h1>{name}</h1>\n</body>\n</html>\n"
            ),
            Self::Css => format!("/* {name} */\n"),
            Self::Js => format!("// {name}\n"),
            Self::Svg => SEED_SVG.to_string(),
            Self::Markdown => "# Title\n\nStart writing here.\n".to_string(),
            Self::Json => "{}".to_string(),
            Self::Other => String::new(),
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FileKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "css" => Ok(Self::Css),
            "js" | "javascript" => Ok(Self::Js),
            "svg" => Ok(Self::Svg),
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            "other" => Ok(Self::Other),
            _ => Err(format!(
                "unknown file kind `{s}` (expected html, css, js, svg, markdown, json or other)"
            )),
        }
    }
}

/// One project file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub name: String,
    pub content: String,
    pub kind: FileKind,
}

impl File {
    pub fn new(name: impl Into<String>, content: impl Into<String>, kind: FileKind) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            kind,
        }
    }
}

/// The three protected files a new project starts with.
pub fn defaults() -> Vec<File> {
    vec![
        File::new(ENTRY_HTML, DEFAULT_HTML, FileKind::Html),
        File::new(ENTRY_CSS, DEFAULT_CSS, FileKind::Css),
        File::new(ENTRY_JS, DEFAULT_JS, FileKind::Js),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_name() {
        assert_eq!(FileKind::from_name("index.html"), FileKind::Html);
        assert_eq!(FileKind::from_name("page.HTM"), FileKind::Html);
        assert_eq!(FileKind::from_name("utils.mjs"), FileKind::Js);
        assert_eq!(FileKind::from_name("note.md"), FileKind::Markdown);
        assert_eq!(FileKind::from_name("data.json"), FileKind::Json);
        assert_eq!(FileKind::from_name("logo.svg"), FileKind::Svg);
        assert_eq!(FileKind::from_name("README"), FileKind::Other);
        assert_eq!(FileKind::from_name("notes.txt"), FileKind::Other);
    }

    #[test]
    fn test_kind_serde_names() {
        assert_eq!(serde_json::to_string(&FileKind::Markdown).unwrap(), "\"markdown\"");
        let kind: FileKind = serde_json::from_str("\"js\"").unwrap();
        assert_eq!(kind, FileKind::Js);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("JS".parse::<FileKind>(), Ok(FileKind::Js));
        assert_eq!("md".parse::<FileKind>(), Ok(FileKind::Markdown));
        assert!("exe".parse::<FileKind>().is_err());
    }

    #[test]
    fn test_seed_content() {
        assert_eq!(FileKind::Json.seed("a.json"), "{}");
        assert_eq!(FileKind::Other.seed("a.txt"), "");
        assert!(FileKind::Css.seed("theme.css").contains("theme.css"));
        assert!(FileKind::Svg.seed("x.svg").starts_with("<svg"));
    }

    #[test]
    fn test_defaults_demonstrate_button() {
        let files = defaults();
        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, PROTECTED);
        assert!(files[0].content.contains("id=\"greet\""));
        assert!(files[2].content.contains("getElementById('greet')"));
    }
}
