//! Markdown to HTML as an ordered list of rewrite rules.
//!
//! Each rule sees the output of the previous one, so the order below is part
//! of the contract. Fenced code is stashed behind placeholders first and
//! restored last; every rule in between works on lines and inline patterns
//! only. Inline code containing `**` and nested lists are not handled.

use crate::utils::html::{escape, escape_attr, is_block_element, leading_tag};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Placeholder delimiter for stashed code blocks.
const MARK: char = '\u{1}';

type Stash = Vec<String>;

enum Rule {
    /// Regex replacement with `${n}` group references.
    Replace(&'static LazyLock<Regex>, &'static str),
    /// Arbitrary rewrite with access to the code-block stash.
    Rewrite(fn(&str, &mut Stash) -> String),
}

static FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ms)^```[ \t]*([\w+#.-]*)[ \t]*\n(.*?)^```[ \t]*$").unwrap()
});
static H3: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^### (.+)$").unwrap());
static H2: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^## (.+)$").unwrap());
static H1: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^# (.+)$").unwrap());
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*\n]+)\*").unwrap());
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`\n]+)`").unwrap());
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]\n]+)\]\(([^)\s]+)\)").unwrap());
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("\u{1}([0-9]+)\u{1}").unwrap());

static RULES: [(&str, Rule); 12] = [
    ("fenced code", Rule::Rewrite(stash_fences)),
    ("h3", Rule::Replace(&H3, "<h3>${1}</h3>")),
    ("h2", Rule::Replace(&H2, "<h2>${1}</h2>")),
    ("h1", Rule::Replace(&H1, "<h1>${1}</h1>")),
    ("bold", Rule::Replace(&BOLD, "<strong>${1}</strong>")),
    ("italic", Rule::Replace(&ITALIC, "<em>${1}</em>")),
    ("inline code", Rule::Rewrite(inline_code)),
    ("list", Rule::Rewrite(lists)),
    ("link", Rule::Rewrite(links)),
    ("paragraph", Rule::Rewrite(paragraphs)),
    ("line break", Rule::Rewrite(line_breaks)),
    ("restore code", Rule::Rewrite(restore_fences)),
];

/// Convert Markdown source to an HTML fragment.
pub fn to_html(source: &str) -> String {
    let mut stash = Stash::new();
    let mut text = source.replace("\r\n", "\n");
    for (_, rule) in &RULES {
        text = match rule {
            Rule::Replace(pattern, replacement) => {
                pattern.replace_all(&text, *replacement).into_owned()
            }
            Rule::Rewrite(rewrite) => rewrite(&text, &mut stash),
        };
    }
    text
}

fn stash_fences(text: &str, stash: &mut Stash) -> String {
    FENCE
        .replace_all(text, |caps: &Captures| {
            let lang = &caps[1];
            let code = caps[2].strip_suffix('\n').unwrap_or(&caps[2]);
            let class = if lang.is_empty() {
                String::new()
            } else {
                format!(r#" class="language-{}""#, escape_attr(lang))
            };
            stash.push(format!("<pre><code{class}>{}</code></pre>", escape(code)));
            format!("{MARK}{}{MARK}", stash.len() - 1)
        })
        .into_owned()
}

fn inline_code(text: &str, _: &mut Stash) -> String {
    INLINE_CODE
        .replace_all(text, |caps: &Captures| format!("<code>{}</code>", escape(&caps[1])))
        .into_owned()
}

/// `- item` lines become `<li>`, each consecutive run wrapped in one `<ul>`.
fn lists(text: &str, _: &mut Stash) -> String {
    let mut out = Vec::new();
    let mut in_list = false;
    for line in text.split('\n') {
        match line.strip_prefix("- ") {
            Some(item) => {
                if !in_list {
                    out.push("<ul>".to_string());
                    in_list = true;
                }
                out.push(format!("<li>{item}</li>"));
            }
            None => {
                if in_list {
                    out.push("</ul>".to_string());
                    in_list = false;
                }
                out.push(line.to_string());
            }
        }
    }
    if in_list {
        out.push("</ul>".to_string());
    }
    out.join("\n")
}

fn links(text: &str, _: &mut Stash) -> String {
    LINK.replace_all(text, |caps: &Captures| {
        format!(r#"<a href="{}">{}</a>"#, escape_attr(&caps[2]), &caps[1])
    })
    .into_owned()
}

/// Wrap every non-empty line that does not open with a block-level tag.
fn paragraphs(text: &str, _: &mut Stash) -> String {
    text.split('\n')
        .map(|line| {
            let trimmed = line.trim();
            let is_block = leading_tag(trimmed).is_some_and(is_block_element);
            if trimmed.is_empty() || is_block || is_placeholder(trimmed) {
                line.to_string()
            } else {
                format!("<p>{trimmed}</p>")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Paragraphs on adjacent lines merge into one, joined by `<br>`.
fn line_breaks(text: &str, _: &mut Stash) -> String {
    text.replace("</p>\n<p>", "<br>\n")
}

fn restore_fences(text: &str, stash: &mut Stash) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|i| stash.get(i).cloned())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn is_placeholder(line: &str) -> bool {
    line.len() > 2
        && line.starts_with(MARK)
        && line.ends_with(MARK)
        && line[1..line.len() - 1].bytes().all(|b| b.is_ascii_digit())
}
