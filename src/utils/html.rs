//! Small HTML helpers for the composer: escaping, raw-text safety for
//! inlined `<style>`/`<script>` bodies, block detection for the Markdown
//! paragraph rule, and attribute parsing for reference stripping.

use std::borrow::Cow;

/// Escape text for element content or a quoted attribute value.
///
/// Borrows when nothing needs escaping, which is the common case for
/// Markdown words and file names.
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['<', '>', '&', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + s.len() / 8);
    for c in s.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Same rules as [`escape`]; used where the value lands in an attribute.
#[inline]
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    escape(s)
}

/// Rewrite every `</tag` (ASCII case-insensitive) as `<\/tag`.
///
/// Content inlined into a `<script>` or `<style>` element cannot close its
/// own element early once this has been applied.
pub fn neutralize_end_tag<'a>(s: &'a str, tag: &str) -> Cow<'a, str> {
    let needle_len = tag.len() + 2;
    let bytes = s.as_bytes();
    let matches_at = |i: usize| {
        bytes[i] == b'<'
            && bytes.get(i + 1) == Some(&b'/')
            && bytes
                .get(i + 2..i + needle_len)
                .is_some_and(|name| name.eq_ignore_ascii_case(tag.as_bytes()))
    };

    if !(0..bytes.len()).any(matches_at) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    let mut last = 0;
    for i in 0..bytes.len() {
        if matches_at(i) {
            result.push_str(&s[last..=i]);
            result.push('\\');
            last = i + 1;
        }
    }
    result.push_str(&s[last..]);
    Cow::Owned(result)
}

/// Lines starting with one of these are left out of paragraph wrapping.
pub fn is_block_element(tag: &str) -> bool {
    matches!(
        tag,
        "address"
            | "article"
            | "aside"
            | "blockquote"
            | "div"
            | "dl"
            | "figure"
            | "footer"
            | "form"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "header"
            | "hr"
            | "li"
            | "main"
            | "nav"
            | "ol"
            | "p"
            | "pre"
            | "section"
            | "table"
            | "ul"
    )
}

/// Name of the first tag in `line`, if it starts with one (`<ul>` -> `ul`).
pub fn leading_tag(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('<')?;
    let rest = rest.strip_prefix('/').unwrap_or(rest);
    let end = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    (end > 0).then(|| &rest[..end])
}

/// Parse HTML-style attributes from a string.
///
/// Input: `rel="stylesheet" href='styles.css' defer`
/// Output: `vec![("rel", "stylesheet"), ("href", "styles.css"), ("defer", "")]`
///
/// Attribute names are lowercased.
pub fn parse_attributes(s: &str) -> Vec<(String, String)> {
    let mut attrs = Vec::new();
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_whitespace() || c == '/' {
            continue;
        }

        let mut name = String::new();
        name.push(c.to_ascii_lowercase());
        while let Some(next) = chars.next_if(|&n| n != '=' && !n.is_whitespace()) {
            name.push(next.to_ascii_lowercase());
        }

        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        if chars.next_if_eq(&'=').is_none() {
            // Boolean attribute (no value)
            attrs.push((name, String::new()));
            continue;
        }

        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        let mut value = String::new();
        if let Some(quote) = chars.next_if(|&c| c == '"' || c == '\'') {
            for c in chars.by_ref() {
                if c == quote {
                    break;
                }
                value.push(c);
            }
        } else {
            while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                value.push(c);
            }
        }
        attrs.push((name, value));
    }

    attrs
}

/// Look up an attribute value by (lowercase) name.
pub fn attribute<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain() {
        assert!(matches!(escape("hello world"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_special_chars() {
        assert_eq!(escape("<b>\"a\" & 'b'</b>"), "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;");
    }

    #[test]
    fn test_neutralize_end_tag() {
        assert_eq!(
            neutralize_end_tag("let s = '</script>';", "script"),
            "let s = '<\\/script>';"
        );
        assert_eq!(neutralize_end_tag("a</SCRIPT >", "script"), "a<\\/SCRIPT >");
        assert_eq!(neutralize_end_tag("p { }</style>", "style"), "p { }<\\/style>");
        assert!(matches!(
            neutralize_end_tag("no closing tag here", "script"),
            Cow::Borrowed(_)
        ));
        assert_eq!(neutralize_end_tag("</s", "script"), "</s");
    }

    #[test]
    fn test_block_elements() {
        assert!(is_block_element("div"));
        assert!(is_block_element("ul"));
        assert!(is_block_element("pre"));
        assert!(!is_block_element("span"));
        assert!(!is_block_element("strong"));
    }

    #[test]
    fn test_leading_tag() {
        assert_eq!(leading_tag("<h1>Title</h1>"), Some("h1"));
        assert_eq!(leading_tag("</ul>"), Some("ul"));
        assert_eq!(leading_tag("<pre><code>"), Some("pre"));
        assert_eq!(leading_tag("plain text"), None);
        assert_eq!(leading_tag("< 3"), None);
    }

    #[test]
    fn test_parse_attributes() {
        let attrs = parse_attributes(r#"rel="stylesheet" HREF='./styles.css' defer"#);
        assert_eq!(attrs.len(), 3);
        assert_eq!(attribute(&attrs, "rel"), Some("stylesheet"));
        assert_eq!(attribute(&attrs, "href"), Some("./styles.css"));
        assert_eq!(attribute(&attrs, "defer"), Some(""));
        assert_eq!(attribute(&attrs, "src"), None);
    }

    #[test]
    fn test_parse_attributes_unquoted_and_self_closing() {
        let attrs = parse_attributes("rel=stylesheet href=a.css /");
        assert_eq!(attribute(&attrs, "href"), Some("a.css"));
        assert_eq!(attrs.len(), 2);
    }
}
