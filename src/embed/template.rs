//! Embedded HTML templates with `__NAME__` placeholders.
//!
//! Each template is tied to the variable struct that fills it, so a preview
//! page cannot be rendered with the shell page's variables by mistake.

use std::marker::PhantomData;

pub trait TemplateVars {
    fn apply(&self, content: &str) -> String;
}

#[derive(Debug, Clone, Copy)]
pub struct Template<V> {
    content: &'static str,
    _marker: PhantomData<V>,
}

impl<V> Template<V> {
    pub const fn new(content: &'static str) -> Self {
        Self {
            content,
            _marker: PhantomData,
        }
    }
}

impl<V: TemplateVars> Template<V> {
    pub fn render(&self, vars: &V) -> String {
        vars.apply(self.content)
    }
}

/// Replace `__NAME__` placeholders in one pass.
///
/// Substituted values are never rescanned, so user content that happens to
/// contain a placeholder name is emitted as-is.
pub fn substitute(content: &str, vars: &[(&str, &str)]) -> String {
    let extra: usize = vars.iter().map(|(_, value)| value.len()).sum();
    let mut out = String::with_capacity(content.len() + extra);
    let mut rest = content;

    while let Some(start) = rest.find("__") {
        let tail = &rest[start..];
        match vars.iter().find(|(key, _)| tail.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(&rest[..start]);
                out.push_str(value);
                rest = &tail[key.len()..];
            }
            None => {
                out.push_str(&rest[..start + 2]);
                rest = &tail[2..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_replaces_each_placeholder() {
        let out = substitute(
            "<title>__TITLE__</title><body>__BODY__</body>",
            &[("__TITLE__", "demo"), ("__BODY__", "<p>hi</p>")],
        );
        assert_eq!(out, "<title>demo</title><body><p>hi</p></body>");
    }

    #[test]
    fn test_substitute_does_not_rescan_values() {
        let out = substitute(
            "__BODY__|__SCRIPT__",
            &[("__BODY__", "literal __SCRIPT__ text"), ("__SCRIPT__", "x()")],
        );
        assert_eq!(out, "literal __SCRIPT__ text|x()");
    }

    #[test]
    fn test_substitute_keeps_unknown_markers() {
        assert_eq!(substitute("a __proto__ b", &[("__BODY__", "x")]), "a __proto__ b");
    }
}
