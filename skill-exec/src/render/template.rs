use std::borrow::Cow;
use std::sync::LazyLock;

use handlebars::{Handlebars, Template};
use regex::{Captures, Regex};
use serde_json::Value as JsonValue;

static MUSTACHE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(.*?)\}\}").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TemplateError {
    #[error("template parse error: {0}")]
    Parse(String),
    #[error("template execution error: {0}")]
    Execution(String),
}

/// Handlebars with HTML escaping off; output is plain text for a caller, not markup.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    registry: Handlebars<'static>,
}

impl TemplateRenderer {
    pub fn new(strict: bool) -> Self {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        registry.set_strict_mode(strict);
        Self { registry }
    }

    pub fn render(&self, source: &str, context: &JsonValue) -> Result<String, TemplateError> {
        let source = normalize_dot_paths(source);
        // Compile separately so a bad template is told apart from a failed render.
        Template::compile(&source).map_err(|e| TemplateError::Parse(e.to_string()))?;
        self.registry
            .render_template(&source, context)
            .map_err(|e| TemplateError::Execution(e.to_string()))
    }
}

/// Rewrite dot-rooted field paths (`{{.Error}}`, `{{ .user.login }}`, `{{.}}`) into Handlebars
/// paths (`{{Error}}`, `{{ user.login }}`, `{{this}}`).
///
/// Only whole tokens inside `{{ }}` are touched; quoted literals and Handlebars' own `./x` and
/// `../x` paths are left alone.
pub fn normalize_dot_paths(source: &str) -> Cow<'_, str> {
    MUSTACHE_RE.replace_all(source, |caps: &Captures<'_>| {
        format!("{{{{{}}}}}", rewrite_expression(&caps[1]))
    })
}

fn rewrite_expression(expr: &str) -> String {
    let mut out = String::with_capacity(expr.len());
    let mut token = String::new();
    let mut quote: Option<char> = None;

    for c in expr.chars() {
        if let Some(q) = quote {
            out.push(c);
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => {
                out.push_str(&rewrite_token(&token));
                token.clear();
                quote = Some(c);
                out.push(c);
            }
            c if c.is_whitespace() || c == '(' || c == ')' => {
                out.push_str(&rewrite_token(&token));
                token.clear();
                out.push(c);
            }
            c => token.push(c),
        }
    }
    out.push_str(&rewrite_token(&token));
    out
}

fn rewrite_token(token: &str) -> Cow<'_, str> {
    if token == "." {
        return Cow::Borrowed("this");
    }
    match token.strip_prefix('.') {
        Some(rest) if rest.starts_with(|c: char| c.is_alphabetic() || c == '_') => {
            Cow::Borrowed(rest)
        }
        _ => Cow::Borrowed(token),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dot_paths_become_handlebars_paths() {
        assert_eq!(normalize_dot_paths("Failed: {{.Error}}"), "Failed: {{Error}}");
        assert_eq!(normalize_dot_paths("{{ .user.login }}"), "{{ user.login }}");
        assert_eq!(normalize_dot_paths("{{.}}"), "{{this}}");
        assert_eq!(
            normalize_dot_paths("{{#if .ok}}{{.name}}{{/if}}"),
            "{{#if ok}}{{name}}{{/if}}"
        );
    }

    #[test]
    fn handlebars_paths_are_untouched() {
        for src in ["{{name}}", "{{../parent}}", "{{./name}}", "{{#each items}}{{this}}{{/each}}"] {
            assert_eq!(normalize_dot_paths(src), src);
        }
        assert_eq!(normalize_dot_paths(r#"{{lookup . ".x"}}"#), r#"{{lookup this ".x"}}"#);
    }

    #[test]
    fn renders_dot_rooted_templates() {
        let r = TemplateRenderer::new(false);
        let out = r
            .render("{{.user.login}} owns {{.name}}", &json!({"name": "hello", "user": {"login": "octo"}}))
            .unwrap();
        assert_eq!(out, "octo owns hello");
    }
}
