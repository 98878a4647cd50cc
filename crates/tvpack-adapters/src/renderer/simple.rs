//! Mustache-style variable interpolation.
//!
//! Supported tags:
//!
//! | Tag            | Output                              |
//! |----------------|-------------------------------------|
//! | `{{key}}`      | value, HTML-escaped                 |
//! | `{{{key}}}`    | value, raw                          |
//! | `{{& key}}`    | value, raw                          |
//! | `{{! note}}`   | nothing (comment)                   |
//!
//! Unknown keys expand to the empty string. Sections, partials and delimiter
//! changes are rejected.

use std::path::PathBuf;

use thiserror::Error;
use tracing::instrument;
use tvpack_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::RenderContext,
    error::{PackError, PackResult},
};

/// Malformed template text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("unclosed tag starting at byte {offset}")]
    Unclosed { offset: usize },

    #[error("empty tag at byte {offset}")]
    EmptyTag { offset: usize },

    #[error("unsupported tag '{tag}' at byte {offset}: only variables are supported")]
    Unsupported { tag: String, offset: usize },
}

impl From<RenderError> for PackError {
    fn from(e: RenderError) -> Self {
        ApplicationError::RenderingFailed {
            path: PathBuf::new(),
            reason: e.to_string(),
        }
        .into()
    }
}

/// Renderer for the mustache variable subset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRenderer;

impl SimpleRenderer {
    /// Create a new simple renderer.
    pub fn new() -> Self {
        Self
    }

    /// Expand `template`, reporting malformed tags.
    pub fn expand(&self, template: &str, context: &RenderContext) -> Result<String, RenderError> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        let mut offset = 0;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let tag_offset = offset + start;
            let after_open = &rest[start + 2..];

            let (raw, body, consumed) = if let Some(triple) = after_open.strip_prefix('{') {
                let end = triple
                    .find("}}}")
                    .ok_or(RenderError::Unclosed { offset: tag_offset })?;
                (true, &triple[..end], 2 + 1 + end + 3)
            } else {
                let end = after_open
                    .find("}}")
                    .ok_or(RenderError::Unclosed { offset: tag_offset })?;
                let body = &after_open[..end];
                match body.trim_start().strip_prefix('&') {
                    Some(key) => (true, key, 2 + end + 2),
                    None => (false, body, 2 + end + 2),
                }
            };

            let key = body.trim();
            match key.chars().next() {
                None => return Err(RenderError::EmptyTag { offset: tag_offset }),
                Some('!') if !raw => {}
                Some('#' | '^' | '/' | '>' | '=') if !raw => {
                    return Err(RenderError::Unsupported {
                        tag: key.to_string(),
                        offset: tag_offset,
                    });
                }
                Some(_) => {
                    let value = context.get(key).unwrap_or_default();
                    if raw {
                        out.push_str(value);
                    } else {
                        escape_html_into(value, &mut out);
                    }
                }
            }

            rest = &rest[start + consumed..];
            offset += start + consumed;
        }

        out.push_str(rest);
        Ok(out)
    }
}

impl TemplateRenderer for SimpleRenderer {
    #[instrument(skip_all, fields(variables = context.len()))]
    fn render(&self, template: &str, context: &RenderContext) -> PackResult<String> {
        Ok(self.expand(template, context)?)
    }
}

/// Escape the characters mustache escapes.
fn escape_html_into(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '/' => out.push_str("&#x2F;"),
            '`' => out.push_str("&#x60;"),
            '=' => out.push_str("&#x3D;"),
            other => out.push(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> RenderContext {
        RenderContext::new()
            .with_variable("name", "Tom & Jerry")
            .with_variable("icon", "img/logo.png")
            .with_variable("width", 1280)
    }

    fn render(template: &str) -> String {
        SimpleRenderer.render(template, &ctx()).unwrap()
    }

    #[test]
    fn escapes_double_mustache() {
        assert_eq!(render("<n>{{name}}</n>"), "<n>Tom &amp; Jerry</n>");
        assert_eq!(render("{{icon}}"), "img&#x2F;logo.png");
    }

    #[test]
    fn raw_forms_do_not_escape() {
        assert_eq!(render("{{{name}}}"), "Tom & Jerry");
        assert_eq!(render("{{& icon}}"), "img/logo.png");
        assert_eq!(render("{{{ icon }}}"), "img/logo.png");
    }

    #[test]
    fn whitespace_inside_tags_is_ignored() {
        assert_eq!(render("w: {{ width }}px"), "w: 1280px");
    }

    #[test]
    fn unknown_keys_expand_to_empty() {
        assert_eq!(render("[{{missing}}]"), "[]");
    }

    #[test]
    fn comments_are_dropped() {
        assert_eq!(render("a{{! note }}b"), "ab");
    }

    #[test]
    fn text_without_tags_is_unchanged() {
        let xml = "<?xml version=\"1.0\"?>\n<widget>{ not a tag }</widget>\n";
        assert_eq!(render(xml), xml);
    }

    #[test]
    fn malformed_tags_are_errors() {
        let r = SimpleRenderer;
        assert_eq!(
            r.expand("ok {{name", &ctx()),
            Err(RenderError::Unclosed { offset: 3 })
        );
        assert_eq!(r.expand("{{ }}", &ctx()), Err(RenderError::EmptyTag { offset: 0 }));
        assert!(matches!(
            r.expand("{{#items}}x{{/items}}", &ctx()),
            Err(RenderError::Unsupported { .. })
        ));
    }

    #[test]
    fn render_errors_become_rendering_failures() {
        let err = SimpleRenderer.render("{{{name}}", &ctx()).unwrap_err();
        assert!(matches!(
            err.as_application(),
            Some(ApplicationError::RenderingFailed { .. })
        ));
    }
}
