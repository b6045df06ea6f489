//! Tera-backed page renderer.

use std::collections::HashMap;

use chrono::DateTime;
use tera::{Context, Tera, Value};

use press_core::ports::{RenderError, Renderer, Template};

pub struct TeraRenderer {
    tera: Tera,
}

impl TeraRenderer {
    /// Load every template matching `glob`, e.g. `templates/**/*.html`.
    pub fn new(glob: &str) -> Result<Self, RenderError> {
        let tera = Tera::new(glob).map_err(|e| RenderError::Failed(e.to_string()))?;
        tracing::info!(
            templates = tera.get_template_names().count(),
            glob,
            "Templates loaded"
        );
        Ok(Self::from_tera(tera))
    }

    /// Wrap an already populated engine.
    pub fn from_tera(mut tera: Tera) -> Self {
        tera.register_filter("date_format", date_format_filter);
        Self { tera }
    }
}

impl Renderer for TeraRenderer {
    fn render(&self, template: Template, context: &serde_json::Value) -> Result<String, RenderError> {
        let context = Context::from_value(context.clone())
            .map_err(|e| RenderError::Context(e.to_string()))?;

        self.tera
            .render(template.identifier(), &context)
            .map_err(|e| match &e.kind {
                tera::ErrorKind::TemplateNotFound(name) => RenderError::MissingTemplate(name.clone()),
                _ => {
                    tracing::error!(template = %template, error = ?e, "Template rendering failed");
                    RenderError::Failed(e.to_string())
                }
            })
    }
}

/// Formats an RFC 3339 timestamp; anything else passes through untouched.
fn date_format_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let Some(date) = value.as_str().and_then(|s| DateTime::parse_from_rfc3339(s).ok()) else {
        return Ok(value.clone());
    };
    let format = args
        .get("format")
        .and_then(|f| f.as_str())
        .unwrap_or("%B %-d, %Y");
    Ok(Value::String(date.format(format).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn renderer(name: &str, body: &str) -> TeraRenderer {
        let mut tera = Tera::default();
        tera.add_raw_template(name, body).unwrap();
        TeraRenderer::from_tera(tera)
    }

    #[test]
    fn test_renders_page_context() {
        let renderer = renderer(
            "tag_posts.html",
            "{{ label }}:{% for post in posts %} {{ post.slug }}{% endfor %}",
        );

        let html = renderer
            .render(
                Template::TagPosts,
                &json!({ "label": "Rust", "posts": [{ "slug": "a" }, { "slug": "b" }] }),
            )
            .unwrap();

        assert_eq!(html, "Rust: a b");
    }

    #[test]
    fn test_missing_template() {
        let renderer = renderer("index.html", "home");
        let result = renderer.render(Template::PostDetail, &json!({}));
        assert!(matches!(result, Err(RenderError::MissingTemplate(_))));
    }

    #[test]
    fn test_non_object_context_rejected() {
        let renderer = renderer("index.html", "home");
        let result = renderer.render(Template::Home, &json!(["not", "an", "object"]));
        assert!(matches!(result, Err(RenderError::Context(_))));
    }

    #[test]
    fn test_date_format_filter() {
        let renderer = renderer(
            "index.html",
            "{{ created_at | date_format(format=\"%Y-%m-%d\") }}",
        );
        let html = renderer
            .render(Template::Home, &json!({ "created_at": "2024-03-05T10:00:00Z" }))
            .unwrap();
        assert_eq!(html, "2024-03-05");
    }
}
