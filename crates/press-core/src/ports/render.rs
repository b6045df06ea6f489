use std::fmt;

/// Page templates known to the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Home,
    PostDetail,
    CategoryPosts,
    TagPosts,
}

impl Template {
    pub fn identifier(&self) -> &'static str {
        match self {
            Template::Home => "index.html",
            Template::PostDetail => "post_detail.html",
            Template::CategoryPosts => "category_posts.html",
            Template::TagPosts => "tag_posts.html",
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Renders a page context into a response body.
pub trait Renderer: Send + Sync {
    fn render(&self, template: Template, context: &serde_json::Value) -> Result<String, RenderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Template not found: {0}")]
    MissingTemplate(String),

    #[error("Context could not be serialized: {0}")]
    Context(String),

    #[error("Rendering failed: {0}")]
    Failed(String),
}
