use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category entity - a named grouping of posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    /// Stored asset reference (relative media path or URL).
    pub image: Option<String>,
}

impl Category {
    /// Create a new category. The slug may be left empty for the normalizer to fill.
    pub fn new(name: String, slug: String, image: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            slug,
            image,
        }
    }
}
