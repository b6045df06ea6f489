use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::normalize::slugify;

/// Tag entity - a free-form label, globally unique by slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl Tag {
    /// Build a tag from its display name. Stores reuse an existing tag with the same slug.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim().to_string();
        Self {
            id: Uuid::new_v4(),
            slug: slugify(&name),
            name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_trims_and_slugifies() {
        let tag = Tag::from_name("  Street Food ");
        assert_eq!(tag.name, "Street Food");
        assert_eq!(tag.slug, "street-food");
    }
}
