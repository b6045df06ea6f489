use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Tag;
use crate::error::DomainError;

/// Placement of a post on the home page layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Hero,
    Featured,
    Popular,
    #[default]
    Regular,
    Community,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Hero,
        Section::Featured,
        Section::Popular,
        Section::Regular,
        Section::Community,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Hero => "hero",
            Section::Featured => "featured",
            Section::Popular => "popular",
            Section::Regular => "regular",
            Section::Community => "community",
        }
    }

    /// Human label shown in admin listings.
    pub fn label(&self) -> &'static str {
        match self {
            Section::Hero => "Hero",
            Section::Featured => "Featured",
            Section::Popular => "Popular",
            Section::Regular => "Regular",
            Section::Community => "Community Highlights",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| DomainError::Validation(format!("unknown section '{}'", s)))
    }
}

/// Post entity - a published or draft article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub category_id: Uuid,
    pub image: Option<String>,
    pub content: String,
    pub tags: Vec<Tag>,
    pub section: Section,
    pub published: bool,
    /// Never incremented by this service; exposed as stored.
    pub views: u32,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new unpublished post in the regular section.
    pub fn new(title: String, category_id: Uuid, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            slug: String::new(),
            category_id,
            image: None,
            content,
            tags: Vec::new(),
            section: Section::default(),
            published: false,
            views: 0,
            meta_title: None,
            meta_description: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_tag(&self, slug: &str) -> bool {
        self.tags.iter().any(|t| t.slug == slug)
    }

    /// Tag names joined for keyword metadata.
    pub fn keywords(&self) -> String {
        self.tags
            .iter()
            .map(|t| t.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_parses_every_variant() {
        for section in Section::ALL {
            assert_eq!(section.as_str().parse::<Section>().unwrap(), section);
        }
    }

    #[test]
    fn test_section_rejects_unknown_value() {
        let err = "sidebar".parse::<Section>().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_new_post_defaults() {
        let post = Post::new("Title".into(), Uuid::new_v4(), "Body".into());
        assert_eq!(post.section, Section::Regular);
        assert!(!post.published);
        assert_eq!(post.views, 0);
        assert!(post.slug.is_empty());
        assert_eq!(post.created_at, post.updated_at);
    }
}
