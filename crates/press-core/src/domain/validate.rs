//! Field constraints checked on the write path, after normalization.

use super::{Category, Post, Tag};
use crate::error::{DomainError, DomainResult};

pub const CATEGORY_NAME_MAX: usize = 100;
pub const POST_TITLE_MAX: usize = 200;
pub const SLUG_MAX: usize = 255;
pub const META_TITLE_MAX: usize = 60;
pub const META_DESCRIPTION_MAX: usize = 160;
pub const TAG_NAME_MAX: usize = 100;

pub trait Validate {
    fn validate(&self) -> DomainResult<()>;
}

fn required(field: &str, value: &str, max: usize) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{} is required", field)));
    }
    within(field, value, max)
}

fn within(field: &str, value: &str, max: usize) -> DomainResult<()> {
    let len = value.chars().count();
    if len > max {
        return Err(DomainError::Validation(format!(
            "{} must be at most {} characters (got {})",
            field, max, len
        )));
    }
    Ok(())
}

/// Slugs are limited to ASCII letters, digits, hyphens and underscores.
pub fn validate_slug(field: &str, slug: &str) -> DomainResult<()> {
    if slug.is_empty() {
        return Err(DomainError::Validation(format!(
            "{} is empty and could not be derived",
            field
        )));
    }
    within(field, slug, SLUG_MAX)?;
    if !slug
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(DomainError::Validation(format!(
            "{} '{}' may only contain letters, numbers, hyphens and underscores",
            field, slug
        )));
    }
    Ok(())
}

impl Validate for Category {
    fn validate(&self) -> DomainResult<()> {
        required("name", &self.name, CATEGORY_NAME_MAX)?;
        validate_slug("slug", &self.slug)
    }
}

impl Validate for Tag {
    fn validate(&self) -> DomainResult<()> {
        required("tag name", &self.name, TAG_NAME_MAX)?;
        validate_slug("tag slug", &self.slug)
    }
}

impl Validate for Post {
    fn validate(&self) -> DomainResult<()> {
        required("title", &self.title, POST_TITLE_MAX)?;
        validate_slug("slug", &self.slug)?;
        if let Some(meta_title) = &self.meta_title {
            within("meta_title", meta_title, META_TITLE_MAX)?;
        }
        if let Some(meta_description) = &self.meta_description {
            within("meta_description", meta_description, META_DESCRIPTION_MAX)?;
        }
        self.tags.iter().try_for_each(Validate::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Normalize;
    use uuid::Uuid;

    #[test]
    fn test_slug_charset() {
        assert!(validate_slug("slug", "hello-world_2").is_ok());
        assert!(validate_slug("slug", "hello world").is_err());
        assert!(validate_slug("slug", "héllo").is_err());
        assert!(validate_slug("slug", "").is_err());
    }

    #[test]
    fn test_blank_name_rejected() {
        let category = Category::new("   ".into(), "x".into(), None);
        assert!(matches!(category.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_title_without_slug_material_rejected() {
        let mut post = Post::new("!!!".into(), Uuid::new_v4(), String::new());
        post.normalize();
        let err = post.validate().unwrap_err();
        assert!(err.to_string().contains("could not be derived"));
    }

    #[test]
    fn test_meta_description_limit() {
        let mut post = Post::new("Title".into(), Uuid::new_v4(), "Body".into());
        post.meta_description = Some("d".repeat(161));
        post.normalize();
        assert!(post.validate().is_err());

        post.meta_description = Some("d".repeat(160));
        assert!(post.validate().is_ok());
    }

    #[test]
    fn test_explicit_meta_title_limit() {
        let mut post = Post::new("Title".into(), Uuid::new_v4(), "Body".into());
        post.meta_title = Some("t".repeat(61));
        post.normalize();
        assert!(post.validate().is_err());
    }

    #[test]
    fn test_empty_tag_rejected() {
        let mut post = Post::new("Title".into(), Uuid::new_v4(), "Body".into());
        post.tags.push(Tag::from_name("   "));
        post.normalize();
        assert!(post.validate().is_err());
    }
}
