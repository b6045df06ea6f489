//! Administrative write path.
//!
//! Every command checks the actor's capability first, then validates,
//! normalizes and persists a single record.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Actor, Category, Normalize, Post, PostQuery, Section, Tag, Validate};
use crate::error::{DomainError, DomainResult, RepoError};
use crate::ports::{CategoryRepository, PostRepository, TagRepository};

/// Category fields as entered by an administrator.
#[derive(Debug, Clone, Default)]
pub struct CategoryDraft {
    pub name: String,
    /// `None` keeps the stored slug on update; a blank value is re-derived.
    pub slug: Option<String>,
    pub image: Option<String>,
}

/// Post fields as entered by an administrator.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub slug: Option<String>,
    pub category_id: Uuid,
    pub image: Option<String>,
    pub content: String,
    pub tags: Vec<String>,
    /// `None` means regular on create and unchanged on update.
    pub section: Option<Section>,
    pub published: bool,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

/// Filters for the admin post listing.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub category_id: Option<Uuid>,
    pub section: Option<Section>,
    pub published: Option<bool>,
    pub search: Option<String>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_until: Option<DateTime<Utc>>,
}

impl From<PostFilter> for PostQuery {
    fn from(filter: PostFilter) -> Self {
        PostQuery {
            published: filter.published,
            section: filter.section,
            category_id: filter.category_id,
            search: filter.search.filter(|s| !s.trim().is_empty()),
            created_from: filter.created_from,
            created_until: filter.created_until,
            ..PostQuery::default()
        }
    }
}

/// Tags from free-form names, first occurrence wins per slug.
fn tags_from_names(names: &[String]) -> Vec<Tag> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(|name| Tag::from_name(name))
        .filter(|tag| seen.insert(tag.slug.clone()))
        .collect()
}

pub struct AdminService {
    categories: Arc<dyn CategoryRepository>,
    posts: Arc<dyn PostRepository>,
    tags: Arc<dyn TagRepository>,
}

impl AdminService {
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        posts: Arc<dyn PostRepository>,
        tags: Arc<dyn TagRepository>,
    ) -> Self {
        Self {
            categories,
            posts,
            tags,
        }
    }

    fn authorize(&self, actor: &Actor) -> DomainResult<()> {
        if actor.is_admin() {
            Ok(())
        } else {
            tracing::warn!(user = %actor.username, "Rejected admin command");
            Err(DomainError::Forbidden)
        }
    }

    // Categories

    /// Categories by name; `term` narrows to names containing it.
    pub async fn list_categories(
        &self,
        actor: &Actor,
        term: Option<&str>,
    ) -> DomainResult<Vec<Category>> {
        self.authorize(actor)?;
        let term = term.map(str::trim).filter(|t| !t.is_empty());
        Ok(self.categories.list(term).await?)
    }

    pub async fn create_category(
        &self,
        actor: &Actor,
        draft: CategoryDraft,
    ) -> DomainResult<Category> {
        self.authorize(actor)?;
        let category = Category::new(
            draft.name.trim().to_string(),
            draft.slug.unwrap_or_default(),
            draft.image,
        );
        self.persist_category(category).await
    }

    pub async fn update_category(
        &self,
        actor: &Actor,
        id: Uuid,
        draft: CategoryDraft,
    ) -> DomainResult<Category> {
        self.authorize(actor)?;
        let mut category = self
            .categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Category", id))?;

        category.name = draft.name.trim().to_string();
        if let Some(slug) = draft.slug {
            category.slug = slug;
        }
        category.image = draft.image;
        self.persist_category(category).await
    }

    /// Removes the category together with all of its posts.
    pub async fn delete_category(&self, actor: &Actor, id: Uuid) -> DomainResult<()> {
        self.authorize(actor)?;
        self.categories.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found("Category", id),
            other => other.into(),
        })?;
        tracing::info!(category_id = %id, "Category deleted");
        Ok(())
    }

    async fn persist_category(&self, mut category: Category) -> DomainResult<Category> {
        category.normalize();
        category.validate()?;
        let saved = self.categories.save(category).await?;
        tracing::info!(category_id = %saved.id, slug = %saved.slug, "Category saved");
        Ok(saved)
    }

    // Posts

    pub async fn list_posts(&self, actor: &Actor, filter: PostFilter) -> DomainResult<Vec<Post>> {
        self.authorize(actor)?;
        Ok(self.posts.query(&filter.into()).await?)
    }

    pub async fn get_post(&self, actor: &Actor, id: Uuid) -> DomainResult<Post> {
        self.authorize(actor)?;
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Post", id))
    }

    pub async fn create_post(&self, actor: &Actor, draft: PostDraft) -> DomainResult<Post> {
        self.authorize(actor)?;
        self.ensure_category(draft.category_id).await?;

        let mut post = Post::new(draft.title.trim().to_string(), draft.category_id, draft.content);
        post.slug = draft.slug.unwrap_or_default();
        post.image = draft.image;
        post.tags = tags_from_names(&draft.tags);
        post.section = draft.section.unwrap_or_default();
        post.published = draft.published;
        post.meta_title = draft.meta_title;
        post.meta_description = draft.meta_description;
        self.persist_post(post).await
    }

    /// Replaces the editable fields. `created_at` and `views` are preserved.
    pub async fn update_post(
        &self,
        actor: &Actor,
        id: Uuid,
        draft: PostDraft,
    ) -> DomainResult<Post> {
        self.authorize(actor)?;
        let mut post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Post", id))?;
        if post.category_id != draft.category_id {
            self.ensure_category(draft.category_id).await?;
        }

        post.title = draft.title.trim().to_string();
        post.category_id = draft.category_id;
        post.image = draft.image;
        post.content = draft.content;
        post.tags = tags_from_names(&draft.tags);
        post.published = draft.published;
        if let Some(section) = draft.section {
            post.section = section;
        }
        if let Some(slug) = draft.slug {
            post.slug = slug;
        }
        if let Some(meta_title) = draft.meta_title {
            post.meta_title = Some(meta_title);
        }
        if let Some(meta_description) = draft.meta_description {
            post.meta_description = Some(meta_description);
        }
        self.persist_post(post).await
    }

    pub async fn delete_post(&self, actor: &Actor, id: Uuid) -> DomainResult<()> {
        self.authorize(actor)?;
        self.posts.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found("Post", id),
            other => other.into(),
        })?;
        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }

    async fn ensure_category(&self, id: Uuid) -> DomainResult<()> {
        match self.categories.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::Validation(format!(
                "category {} does not exist",
                id
            ))),
        }
    }

    async fn persist_post(&self, mut post: Post) -> DomainResult<Post> {
        post.normalize();
        post.validate()?;
        post.updated_at = Utc::now();
        let saved = self.posts.save(post).await?;
        tracing::info!(post_id = %saved.id, slug = %saved.slug, published = saved.published, "Post saved");
        Ok(saved)
    }

    // Tags

    pub async fn list_tags(&self, actor: &Actor, term: Option<&str>) -> DomainResult<Vec<Tag>> {
        self.authorize(actor)?;
        Ok(self.tags.search(term).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_tag_names_collapse() {
        let tags = tags_from_names(&["Food".into(), "food".into(), "Street Food".into()]);
        let slugs: Vec<_> = tags.iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(slugs, vec!["food", "street-food"]);
        assert_eq!(tags[0].name, "Food");
    }

    #[test]
    fn test_filter_drops_blank_search() {
        let query: PostQuery = PostFilter {
            search: Some("  ".into()),
            published: Some(false),
            ..PostFilter::default()
        }
        .into();
        assert_eq!(query.search, None);
        assert_eq!(query.published, Some(false));
        assert_eq!(query.limit, None);
    }
}
