//! In-memory content store - used when no database is configured and in tests.
//!
//! Enforces the same constraints as the PostgreSQL schema: unique category
//! names and slugs, unique post and tag slugs, the post → category foreign
//! key, and cascade deletes from categories to posts.
//! Note: Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use press_core::domain::{Category, Post, PostQuery, Tag};
use press_core::error::RepoError;
use press_core::ports::{BaseRepository, CategoryRepository, PostRepository, TagRepository};

#[derive(Default)]
struct ContentTables {
    categories: HashMap<Uuid, Category>,
    posts: HashMap<Uuid, Post>,
    tags: HashMap<Uuid, Tag>,
}

impl ContentTables {
    /// Reuse the stored tag with the same slug, or insert this one.
    fn resolve_tag(&mut self, tag: &Tag) -> Tag {
        if let Some(existing) = self.tags.values().find(|t| t.slug == tag.slug) {
            return existing.clone();
        }
        self.tags.insert(tag.id, tag.clone());
        tag.clone()
    }
}

/// Single store implementing every content repository, guarded by one async
/// RwLock so each write is atomic.
pub struct InMemoryContentStore {
    tables: RwLock<ContentTables>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(ContentTables::default()),
        }
    }
}

impl Default for InMemoryContentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Category, Uuid> for InMemoryContentStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, RepoError> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn save(&self, entity: Category) -> Result<Category, RepoError> {
        let mut tables = self.tables.write().await;

        for other in tables.categories.values().filter(|c| c.id != entity.id) {
            if other.name == entity.name {
                return Err(RepoError::Duplicate(format!(
                    "category name '{}' already exists",
                    entity.name
                )));
            }
            if other.slug == entity.slug {
                return Err(RepoError::Duplicate(format!(
                    "category slug '{}' already exists",
                    entity.slug
                )));
            }
        }

        tables.categories.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;

        if tables.categories.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }

        let before = tables.posts.len();
        tables.posts.retain(|_, post| post.category_id != id);
        tracing::debug!(
            category_id = %id,
            removed_posts = before - tables.posts.len(),
            "Category removed with its posts"
        );

        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryContentStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.categories.values().find(|c| c.slug == slug).cloned())
    }

    async fn list(&self, term: Option<&str>) -> Result<Vec<Category>, RepoError> {
        let tables = self.tables.read().await;
        let mut categories: Vec<Category> = tables
            .categories
            .values()
            .filter(|c| term.is_none_or(|term| c.name.contains(term)))
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryContentStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn save(&self, entity: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;

        if !tables.categories.contains_key(&entity.category_id) {
            return Err(RepoError::Constraint(format!(
                "category {} does not exist",
                entity.category_id
            )));
        }
        if tables
            .posts
            .values()
            .any(|p| p.id != entity.id && p.slug == entity.slug)
        {
            return Err(RepoError::Duplicate(format!(
                "post slug '{}' already exists",
                entity.slug
            )));
        }

        let tags = entity
            .tags
            .iter()
            .map(|tag| tables.resolve_tag(tag))
            .collect();
        let post = Post { tags, ..entity };

        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.tables.write().await.posts.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryContentStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.values().find(|p| p.slug == slug).cloned())
    }

    async fn query(&self, query: &PostQuery) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;

        let mut posts: Vec<Post> = tables
            .posts
            .values()
            .filter(|p| query.matches(p))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = query.limit {
            posts.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }

        Ok(posts)
    }
}

#[async_trait]
impl TagRepository for InMemoryContentStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.tags.values().find(|t| t.slug == slug).cloned())
    }

    async fn search(&self, term: Option<&str>) -> Result<Vec<Tag>, RepoError> {
        let tables = self.tables.read().await;
        let mut tags: Vec<Tag> = tables
            .tags
            .values()
            .filter(|t| term.is_none_or(|term| t.name.contains(term)))
            .cloned()
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }
}
