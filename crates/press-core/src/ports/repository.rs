use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Category, Post, PostQuery, Tag};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (insert when the ID is new, update otherwise).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Category repository. Deleting a category cascades to its posts.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError>;

    /// Categories ordered by name, optionally filtered by a name substring.
    async fn list(&self, term: Option<&str>) -> Result<Vec<Category>, RepoError>;
}

/// Post repository. Saving a post also persists its tag links, creating
/// tags on first use.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Posts matching `query`, newest first.
    async fn query(&self, query: &PostQuery) -> Result<Vec<Post>, RepoError>;
}

/// Tag lookups. Tags are written through [`PostRepository::save`].
#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError>;

    /// Tags ordered by name, optionally filtered by a name substring.
    async fn search(&self, term: Option<&str>) -> Result<Vec<Tag>, RepoError>;
}
