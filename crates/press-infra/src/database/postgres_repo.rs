//! PostgreSQL repository implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbConn, EntityTrait, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use uuid::Uuid;

use press_core::domain::{Category, Post, PostQuery, Tag};
use press_core::error::RepoError;
use press_core::ports::{BaseRepository, CategoryRepository, PostRepository, TagRepository};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL category repository. Post removal on delete is the `posts`
/// foreign key's `ON DELETE CASCADE`.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL tag repository.
pub type PostgresTagRepository = PostgresBaseRepository<TagEntity>;

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        tracing::debug!(slug, "Finding category by slug");

        let result = CategoryEntity::find()
            .filter(category::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn list(&self, term: Option<&str>) -> Result<Vec<Category>, RepoError> {
        let mut select = CategoryEntity::find();
        if let Some(term) = term.filter(|t| !t.is_empty()) {
            select = select.filter(category::Column::Name.contains(term));
        }

        let result = select
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError> {
        let result = TagEntity::find()
            .filter(tag::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn search(&self, term: Option<&str>) -> Result<Vec<Tag>, RepoError> {
        let mut select = TagEntity::find();
        if let Some(term) = term.filter(|t| !t.is_empty()) {
            select = select.filter(tag::Column::Name.contains(term));
        }

        let result = select
            .order_by_asc(tag::Column::Name)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

/// PostgreSQL post repository. Tags are loaded with a second query and
/// written in the same transaction as the post row.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> DbConn {
        self.db
    }

    async fn attach_tags(&self, models: Vec<post::Model>) -> Result<Vec<Post>, RepoError> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let links = PostTagEntity::find()
            .filter(post_tag::Column::PostId.is_in(ids))
            .find_also_related(TagEntity)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        let mut by_post: HashMap<Uuid, Vec<Tag>> = HashMap::new();
        for (link, tag) in links {
            if let Some(tag) = tag {
                by_post.entry(link.post_id).or_default().push(tag.into());
            }
        }

        Ok(models
            .into_iter()
            .map(|model| {
                let mut tags = by_post.remove(&model.id).unwrap_or_default();
                tags.sort_by(|a, b| a.name.cmp(&b.name));
                model.into_domain(tags)
            })
            .collect())
    }

    /// Reuse the stored tag with the same slug, or insert this one.
    async fn get_or_create_tag<C>(db: &C, tag: &Tag) -> Result<Tag, RepoError>
    where
        C: ConnectionTrait,
    {
        let existing = TagEntity::find()
            .filter(tag::Column::Slug.eq(tag.slug.as_str()))
            .one(db)
            .await
            .map_err(map_db_err)?;

        if let Some(existing) = existing {
            return Ok(existing.into());
        }

        tracing::debug!(slug = %tag.slug, "Creating tag on first use");
        let created = tag::ActiveModel::from(tag)
            .insert(db)
            .await
            .map_err(map_db_err)?;
        Ok(created.into())
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for PostgresPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        match result {
            Some(model) => Ok(self.attach_tags(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn save(&self, entity: Post) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let exists = PostEntity::find_by_id(entity.id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .is_some();

        let active_model = post::ActiveModel::from(&entity);
        if exists {
            active_model.update(&txn).await
        } else {
            active_model.insert(&txn).await
        }
        .map_err(map_db_err)?;

        PostTagEntity::delete_many()
            .filter(post_tag::Column::PostId.eq(entity.id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        let mut tags = Vec::with_capacity(entity.tags.len());
        for tag in &entity.tags {
            let stored = Self::get_or_create_tag(&txn, tag).await?;
            post_tag::ActiveModel {
                post_id: Set(entity.id),
                tag_id: Set(stored.id),
            }
            .insert(&txn)
            .await
            .map_err(map_db_err)?;
            tags.push(stored);
        }

        txn.commit().await.map_err(map_db_err)?;

        Ok(Post { tags, ..entity })
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        tracing::debug!(slug, "Finding post by slug");

        let result = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        match result {
            Some(model) => Ok(self.attach_tags(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn query(&self, query: &PostQuery) -> Result<Vec<Post>, RepoError> {
        let mut select = PostEntity::find();

        if let Some(published) = query.published {
            select = select.filter(post::Column::Published.eq(published));
        }
        if let Some(section) = query.section {
            select = select.filter(post::Column::Section.eq(section.as_str()));
        }
        if let Some(category_id) = query.category_id {
            select = select.filter(post::Column::CategoryId.eq(category_id));
        }
        if let Some(exclude_id) = query.exclude_id {
            select = select.filter(post::Column::Id.ne(exclude_id));
        }
        if let Some(tag_slug) = &query.tag_slug {
            select = select
                .join(JoinType::InnerJoin, post::Relation::PostTag.def())
                .join(JoinType::InnerJoin, post_tag::Relation::Tag.def())
                .filter(tag::Column::Slug.eq(tag_slug.as_str()));
        }
        if let Some(term) = &query.search {
            select = select.filter(
                Condition::any()
                    .add(post::Column::Title.contains(term.as_str()))
                    .add(post::Column::Content.contains(term.as_str()))
                    .add(post::Column::MetaTitle.contains(term.as_str()))
                    .add(post::Column::MetaDescription.contains(term.as_str())),
            );
        }

        if let Some(from) = query.created_from {
            select = select.filter(post::Column::CreatedAt.gte(from));
        }
        if let Some(until) = query.created_until {
            select = select.filter(post::Column::CreatedAt.lt(until));
        }

        select = select.order_by_desc(post::Column::CreatedAt);
        if let Some(limit) = query.limit {
            select = select.limit(limit);
        }

        let models = select.all(&self.db).await.map_err(map_db_err)?;
        tracing::debug!(?query, rows = models.len(), "Post query executed");

        self.attach_tags(models).await
    }
}
