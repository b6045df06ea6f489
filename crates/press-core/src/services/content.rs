//! Read-side composition of the public pages.

use std::sync::Arc;

use crate::domain::{
    CategoryPage, HomePage, Post, PostDetailPage, PostQuery, Section, SeoMeta, SiteMeta, TagPage,
};
use crate::error::{DomainError, DomainResult};
use crate::ports::{CategoryRepository, PostRepository, TagRepository};

pub const HERO_LIMIT: u64 = 4;
pub const FEATURED_LIMIT: u64 = 4;
pub const POPULAR_LIMIT: u64 = 6;
pub const COMMUNITY_LIMIT: u64 = 4;
pub const HOME_RECENT_LIMIT: u64 = 6;
pub const RELATED_LIMIT: u64 = 3;
pub const SIDEBAR_RECENT_LIMIT: u64 = 5;

/// Builds the home, detail, category and tag contexts. Only published posts
/// are ever returned.
pub struct ContentService {
    categories: Arc<dyn CategoryRepository>,
    posts: Arc<dyn PostRepository>,
    tags: Arc<dyn TagRepository>,
    site: SiteMeta,
}

impl ContentService {
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        posts: Arc<dyn PostRepository>,
        tags: Arc<dyn TagRepository>,
        site: SiteMeta,
    ) -> Self {
        Self {
            categories,
            posts,
            tags,
            site,
        }
    }

    pub fn site(&self) -> &SiteMeta {
        &self.site
    }

    async fn published(&self, query: PostQuery) -> DomainResult<Vec<Post>> {
        Ok(self.posts.query(&query).await?)
    }

    async fn section(&self, section: Section, limit: u64) -> DomainResult<Vec<Post>> {
        self.published(PostQuery::published().in_section(section).limit(limit))
            .await
    }

    pub async fn home(&self) -> DomainResult<HomePage> {
        tracing::debug!("Composing home page");

        Ok(HomePage {
            posts: self.published(PostQuery::published()).await?,
            hero_posts: self.section(Section::Hero, HERO_LIMIT).await?,
            featured_posts: self.section(Section::Featured, FEATURED_LIMIT).await?,
            popular_posts: self.section(Section::Popular, POPULAR_LIMIT).await?,
            community_posts: self.section(Section::Community, COMMUNITY_LIMIT).await?,
            recent_posts: self
                .published(PostQuery::published().limit(HOME_RECENT_LIMIT))
                .await?,
            categories: self.categories.list(None).await?,
            meta: SeoMeta::home(&self.site),
        })
    }

    /// Detail page for a published post. Drafts are reported as missing.
    pub async fn post_detail(&self, slug: &str) -> DomainResult<PostDetailPage> {
        let post = self
            .posts
            .find_by_slug(slug)
            .await?
            .filter(|p| p.published)
            .ok_or_else(|| DomainError::not_found("Post", slug))?;

        let category = self
            .categories
            .find_by_id(post.category_id)
            .await?
            .ok_or_else(|| {
                DomainError::Internal(format!("post '{}' references a missing category", slug))
            })?;

        let related_posts = self
            .published(
                PostQuery::published()
                    .in_category(post.category_id)
                    .excluding(post.id)
                    .limit(RELATED_LIMIT),
            )
            .await?;
        let recent_posts = self
            .published(
                PostQuery::published()
                    .excluding(post.id)
                    .limit(SIDEBAR_RECENT_LIMIT),
            )
            .await?;

        Ok(PostDetailPage {
            meta: SeoMeta::post(&post),
            hero_posts: self
                .published(PostQuery::published().in_section(Section::Hero))
                .await?,
            featured_posts: self
                .published(PostQuery::published().in_section(Section::Featured))
                .await?,
            recent_posts,
            related_posts,
            categories: self.categories.list(None).await?,
            category,
            post,
        })
    }

    /// Published posts of a category. An unknown category is an error, an
    /// empty one is not.
    pub async fn category_feed(&self, slug: &str) -> DomainResult<CategoryPage> {
        let category = self
            .categories
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::not_found("Category", slug))?;

        Ok(CategoryPage {
            posts: self
                .published(PostQuery::published().in_category(category.id))
                .await?,
            recent_posts: self
                .published(PostQuery::published().limit(SIDEBAR_RECENT_LIMIT))
                .await?,
            meta: SeoMeta::category(&self.site, &category),
            category,
        })
    }

    /// Published posts carrying a tag. Unknown tags yield an empty feed.
    pub async fn tag_feed(&self, slug: &str) -> DomainResult<TagPage> {
        let tag = self.tags.find_by_slug(slug).await?;
        let label = tag
            .as_ref()
            .map_or_else(|| slug.to_string(), |t| t.name.clone());

        Ok(TagPage {
            posts: self.published(PostQuery::published().tagged(slug)).await?,
            recent_posts: self
                .published(PostQuery::published().limit(SIDEBAR_RECENT_LIMIT))
                .await?,
            meta: SeoMeta::tag(&self.site, slug),
            slug: slug.to_string(),
            label,
            tag,
        })
    }
}
