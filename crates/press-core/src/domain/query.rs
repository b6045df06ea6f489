use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{Post, Section};

/// Filter for post listings. Results are always ordered by `created_at` descending.
///
/// Stores translate this into explicit filters and joins; the in-memory store
/// evaluates it with [`PostQuery::matches`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostQuery {
    pub published: Option<bool>,
    pub section: Option<Section>,
    pub category_id: Option<Uuid>,
    pub tag_slug: Option<String>,
    pub exclude_id: Option<Uuid>,
    /// Substring match over title, content, meta_title and meta_description.
    pub search: Option<String>,
    /// Inclusive lower bound on `created_at`.
    pub created_from: Option<DateTime<Utc>>,
    /// Exclusive upper bound on `created_at`.
    pub created_until: Option<DateTime<Utc>>,
    pub limit: Option<u64>,
}

impl PostQuery {
    /// Published posts only - the base of every public listing.
    pub fn published() -> Self {
        Self {
            published: Some(true),
            ..Self::default()
        }
    }

    pub fn in_section(mut self, section: Section) -> Self {
        self.section = Some(section);
        self
    }

    pub fn in_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn tagged(mut self, tag_slug: impl Into<String>) -> Self {
        self.tag_slug = Some(tag_slug.into());
        self
    }

    pub fn excluding(mut self, post_id: Uuid) -> Self {
        self.exclude_id = Some(post_id);
        self
    }

    pub fn searching(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Posts created in `[from, until)`. Either bound may be open.
    pub fn created_between(
        mut self,
        from: Option<DateTime<Utc>>,
        until: Option<DateTime<Utc>>,
    ) -> Self {
        self.created_from = from;
        self.created_until = until;
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a post passes every filter (ordering and limit excluded).
    pub fn matches(&self, post: &Post) -> bool {
        self.published.is_none_or(|p| post.published == p)
            && self.section.is_none_or(|s| post.section == s)
            && self.category_id.is_none_or(|id| post.category_id == id)
            && self.exclude_id.is_none_or(|id| post.id != id)
            && self.tag_slug.as_deref().is_none_or(|slug| post.has_tag(slug))
            && self.created_from.is_none_or(|from| post.created_at >= from)
            && self.created_until.is_none_or(|until| post.created_at < until)
            && self.search.as_deref().is_none_or(|term| {
                post.title.contains(term)
                    || post.content.contains(term)
                    || post.meta_title.as_deref().is_some_and(|t| t.contains(term))
                    || post
                        .meta_description
                        .as_deref()
                        .is_some_and(|d| d.contains(term))
            })
    }
}
