//! Public page composition over the in-memory store.

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use press_core::domain::{Category, Post, Section, SiteMeta, Tag};
use press_core::ports::BaseRepository;
use press_core::services::ContentService;
use press_core::DomainError;
use press_infra::InMemoryContentStore;

struct Fixture {
    store: Arc<InMemoryContentStore>,
    service: ContentService,
    /// Each seeded post is one minute older than the previous one.
    clock: std::cell::Cell<i64>,
}

impl Fixture {
    fn new() -> Self {
        let store = Arc::new(InMemoryContentStore::new());
        let service = ContentService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            SiteMeta::default(),
        );
        Self {
            store,
            service,
            clock: std::cell::Cell::new(0),
        }
    }

    async fn category(&self, name: &str) -> Category {
        let category = Category::new(name.to_string(), name.to_lowercase(), None);
        BaseRepository::<Category, Uuid>::save(self.store.as_ref(), category)
            .await
            .unwrap()
    }

    async fn post(
        &self,
        slug: &str,
        category: &Category,
        section: Section,
        published: bool,
        tags: &[&str],
    ) -> Post {
        let minutes = self.clock.get();
        self.clock.set(minutes + 1);

        let mut post = Post::new(slug.to_string(), category.id, String::new());
        post.slug = slug.to_string();
        post.section = section;
        post.published = published;
        post.tags = tags.iter().map(|t| Tag::from_name(t)).collect();
        post.created_at = Utc::now() - Duration::minutes(minutes);
        BaseRepository::<Post, Uuid>::save(self.store.as_ref(), post)
            .await
            .unwrap()
    }
}

fn slugs(posts: &[Post]) -> Vec<&str> {
    posts.iter().map(|p| p.slug.as_str()).collect()
}

#[tokio::test]
async fn test_home_section_limits() {
    let fx = Fixture::new();
    let tech = fx.category("Tech").await;

    for i in 0..6 {
        fx.post(&format!("hero-{}", i), &tech, Section::Hero, true, &[]).await;
    }
    for i in 0..8 {
        fx.post(&format!("popular-{}", i), &tech, Section::Popular, true, &[]).await;
    }
    for i in 0..5 {
        fx.post(&format!("featured-{}", i), &tech, Section::Featured, true, &[]).await;
        fx.post(&format!("community-{}", i), &tech, Section::Community, true, &[]).await;
    }

    let home = fx.service.home().await.unwrap();

    assert_eq!(home.hero_posts.len(), 4);
    assert_eq!(home.featured_posts.len(), 4);
    assert_eq!(home.popular_posts.len(), 6);
    assert_eq!(home.community_posts.len(), 4);
    assert_eq!(home.recent_posts.len(), 6);
    assert_eq!(home.posts.len(), 24);
    assert_eq!(slugs(&home.hero_posts), vec!["hero-0", "hero-1", "hero-2", "hero-3"]);
    assert!(home.hero_posts.iter().all(|p| p.section == Section::Hero));
    assert_eq!(home.categories.len(), 1);
}

#[tokio::test]
async fn test_home_excludes_drafts() {
    let fx = Fixture::new();
    let tech = fx.category("Tech").await;
    fx.post("draft-hero", &tech, Section::Hero, false, &[]).await;
    fx.post("live-hero", &tech, Section::Hero, true, &[]).await;

    let home = fx.service.home().await.unwrap();

    assert_eq!(slugs(&home.hero_posts), vec!["live-hero"]);
    assert_eq!(slugs(&home.posts), vec!["live-hero"]);
    assert_eq!(slugs(&home.recent_posts), vec!["live-hero"]);
}

#[tokio::test]
async fn test_home_on_empty_store() {
    let fx = Fixture::new();
    let home = fx.service.home().await.unwrap();

    assert!(home.posts.is_empty());
    assert!(home.hero_posts.is_empty());
    assert!(home.categories.is_empty());
    assert_eq!(home.meta.title, SiteMeta::default().home_title);
}

#[tokio::test]
async fn test_post_detail_related_posts() {
    let fx = Fixture::new();
    let tech = fx.category("Tech").await;
    let travel = fx.category("Travel").await;

    let target = fx.post("target", &tech, Section::Regular, true, &["Rust"]).await;
    for i in 0..5 {
        fx.post(&format!("tech-{}", i), &tech, Section::Regular, true, &[]).await;
    }
    fx.post("tech-draft", &tech, Section::Regular, false, &[]).await;
    fx.post("travel-0", &travel, Section::Hero, true, &[]).await;

    let page = fx.service.post_detail("target").await.unwrap();

    assert_eq!(page.post.id, target.id);
    assert_eq!(page.category.id, tech.id);
    assert_eq!(page.related_posts.len(), 3);
    assert!(page.related_posts.iter().all(|p| p.category_id == tech.id));
    assert!(page.related_posts.iter().all(|p| p.id != target.id && p.published));
    assert!(page.recent_posts.len() <= 5);
    assert!(page.recent_posts.iter().all(|p| p.id != target.id));
    assert_eq!(slugs(&page.hero_posts), vec!["travel-0"]);
    assert_eq!(page.meta.keywords, "Rust");
    assert_eq!(page.categories.len(), 2);
}

#[tokio::test]
async fn test_post_detail_hides_drafts_and_unknown_slugs() {
    let fx = Fixture::new();
    let tech = fx.category("Tech").await;
    fx.post("draft", &tech, Section::Regular, false, &[]).await;

    let draft = fx.service.post_detail("draft").await;
    assert!(matches!(draft, Err(DomainError::NotFound { .. })));

    let missing = fx.service.post_detail("no-such-post").await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_category_feed() {
    let fx = Fixture::new();
    let tech = fx.category("Tech").await;
    let travel = fx.category("Travel").await;
    fx.post("tech-new", &tech, Section::Regular, true, &[]).await;
    fx.post("tech-old", &tech, Section::Hero, true, &[]).await;
    fx.post("tech-draft", &tech, Section::Regular, false, &[]).await;
    fx.post("travel", &travel, Section::Regular, true, &[]).await;

    let page = fx.service.category_feed("tech").await.unwrap();

    assert_eq!(page.category.id, tech.id);
    assert_eq!(slugs(&page.posts), vec!["tech-new", "tech-old"]);
    assert_eq!(page.recent_posts.len(), 3);
    assert_eq!(page.meta.title, "Tech – Press Magazine");
}

#[tokio::test]
async fn test_empty_and_unknown_category() {
    let fx = Fixture::new();
    fx.category("Food").await;

    let empty = fx.service.category_feed("food").await.unwrap();
    assert!(empty.posts.is_empty());

    let unknown = fx.service.category_feed("gardening").await;
    assert!(matches!(
        unknown,
        Err(DomainError::NotFound { entity_type: "Category", .. })
    ));
}

#[tokio::test]
async fn test_tag_feed() {
    let fx = Fixture::new();
    let tech = fx.category("Tech").await;
    let travel = fx.category("Travel").await;
    fx.post("a", &tech, Section::Regular, true, &["Street Food"]).await;
    fx.post("b", &travel, Section::Popular, true, &["street food", "Rust"]).await;
    fx.post("c", &tech, Section::Regular, false, &["Street Food"]).await;
    fx.post("d", &tech, Section::Regular, true, &["Rust"]).await;

    let page = fx.service.tag_feed("street-food").await.unwrap();

    assert_eq!(slugs(&page.posts), vec!["a", "b"]);
    assert_eq!(page.label, "Street Food");
    assert_eq!(page.tag.map(|t| t.slug), Some("street-food".to_string()));
}

#[tokio::test]
async fn test_unknown_tag_yields_empty_feed() {
    let fx = Fixture::new();
    let tech = fx.category("Tech").await;
    fx.post("a", &tech, Section::Regular, true, &["Rust"]).await;

    let page = fx.service.tag_feed("nonexistent").await.unwrap();

    assert!(page.posts.is_empty());
    assert!(page.tag.is_none());
    assert_eq!(page.label, "nonexistent");
    assert_eq!(page.recent_posts.len(), 1);
}
