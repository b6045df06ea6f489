//! Presentation contexts handed to the renderer.

use serde::{Deserialize, Serialize};

use super::{Category, Post, Tag};

/// Site-wide strings used to build SEO metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteMeta {
    pub name: String,
    pub home_title: String,
    pub home_description: String,
    pub home_keywords: String,
    /// Appended to generated keyword lists.
    pub keyword_suffix: String,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            name: "Press Magazine".to_string(),
            home_title: "Press Magazine – Lifestyle, Travel, Tech & Culture".to_string(),
            home_description:
                "Press Magazine delivers trending stories on lifestyle, travel, tech, wellness, and culture."
                    .to_string(),
            home_keywords: "Press Magazine, online magazine, lifestyle trends, tech news, travel blog"
                .to_string(),
            keyword_suffix: "USA, Canada".to_string(),
        }
    }
}

/// SEO metadata attached to every page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoMeta {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub image: Option<String>,
}

impl SeoMeta {
    pub fn home(site: &SiteMeta) -> Self {
        Self {
            title: site.home_title.clone(),
            description: site.home_description.clone(),
            keywords: site.home_keywords.clone(),
            image: None,
        }
    }

    pub fn category(site: &SiteMeta, category: &Category) -> Self {
        Self {
            title: format!("{} – {}", category.name, site.name),
            description: format!("Read all articles about {} on {}.", category.name, site.name),
            keywords: format!("{}, {}, {}", category.name, site.name, site.keyword_suffix),
            image: category.image.clone(),
        }
    }

    pub fn tag(site: &SiteMeta, slug: &str) -> Self {
        Self {
            title: format!("Posts tagged '{}' – {}", slug, site.name),
            description: format!("Explore all posts tagged with '{}' on {}.", slug, site.name),
            keywords: format!("{}, {}, {}", slug, site.name, site.keyword_suffix),
            image: None,
        }
    }

    pub fn post(post: &Post) -> Self {
        Self {
            title: post.meta_title.clone().unwrap_or_else(|| post.title.clone()),
            description: post.meta_description.clone().unwrap_or_default(),
            keywords: post.keywords(),
            image: post.image.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HomePage {
    pub posts: Vec<Post>,
    pub hero_posts: Vec<Post>,
    pub featured_posts: Vec<Post>,
    pub popular_posts: Vec<Post>,
    pub community_posts: Vec<Post>,
    pub recent_posts: Vec<Post>,
    pub categories: Vec<Category>,
    pub meta: SeoMeta,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostDetailPage {
    pub post: Post,
    pub category: Category,
    pub hero_posts: Vec<Post>,
    pub featured_posts: Vec<Post>,
    pub recent_posts: Vec<Post>,
    pub related_posts: Vec<Post>,
    pub categories: Vec<Category>,
    pub meta: SeoMeta,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryPage {
    pub category: Category,
    pub posts: Vec<Post>,
    pub recent_posts: Vec<Post>,
    pub meta: SeoMeta,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagPage {
    /// The requested slug, echoed even when no tag exists.
    pub slug: String,
    pub tag: Option<Tag>,
    /// Tag name when the tag exists, otherwise the raw slug.
    pub label: String,
    pub posts: Vec<Post>,
    pub recent_posts: Vec<Post>,
    pub meta: SeoMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_meta_uses_site_name() {
        let site = SiteMeta::default();
        let category = Category::new("Tech".into(), "tech".into(), Some("categories/tech.jpg".into()));
        let meta = SeoMeta::category(&site, &category);
        assert_eq!(meta.title, "Tech – Press Magazine");
        assert_eq!(meta.description, "Read all articles about Tech on Press Magazine.");
        assert_eq!(meta.keywords, "Tech, Press Magazine, USA, Canada");
        assert_eq!(meta.image.as_deref(), Some("categories/tech.jpg"));
    }

    #[test]
    fn test_tag_meta_echoes_slug() {
        let meta = SeoMeta::tag(&SiteMeta::default(), "street-food");
        assert_eq!(meta.title, "Posts tagged 'street-food' – Press Magazine");
        assert_eq!(meta.image, None);
    }
}
