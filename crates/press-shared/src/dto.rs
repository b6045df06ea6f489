//! Data Transfer Objects - request/response types for the admin API.

use serde::{Deserialize, Serialize};

/// Request to login as an administrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Create or update a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Create or update a post. `section` is one of
/// hero, featured, popular, regular, community.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRequest {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    pub category_id: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
}

/// Query string of the admin post listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostListParams {
    pub category_id: Option<String>,
    pub section: Option<String>,
    pub published: Option<bool>,
    pub search: Option<String>,
    /// RFC 3339 timestamp, inclusive.
    pub created_from: Option<String>,
    /// RFC 3339 timestamp, exclusive.
    pub created_until: Option<String>,
}

/// Query string of the admin category and tag listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// Admin view of a post, drafts included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub category_id: String,
    pub image: Option<String>,
    pub content: String,
    pub tags: Vec<TagResponse>,
    pub section: String,
    pub published: bool,
    pub views: u32,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_request_defaults() {
        let req: PostRequest = serde_json::from_str(
            r#"{"title": "Hello", "category_id": "c0ffee00-0000-0000-0000-000000000000"}"#,
        )
        .unwrap();
        assert_eq!(req.slug, None);
        assert!(req.tags.is_empty());
        assert!(!req.published);
        assert_eq!(req.content, "");
    }
}
