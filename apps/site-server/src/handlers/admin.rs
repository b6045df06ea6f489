//! Admin JSON API. Every route except login requires a bearer token.

use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use press_core::domain::{Category, Post, Section, Tag};
use press_core::services::{CategoryDraft, PostDraft, PostFilter};
use press_shared::ApiResponse;
use press_shared::dto::{
    AuthResponse, CategoryRequest, CategoryResponse, LoginRequest, PostListParams, PostRequest,
    PostResponse, SearchParams, TagResponse,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("'{}' is not a valid id", raw)))
}

fn parse_section(raw: Option<&str>) -> AppResult<Option<Section>> {
    raw.filter(|s| !s.is_empty())
        .map(|s| s.parse::<Section>())
        .transpose()
        .map_err(AppError::from)
}

fn parse_timestamp(field: &str, raw: Option<&str>) -> AppResult<Option<DateTime<Utc>>> {
    raw.filter(|s| !s.is_empty())
        .map(|s| {
            DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|_| AppError::BadRequest(format!("{} must be an RFC 3339 timestamp", field)))
        })
        .transpose()
}

/// Trimmed search term, or `None` when blank.
fn search_term(params: SearchParams) -> Option<String> {
    params
        .search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn category_response(category: Category) -> CategoryResponse {
    CategoryResponse {
        id: category.id.to_string(),
        name: category.name,
        slug: category.slug,
        image: category.image,
    }
}

fn tag_response(tag: Tag) -> TagResponse {
    TagResponse {
        id: tag.id.to_string(),
        name: tag.name,
        slug: tag.slug,
    }
}

fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        title: post.title,
        slug: post.slug,
        category_id: post.category_id.to_string(),
        image: post.image,
        content: post.content,
        tags: post.tags.into_iter().map(tag_response).collect(),
        section: post.section.as_str().to_string(),
        published: post.published,
        views: post.views,
        meta_title: post.meta_title,
        meta_description: post.meta_description,
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.to_rfc3339(),
    }
}

fn category_draft(req: CategoryRequest) -> CategoryDraft {
    CategoryDraft {
        name: req.name,
        slug: req.slug,
        image: req.image,
    }
}

fn post_draft(req: PostRequest) -> AppResult<PostDraft> {
    Ok(PostDraft {
        category_id: parse_id(&req.category_id)?,
        section: parse_section(req.section.as_deref())?,
        title: req.title,
        slug: req.slug,
        image: req.image,
        content: req.content,
        tags: req.tags,
        published: req.published,
        meta_title: req.meta_title,
        meta_description: req.meta_description,
    })
}

/// POST /admin/api/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let issued = state.auth.login(&req.username, &req.password)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: issued.token,
        token_type: "Bearer".to_string(),
        expires_in: u64::try_from(issued.expires_in).unwrap_or_default(),
    }))
}

// Categories

/// GET /admin/api/categories?search=
pub async fn list_categories(
    state: web::Data<AppState>,
    identity: Identity,
    params: web::Query<SearchParams>,
) -> AppResult<HttpResponse> {
    let term = search_term(params.into_inner());
    let categories = state
        .admin
        .list_categories(identity.actor(), term.as_deref())
        .await?;
    let body: Vec<_> = categories.into_iter().map(category_response).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(body)))
}

/// POST /admin/api/categories
pub async fn create_category(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CategoryRequest>,
) -> AppResult<HttpResponse> {
    let category = state
        .admin
        .create_category(identity.actor(), category_draft(body.into_inner()))
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(category_response(category))))
}

/// PUT /admin/api/categories/{id}
pub async fn update_category(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<String>,
    body: web::Json<CategoryRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&id)?;
    let category = state
        .admin
        .update_category(identity.actor(), id, category_draft(body.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(category_response(category))))
}

/// DELETE /admin/api/categories/{id} - also removes the category's posts.
pub async fn delete_category(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&id)?;
    state.admin.delete_category(identity.actor(), id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::done("Category deleted")))
}

// Posts

/// GET /admin/api/posts?category_id=&section=&published=&search=&created_from=&created_until=
pub async fn list_posts(
    state: web::Data<AppState>,
    identity: Identity,
    params: web::Query<PostListParams>,
) -> AppResult<HttpResponse> {
    let params = params.into_inner();
    let filter = PostFilter {
        category_id: params.category_id.as_deref().map(parse_id).transpose()?,
        section: parse_section(params.section.as_deref())?,
        published: params.published,
        created_from: parse_timestamp("created_from", params.created_from.as_deref())?,
        created_until: parse_timestamp("created_until", params.created_until.as_deref())?,
        search: params.search,
    };

    let posts = state.admin.list_posts(identity.actor(), filter).await?;
    let body: Vec<_> = posts.into_iter().map(post_response).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(body)))
}

/// GET /admin/api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&id)?;
    let post = state.admin.get_post(identity.actor(), id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_response(post))))
}

/// POST /admin/api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let draft = post_draft(body.into_inner())?;
    let post = state.admin.create_post(identity.actor(), draft).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(post_response(post))))
}

/// PUT /admin/api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<String>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&id)?;
    let draft = post_draft(body.into_inner())?;
    let post = state.admin.update_post(identity.actor(), id, draft).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_response(post))))
}

/// DELETE /admin/api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&id)?;
    state.admin.delete_post(identity.actor(), id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::done("Post deleted")))
}

// Tags

/// GET /admin/api/tags?search=
pub async fn list_tags(
    state: web::Data<AppState>,
    identity: Identity,
    params: web::Query<SearchParams>,
) -> AppResult<HttpResponse> {
    let term = search_term(params.into_inner());
    let tags = state.admin.list_tags(identity.actor(), term.as_deref()).await?;
    let body: Vec<_> = tags.into_iter().map(tag_response).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(body)))
}
