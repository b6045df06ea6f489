//! Public HTML pages.

use actix_web::{HttpResponse, http::header::ContentType, web};
use serde::Serialize;

use press_core::ports::Template;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Serialize the page, add the site strings, and render it.
fn render<T: Serialize>(state: &AppState, template: Template, page: &T) -> AppResult<HttpResponse> {
    let mut context =
        serde_json::to_value(page).map_err(|e| AppError::Internal(e.to_string()))?;
    if let Some(map) = context.as_object_mut() {
        let site = serde_json::to_value(state.content.site())
            .map_err(|e| AppError::Internal(e.to_string()))?;
        map.insert("site".to_string(), site);
    }

    let html = state.renderer.render(template, &context)?;
    Ok(HttpResponse::Ok().content_type(ContentType::html()).body(html))
}

/// GET /
pub async fn home(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let page = state.content.home().await?;
    render(&state, Template::Home, &page)
}

/// GET /post/{slug}
pub async fn post_detail(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let page = state.content.post_detail(&slug).await?;
    render(&state, Template::PostDetail, &page)
}

/// GET /category/{slug}
pub async fn category_posts(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let page = state.content.category_feed(&slug).await?;
    render(&state, Template::CategoryPosts, &page)
}

/// GET /tag/{slug}
pub async fn tag_posts(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let page = state.content.tag_feed(&slug).await?;
    render(&state, Template::TagPosts, &page)
}
