//! Application services - the read and write paths built on the ports.

mod admin;
mod auth;
mod content;

pub use admin::{AdminService, CategoryDraft, PostDraft, PostFilter};
pub use auth::{AdminAccount, AuthService, IssuedToken};
pub use content::{
    COMMUNITY_LIMIT, ContentService, FEATURED_LIMIT, HERO_LIMIT, HOME_RECENT_LIMIT, POPULAR_LIMIT,
    RELATED_LIMIT, SIDEBAR_RECENT_LIMIT,
};
