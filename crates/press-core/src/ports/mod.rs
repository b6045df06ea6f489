//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod render;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use render::{RenderError, Renderer, Template};
pub use repository::{BaseRepository, CategoryRepository, PostRepository, TagRepository};
