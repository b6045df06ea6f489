//! # Press Infrastructure
//!
//! Concrete implementations of the ports defined in `press-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - In-memory store only
//! - `postgres` - PostgreSQL persistence via SeaORM
//! - `auth` - JWT + Argon2 authentication
//! - `templates` - Tera page rendering

pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "templates")]
pub mod render;

pub use database::{DatabaseConfig, DatabaseConnections, InMemoryContentStore};

#[cfg(feature = "postgres")]
pub use database::{PostgresCategoryRepository, PostgresPostRepository, PostgresTagRepository};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};

#[cfg(feature = "templates")]
pub use render::TeraRenderer;
