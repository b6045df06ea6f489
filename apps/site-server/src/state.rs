//! Application state - shared across all handlers.

use std::sync::Arc;

use press_core::domain::SiteMeta;
use press_core::ports::{CategoryRepository, PostRepository, Renderer, TagRepository};
use press_core::services::{AdminAccount, AdminService, AuthService, ContentService};
use press_infra::{Argon2PasswordService, InMemoryContentStore, JwtConfig, JwtTokenService, TeraRenderer};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub content: Arc<ContentService>,
    pub admin: Arc<AdminService>,
    pub auth: Arc<AuthService>,
    pub renderer: Arc<dyn Renderer>,
    /// Which store backs the repositories, reported by the health check.
    pub backend: &'static str,
}

/// The three repositories, however they are backed.
pub struct Stores {
    pub categories: Arc<dyn CategoryRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub backend: &'static str,
}

impl Stores {
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryContentStore::new());
        Self {
            categories: store.clone(),
            posts: store.clone(),
            tags: store,
            backend: "memory",
        }
    }

    #[cfg(feature = "postgres")]
    async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
        use migration::MigratorTrait;
        use press_infra::{
            DatabaseConnections, PostgresCategoryRepository, PostgresPostRepository,
            PostgresTagRepository,
        };

        let Some(db_config) = &config.database else {
            tracing::warn!("DATABASE_URL not set. Content is kept in memory and lost on restart.");
            return Ok(Self::in_memory());
        };

        let connections = DatabaseConnections::init(db_config).await?;
        if config.run_migrations {
            migration::Migrator::up(&connections.main, None).await?;
            tracing::info!("Migrations executed");
        }

        let db = connections.main;
        Ok(Self {
            categories: Arc::new(PostgresCategoryRepository::new(db.clone())),
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            tags: Arc::new(PostgresTagRepository::new(db)),
            backend: "postgres",
        })
    }

    #[cfg(not(feature = "postgres"))]
    async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
        if config.database.is_some() {
            tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
        }
        Ok(Self::in_memory())
    }
}

impl AppState {
    /// Build the application state from configuration.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let renderer = Arc::new(TeraRenderer::new(&config.template_glob)?);
        let stores = Stores::connect(config).await?;

        let state = Self::assemble(
            stores,
            renderer,
            config.site.clone(),
            config.admin.clone(),
            config.jwt.clone(),
        );
        tracing::info!(backend = state.backend, "Application state initialized");
        Ok(state)
    }

    /// Wire the services over already constructed stores.
    pub fn assemble(
        stores: Stores,
        renderer: Arc<dyn Renderer>,
        site: SiteMeta,
        admin: AdminAccount,
        jwt: JwtConfig,
    ) -> Self {
        let content = ContentService::new(
            stores.categories.clone(),
            stores.posts.clone(),
            stores.tags.clone(),
            site,
        );
        let admin_service = AdminService::new(stores.categories, stores.posts, stores.tags);
        let auth = AuthService::new(
            admin,
            Arc::new(Argon2PasswordService::new()),
            Arc::new(JwtTokenService::new(jwt)),
        );

        Self {
            content: Arc::new(content),
            admin: Arc::new(admin_service),
            auth: Arc::new(auth),
            renderer,
            backend: stores.backend,
        }
    }
}
