//! Application configuration loaded from environment variables.

use std::env;

use press_core::domain::SiteMeta;
use press_core::services::AdminAccount;
use press_infra::{DatabaseConfig, JwtConfig};

const DEFAULT_TEMPLATE_GLOB: &str = "apps/site-server/templates/**/*.html";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub run_migrations: bool,
    pub template_glob: String,
    pub site: SiteMeta,
    pub admin: AdminAccount,
    pub jwt: JwtConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| {
            let mut config = DatabaseConfig::new(url);
            if let Some(max) = parse_var("DB_MAX_CONNECTIONS") {
                config.max_connections = max;
            }
            if let Some(min) = parse_var("DB_MIN_CONNECTIONS") {
                config.min_connections = min;
            }
            config
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(8080),
            database,
            run_migrations: env::var("RUN_MIGRATIONS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            template_glob: env::var("TEMPLATE_GLOB")
                .unwrap_or_else(|_| DEFAULT_TEMPLATE_GLOB.to_string()),
            site: Self::site_from_env(),
            admin: AdminAccount {
                username: env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),
                password_hash: env::var("ADMIN_PASSWORD_HASH").ok().filter(|h| !h.is_empty()),
            },
            jwt: JwtConfig::from_env(),
        }
    }

    /// Site strings, each falling back to the built-in magazine defaults.
    fn site_from_env() -> SiteMeta {
        let defaults = SiteMeta::default();
        SiteMeta {
            name: env::var("SITE_NAME").unwrap_or(defaults.name),
            home_title: env::var("SITE_META_TITLE").unwrap_or(defaults.home_title),
            home_description: env::var("SITE_META_DESCRIPTION")
                .unwrap_or(defaults.home_description),
            home_keywords: env::var("SITE_META_KEYWORDS").unwrap_or(defaults.home_keywords),
            keyword_suffix: env::var("SITE_KEYWORD_SUFFIX").unwrap_or(defaults.keyword_suffix),
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}
