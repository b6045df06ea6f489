//! # Press Site Server
//!
//! Serves the public pages and the admin API on Actix-web.

use actix_web::{App, HttpServer, middleware::NormalizePath, web};
use clap::Parser;
use tracing_actix_web::TracingLogger;

mod cli;
mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use cli::{Cli, Command};
use config::AppConfig;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load .env file if present
    dotenvy::dotenv().ok();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::HashPassword { password } => {
            let hash = cli::hash_password(password, std::io::stdin().lock())?;
            println!("{hash}");
            Ok(())
        }
    }
}

async fn serve() -> anyhow::Result<()> {
    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();
    if config.admin.password_hash.is_none() {
        tracing::warn!(
            "ADMIN_PASSWORD_HASH not set. Admin sign-in is disabled. \
             Generate one with `site-server hash-password`."
        );
    }

    tracing::info!("Starting Press site server on {}:{}", config.host, config.port);

    let state = AppState::new(&config).await?;

    HttpServer::new(move || {
        App::new()
            .wrap(NormalizePath::trim())
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
