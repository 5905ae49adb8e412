//! Plume blog backend - server entry point.
//!
//! Wires the Postgres adapters into the core use cases and serves the
//! HTTP API. All configuration comes from `PLUME_`-prefixed
//! environment variables with development defaults.

mod config;
mod crypto;

use std::sync::Arc;

use anyhow::{Context as _, Result};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use plume_api_http::state::AppState;
use plume_core::usecase::{AuthUseCase, CategoryUseCase, PostUseCase, UserUseCase};
use plume_infra_postgres::{
    run_migrations, ConnManager, DbClient, DbConfig, PgCategoryRepository, PgPostRepository,
    PgTxManager, PgUserRepository,
};

use crate::config::Settings;
use crate::crypto::{JwtTokenProvider, Sha256PasswordHasher};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn init_tracing(log_format: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("plume=info,tower_http=info"))
        .context("failed to build env filter")?;

    match log_format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load()?;
    init_tracing(&settings.log_format)?;

    info!(version = VERSION, "plume server starting");

    let client = DbClient::connect(&DbConfig {
        url: settings.database_url.clone(),
        max_connections: settings.max_connections,
        acquire_timeout_secs: settings.acquire_timeout_secs,
    })
    .await
    .context("failed to connect to Postgres")?;

    run_migrations(&client.pool())
        .await
        .context("failed to run migrations")?;

    // DI wiring: Postgres adapters behind the core ports.
    let conn = ConnManager::new(client.pool());
    let users = Arc::new(PgUserRepository::new(conn.clone()));
    let posts = Arc::new(PgPostRepository::new(conn.clone()));
    let categories = Arc::new(PgCategoryRepository::new(conn));
    let tx = Arc::new(PgTxManager::new(client.pool()));
    let hasher = Arc::new(Sha256PasswordHasher);
    let tokens = Arc::new(JwtTokenProvider::new(
        &settings.jwt_secret,
        settings.jwt_ttl_secs,
    ));

    let state = Arc::new(AppState {
        users: UserUseCase::new(users.clone(), tx.clone(), hasher.clone()),
        posts: PostUseCase::new(posts, categories.clone(), tx.clone()),
        categories: CategoryUseCase::new(categories, tx),
        auth: AuthUseCase::new(users, hasher, tokens),
        detailed_errors: settings.detailed_errors,
    });

    let app = plume_api_http::router(state);

    let listener = tokio::net::TcpListener::bind(&settings.http_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.http_addr))?;
    info!(addr = %settings.http_addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server error")?;

    info!("shutting down, closing database pool");
    client.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
