//! API Server Entry Point
//!
//! Uses `anyhow` for startup errors; request-level errors are the bounded
//! contexts' own error types.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use api::{AppConfig, build_router, purge_expired_sessions};
use auth::{InMemoryAuthRepository, PgAuthRepository};
use axum::Router;
use platform::env::ProcessEnv;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,files=info,diagnostics=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let env = Arc::new(ProcessEnv);
    let config = AppConfig::from_env(env.as_ref())?;

    tracing::info!(
        resource_root = %config.files.root.display(),
        diagnostics_enabled = config.diagnostics.enabled,
        operators = config.auth.operators.len(),
        "Configuration loaded"
    );

    let app = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await
                .context("Failed to connect to database")?;

            tracing::info!("Connected to database");

            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            let repo = PgAuthRepository::new(pool);
            purge_expired_sessions(&repo).await;
            build_router(repo, &config, env)
        }
        None => {
            tracing::warn!("No database configured, identities and sessions are kept in memory");
            build_router(InMemoryAuthRepository::new(), &config, env)
        }
    };

    serve(app, config.bind_addr).await
}

async fn serve(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Gracefully shutdown"),
            Err(e) => {
                tracing::warn!(error = %e, "Shutdown signal unavailable");
                std::future::pending::<()>().await;
            }
        }
    })
    .await?;

    Ok(())
}
