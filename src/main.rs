//! Bookshelf - users and books REST API
//! Mission: Serve mock collections behind bearer-token authentication

use anyhow::{Context, Result};
use bookshelf_api::{
    auth::{AccessGuard, Authenticator, InMemoryCredentialStore, JwtHandler},
    create_router, AppState, Config,
};
use clap::Parser;
use dotenv::dotenv;
use std::{path::Path, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment and logging
    load_env();
    init_tracing();

    let config = Config::parse();
    config.validate().context("Invalid configuration")?;

    info!("🚀 Bookshelf API starting");

    let jwt_handler = Arc::new(JwtHandler::new(&config.jwt_secret));
    let credential_store = InMemoryCredentialStore::new(
        &config.admin_id,
        &config.admin_username,
        &config.admin_password,
        config.bcrypt_cost,
    )
    .context("Failed to initialise credential store")?;

    let authenticator = Authenticator::new(
        Arc::new(credential_store),
        jwt_handler.clone(),
        config.token_ttl(),
    );
    let guard = AccessGuard::new(jwt_handler);

    info!(
        "🔐 Authentication initialized (token ttl: {}s)",
        authenticator.token_ttl().as_secs()
    );

    let app = create_router(AppState::new(authenticator, guard));

    let listener = TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    info!("🎯 API server listening on {}", config.bind);
    info!("📚 OpenAPI document at /api-docs/openapi.json");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("👋 Server stopped");
    Ok(())
}

/// Initialize tracing from RUST_LOG
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookshelf_api=debug,bookshelf=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_env() {
    // 1) Standard dotenv search (cwd + parents)
    let _ = dotenv();

    // 2) Also try the manifest directory when launched from elsewhere
    let manifest_env = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
    if manifest_env.exists() {
        let _ = dotenv::from_path(&manifest_env);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
