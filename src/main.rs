//! Music Catalog API - Main Entry Point

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::GovernorLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use music_catalog::infrastructure::driven_adapters::config::{AppConfig, LogFormat};
use music_catalog::infrastructure::driven_adapters::database::{create_pool, run_migrations};
use music_catalog::infrastructure::driving_adapters::api_rest::{self, AppState};

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "music_catalog=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(config.logging.format);
    tracing::info!("Configuration loaded successfully");

    // Create database connection pool
    let pool = create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    // Run migrations
    run_migrations(&pool).await?;
    tracing::info!("Database migrations completed");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let rate_limit = config.rate_limit.clone();
    let admin = config.admin.clone();

    let state = AppState::build(config, pool)
        .await
        .context("failed to prepare audio storage")?;

    // Bootstrap the administrator account when configured
    if let Some(admin) = admin {
        let user = state
            .users
            .ensure_admin
            .execute(&admin.login, &admin.password)
            .await
            .context("failed to ensure administrator account")?;
        tracing::info!(user_id = %user.id(), login = %user.login(), "Administrator account ready");
    }

    let governor_config = GovernorConfigBuilder::default()
        .per_second(rate_limit.requests_per_second)
        .burst_size(rate_limit.burst_size)
        .finish()
        .context("invalid rate limit configuration")?;

    let app = api_rest::router(state).layer(GovernorLayer {
        config: Arc::new(governor_config),
    });

    // Start server
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}
