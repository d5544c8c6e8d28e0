use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use safari_pricing::cache::{start_cache_warmer, AppCache};
use safari_pricing::config::Config;
use safari_pricing::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "safari_pricing=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let db = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to database")?;
    info!("Database pool ready");

    let cache = AppCache::new(config.pricing_cache_ttl);
    tokio::spawn(start_cache_warmer(
        cache.clone(),
        db.clone(),
        config.cache_warm_interval,
    ));

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address()))?;
    info!("Listening on {}", config.bind_address());

    axum::serve(listener, app(AppState { db, cache })).await?;

    Ok(())
}
