//! Resort pricing service entry point

use axum::{routing::get, Json, Router};
use sqlx::postgres::PgPoolOptions;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use resort_pricing::cache;
use resort_pricing::config::AppConfig;
use resort_pricing::error::Result;
use resort_pricing::{pricing, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "resort_pricing=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    let config = AppConfig::from_env()?;

    let db = PgPoolOptions::new()
        .max_connections(config.max_db_connections)
        .connect(&config.database_url)
        .await?;
    info!("Connected to database");

    let bind_addr = config.bind_addr;
    let state = AppState::new(db.clone(), config);

    // Keep the rule/config caches warm in the background
    let warmer_cache = state.cache.clone();
    let warmer_ttl = state.config.pricing_cache_ttl_secs;
    tokio::spawn(async move {
        cache::start_cache_warmer(warmer_cache, db, warmer_ttl).await;
    });

    info!(
        "Pricing service listening on {} (resort timezone {})",
        bind_addr, state.config.resort_timezone
    );

    let app = Router::new()
        .route("/health", get(health))
        .merge(pricing::router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Liveness probe with a database ping
async fn health(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Result<Json<serde_json::Value>> {
    sqlx::query("SELECT 1").execute(&state.db).await?;
    Ok(Json(serde_json::json!({ "status": "ok" })))
}
