mod auth;
mod config;
mod db;
mod errors;
mod generation;
mod models;
mod profile;
mod renderer;
mod routes;
mod state;
mod storage;
mod store;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::delivery::OperatorLogDelivery;
use crate::auth::service::AuthService;
use crate::auth::session::RedisSessionStore;
use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::generation::service::GenerationService;
use crate::profile::service::ProfileService;
use crate::renderer::http::HttpRenderer;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::s3::S3ArtifactStore;
use crate::store::postgres::PgStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("autotailor_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting AutoTailor API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL and apply the versioned schema once, up front
    let pool = create_pool(&config.database_url).await?;
    run_migrations(&pool).await?;

    // Initialize Redis (server-side session store)
    let redis = redis::Client::open(config.redis_url.clone())?;
    let sessions = Arc::new(RedisSessionStore::new(
        redis,
        Duration::from_secs(config.session_ttl_hours * 3600),
    ));
    info!("Redis session store initialized");

    // Initialize S3 / MinIO artifact storage
    let s3 = build_s3_client(&config).await;
    let artifacts = Arc::new(S3ArtifactStore::new(s3, config.s3_bucket.clone()));
    info!("S3 artifact store initialized (bucket: {})", config.s3_bucket);

    // Initialize the external Renderer client
    let renderer = Arc::new(HttpRenderer::new(&config.renderer_url)?);
    info!("Renderer client initialized ({})", config.renderer_url);

    // Compose services around the shared persistence seam
    let store = Arc::new(PgStore::new(pool));
    let profiles = ProfileService::new(store.clone());
    let state = AppState {
        auth: AuthService::new(store.clone(), sessions, Arc::new(OperatorLogDelivery)),
        profiles: profiles.clone(),
        generations: GenerationService::new(store, profiles, artifacts, renderer),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "autotailor-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
