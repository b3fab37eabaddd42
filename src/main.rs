//! visitlog server entry point.
//!
//! Starts the Axum HTTP server with the recorder and read endpoints.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use visitlog::api;
use visitlog::app_state::AppState;
use visitlog::config::AppConfig;
use visitlog::persistence::postgres::VisitStore;
use visitlog::service::VisitService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting visitlog");

    // Build the connection pool. Lazy: the first request leases the
    // first connection, so an unreachable store surfaces per request
    // as the connection-failed body rather than aborting startup.
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
        .connect_lazy(&config.database_url)?;

    // Build service layer
    let visit_service = Arc::new(VisitService::new(VisitStore::new(pool)));

    // Build application state
    let app_state = AppState { visit_service };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server; ConnectInfo supplies the TCP peer address to the
    // ClientAddr extractor.
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
