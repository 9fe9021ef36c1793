//! Standalone server: shared API routes mounted at the root, plus
//! operational routes.

use axum::Router;
use podreview_backend::{api_routes, common_routes, AppConfig, AppState, PostgresStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("podreview_backend=info".parse()?),
        )
        .init();

    let config = AppConfig::from_env();
    let store = PostgresStore::connect(&config.database_url).await?;
    tracing::info!("connected to database");
    let state = AppState::new(Arc::new(store));

    let app = Router::new()
        .merge(common_routes())
        .merge(api_routes(state))
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(1024 * 1024))
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
