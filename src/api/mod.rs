use axum::{Router, routing::post};
use std::path::PathBuf;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

pub mod handlers;
pub mod models;

pub fn create_router(static_dir: Option<PathBuf>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new().route("/search", post(handlers::search_handler));

    // Static file serving for a browser UI, when one is deployed
    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.layer(ServiceBuilder::new().layer(cors))
}

/// Binds `addr` and serves the search API until the process exits.
pub async fn serve(addr: &str, static_dir: Option<PathBuf>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("search service listening on {}", listener.local_addr()?);
    axum::serve(listener, create_router(static_dir)).await?;
    Ok(())
}
