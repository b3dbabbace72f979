pub mod api;

use crate::service::GenerationService;
use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared application state
pub type AppState = Arc<GenerationService>;

/// ルーターを構築
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/scenarios/", post(api::generate_scenarios))
        .route("/api/scenarios/load", post(api::generate_load))
        .route("/health", get(api::health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Webサーバーを起動する
pub async fn start_server(addr: SocketAddr, service: GenerationService) -> crate::Result<()> {
    let app = app(Arc::new(service));

    tracing::info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
