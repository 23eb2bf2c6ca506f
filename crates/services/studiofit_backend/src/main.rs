// File: services/studiofit_backend/src/main.rs
use axum::{routing::get, Router};
use std::sync::Arc;
use studiofit_booking::routes as booking_routes;
use studiofit_config::load_config;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() {
    let config = Arc::new(load_config().expect("Failed to load config"));
    studiofit_common::logging::init();

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to Studiofit API!" }))
        .merge(booking_routes::routes(config.clone()));

    let app = Router::new().nest("/api", api_router);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    info!("Studiofit backend listening on {}", addr);
    axum::serve(listener, app).await.expect("Server error");
}
