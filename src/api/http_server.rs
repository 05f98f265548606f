// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{health_handler, home_handler};
use super::predict::predict_handler;
use crate::pipeline::PredictPipeline;
use crate::vision::VisionModelInfo;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<PredictPipeline>,
    pub models: Arc<Vec<VisionModelInfo>>,
}

impl AppState {
    pub fn new(pipeline: PredictPipeline, models: Vec<VisionModelInfo>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            models: Arc::new(models),
        }
    }
}

pub fn create_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        // Liveness banner
        .route("/", get(home_handler))
        // Health check
        .route("/health", get(health_handler))
        // Enhance + detect
        .route("/predict", post(predict_handler))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn start_server(
    state: AppState,
    addr: SocketAddr,
    max_upload_bytes: usize,
) -> anyhow::Result<()> {
    let app = create_router(state, max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
