// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Liveness and health endpoints

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use super::http_server::AppState;
use crate::version;
use crate::vision::VisionModelInfo;

/// Body of `GET /`
pub const API_RUNNING_MESSAGE: &str = "🚀 API is running! Upload an image to /predict";

/// `{"message": "..."}` body shared by the informational responses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub models: Vec<VisionModelInfo>,
}

/// GET / - liveness banner
pub async fn home_handler() -> Json<MessageResponse> {
    Json(MessageResponse::new(API_RUNNING_MESSAGE))
}

/// GET /health - version and loaded models
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: version::VERSION.to_string(),
        models: state.models.as_ref().clone(),
    })
}
