// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! API error type
//!
//! Every failure is reported as HTTP 200 with a `{"error": "<message>"}`
//! body; clients tell errors apart from results by payload shape only.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::pipeline::PipelineError;
use crate::storage::StorageError;

/// JSON body for every failed request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid multipart request: {0}")]
    Multipart(String),

    #[error("No file uploaded: expected a multipart field named '{0}'")]
    MissingFile(&'static str),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Processing task failed: {0}")]
    TaskFailed(String),
}

impl ApiError {
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!("Request failed: {}", self);
        (StatusCode::OK, Json(self.to_response())).into_response()
    }
}
