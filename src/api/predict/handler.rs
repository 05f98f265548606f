// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Predict endpoint handler

use std::time::Instant;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::{multipart::MultipartRejection, Multipart};
use tracing::{debug, info};

use super::request::read_upload;
use super::response::{image_response, NO_DETECTIONS_MESSAGE};
use crate::api::errors::ApiError;
use crate::api::handlers::MessageResponse;
use crate::api::http_server::AppState;
use crate::pipeline::PredictOutcome;

/// POST /predict - Enhance an image, detect objects, return the annotated result
///
/// # Request
/// - multipart form with a `file` field holding the image; other fields are ignored
///
/// # Response
/// - objects found: the annotated image bytes, `Content-Type` from the file extension
/// - nothing found: `{"message": "No objects detected after enhancement"}`
/// - any failure: `{"error": "<message>"}`, still HTTP 200
pub async fn predict_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    match run_predict(state, multipart).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    }
}

async fn run_predict(
    state: AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let multipart = multipart.map_err(|e| ApiError::Multipart(e.to_string()))?;
    let upload = read_upload(multipart).await?;

    let started = Instant::now();
    let filename = upload.filename.clone();
    info!("Predict request for '{}' ({} bytes)", filename, upload.bytes.len());

    // Inference and file I/O are blocking
    let pipeline = state.pipeline.clone();
    let outcome = tokio::task::spawn_blocking(move || pipeline.run(&upload))
        .await
        .map_err(|e| ApiError::TaskFailed(e.to_string()))??;

    match outcome {
        PredictOutcome::NoDetections => {
            info!(
                "Predict '{}' finished in {}ms with no detections",
                filename,
                started.elapsed().as_millis()
            );
            Ok(Json(MessageResponse::new(NO_DETECTIONS_MESSAGE)).into_response())
        }
        PredictOutcome::Annotated {
            result_path,
            detections,
        } => {
            let bytes = tokio::fs::read(&result_path).await.map_err(|e| {
                crate::storage::StorageError::Io {
                    path: result_path.clone(),
                    source: e,
                }
            })?;
            debug!("Returning {} ({} bytes)", result_path.display(), bytes.len());
            info!(
                "Predict '{}' finished in {}ms with {} detection(s)",
                filename,
                started.elapsed().as_millis(),
                detections.len()
            );
            Ok(image_response(&result_path, bytes))
        }
    }
}
