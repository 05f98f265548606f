// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Predict response helpers

use std::path::Path;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::vision::image_utils::content_type_for_path;

/// Body message when the detector finds nothing
pub const NO_DETECTIONS_MESSAGE: &str = "No objects detected after enhancement";

/// Raw file body with a content type inferred from the file's extension
pub fn image_response(path: &Path, bytes: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type_for_path(path))],
        bytes,
    )
        .into_response()
}
