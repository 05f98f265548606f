// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Predict API endpoint module
//!
//! Provides POST /predict: enhance an uploaded image, detect objects on the
//! enhanced result and return the annotated image.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::predict_handler;
pub use request::{read_upload, FILE_FIELD};
pub use response::{image_response, NO_DETECTIONS_MESSAGE};
