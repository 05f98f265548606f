// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod errors;
pub mod handlers;
pub mod http_server;
pub mod predict;

pub use errors::{ApiError, ErrorResponse};
pub use handlers::{HealthResponse, MessageResponse, API_RUNNING_MESSAGE};
pub use http_server::{create_router, start_server, AppState};
pub use predict::{predict_handler, NO_DETECTIONS_MESSAGE};
