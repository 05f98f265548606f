// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod pipeline;
pub mod storage;
pub mod version;
pub mod vision;

pub use api::{create_router, start_server, ApiError, AppState};
pub use config::ServiceConfig;
pub use pipeline::{PipelineError, PredictOutcome, PredictPipeline, UploadedFile};
pub use storage::{ArtifactStore, StorageError};
pub use vision::{
    Detection, DetectorParams, EnhancerModel, ImageEnhancer, ObjectDetector, VisionModelManager,
    YoloDetector,
};
