// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision model manager for loading the enhancement and detection models

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;

use crate::config::ServiceConfig;
use crate::vision::detection::{ObjectDetector, YoloDetector};
use crate::vision::enhancement::{EnhancerModel, ImageEnhancer};

/// Information about a loaded vision model
#[derive(Debug, Clone, Serialize)]
pub struct VisionModelInfo {
    /// Model name
    pub name: String,
    /// Model type (enhancement, detection)
    pub model_type: String,
    /// File the model was loaded from
    pub path: String,
    /// Whether the model is available
    pub available: bool,
}

/// Holds the two models every request needs
///
/// Both are loaded once at startup; the service does not run without them.
pub struct VisionModelManager {
    enhancer: Arc<dyn ImageEnhancer>,
    detector: Arc<dyn ObjectDetector>,
    enhancer_path: PathBuf,
    detector_path: PathBuf,
}

impl VisionModelManager {
    /// Load both models named in the configuration
    ///
    /// Loading is blocking work and runs off the async workers.
    pub async fn new(config: &ServiceConfig) -> anyhow::Result<Self> {
        let enhancer_path = config.enhancer_model_path.clone();
        let detector_path = config.detector_model_path.clone();
        let labels_path = config.detector_labels_path.clone();
        let params = config.detector_params();
        let threads = config.intra_threads;

        let (enhancer, detector) = {
            let enhancer_path = enhancer_path.clone();
            let detector_path = detector_path.clone();
            tokio::task::spawn_blocking(move || -> anyhow::Result<_> {
                let enhancer = EnhancerModel::new(&enhancer_path, threads)
                    .context("Failed to load enhancement model")?;
                let detector =
                    YoloDetector::new(&detector_path, labels_path.as_deref(), params, threads)
                        .context("Failed to load detection model")?;
                Ok((enhancer, detector))
            })
            .await
            .context("Model loading task failed")??
        };

        tracing::info!(
            "✅ Vision models ready (enhancer: {}, detector: {})",
            enhancer_path.display(),
            detector_path.display()
        );

        Ok(Self {
            enhancer: Arc::new(enhancer),
            detector: Arc::new(detector),
            enhancer_path,
            detector_path,
        })
    }

    /// Wrap already constructed models
    pub fn from_parts(
        enhancer: Arc<dyn ImageEnhancer>,
        detector: Arc<dyn ObjectDetector>,
        enhancer_path: impl Into<PathBuf>,
        detector_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            enhancer,
            detector,
            enhancer_path: enhancer_path.into(),
            detector_path: detector_path.into(),
        }
    }

    pub fn enhancer(&self) -> Arc<dyn ImageEnhancer> {
        self.enhancer.clone()
    }

    pub fn detector(&self) -> Arc<dyn ObjectDetector> {
        self.detector.clone()
    }

    /// List all loaded vision models
    pub fn list_models(&self) -> Vec<VisionModelInfo> {
        vec![
            VisionModelInfo {
                name: model_name(&self.enhancer_path),
                model_type: "enhancement".to_string(),
                path: self.enhancer_path.display().to_string(),
                available: true,
            },
            VisionModelInfo {
                name: model_name(&self.detector_path),
                model_type: "detection".to_string(),
                path: self.detector_path.display().to_string(),
                available: true,
            },
        ]
    }
}

fn model_name(path: &std::path::Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".to_string())
}
