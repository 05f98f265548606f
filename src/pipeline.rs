// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Enhance-then-detect request pipeline
//!
//! One call to [`PredictPipeline::run`] handles one upload end to end:
//! staging, enhancement, detection on the saved enhanced image, and
//! annotation. Every step is blocking; async callers run it on the blocking
//! thread pool.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::storage::{ArtifactStore, StorageError};
use crate::vision::annotation::{
    draw_annotations, format_label, AnnotateError, Annotation, AnnotationStyle,
};
use crate::vision::detection::{Detection, ObjectDetector};
use crate::vision::enhancement::{postprocess_enhanced, preprocess_for_enhancement, ImageEnhancer};
use crate::vision::image_utils::{decode_image_bytes, open_image, save_image, ImageError};

/// A file received from the client
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// What a successful pipeline run produced
#[derive(Debug, Clone, PartialEq)]
pub enum PredictOutcome {
    /// Annotated image written to `result_path`
    Annotated {
        result_path: PathBuf,
        detections: Vec<Detection>,
    },
    /// The detector found nothing; no result file was written
    NoDetections,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error("{0:#}")]
    Inference(anyhow::Error),

    #[error("Unknown class index {0}")]
    UnknownClass(usize),

    #[error(transparent)]
    Annotate(#[from] AnnotateError),
}

pub struct PredictPipeline {
    store: ArtifactStore,
    enhancer: Arc<dyn ImageEnhancer>,
    detector: Arc<dyn ObjectDetector>,
    style: AnnotationStyle,
}

impl PredictPipeline {
    pub fn new(
        store: ArtifactStore,
        enhancer: Arc<dyn ImageEnhancer>,
        detector: Arc<dyn ObjectDetector>,
    ) -> Self {
        Self {
            store,
            enhancer,
            detector,
            style: AnnotationStyle::default(),
        }
    }

    /// Run the full pipeline for one upload
    pub fn run(&self, upload: &UploadedFile) -> Result<PredictOutcome, PipelineError> {
        let filename = upload.filename.as_str();

        // Stage the raw upload, then work from what is on disk
        let upload_path = self.store.save_upload(filename, &upload.bytes)?;
        let raw = self.store.read(&upload_path)?;
        let (image, info) = decode_image_bytes(&raw)?;
        debug!(
            "Decoded {} ({}x{}, {:?}, {} bytes)",
            filename, info.width, info.height, info.format, info.size_bytes
        );

        let batch = preprocess_for_enhancement(&image);
        let enhanced = self
            .enhancer
            .enhance(&batch)
            .map_err(PipelineError::Inference)?;
        let enhanced_image = image::DynamicImage::ImageRgb8(postprocess_enhanced(&enhanced));

        let enhanced_path = self.store.enhanced_path(filename)?;
        save_image(&enhanced_image, &enhanced_path)?;
        debug!("Saved enhanced image to {}", enhanced_path.display());

        let detections = self
            .detector
            .detect_path(&enhanced_path)
            .map_err(PipelineError::Inference)?;

        if detections.is_empty() {
            info!("No objects detected in {}", filename);
            return Ok(PredictOutcome::NoDetections);
        }

        let annotations = detections
            .iter()
            .map(|det| -> Result<Annotation, PipelineError> {
                let name = self
                    .detector
                    .class_name(det.class_id)
                    .ok_or(PipelineError::UnknownClass(det.class_id))?;
                Ok(Annotation {
                    detection: *det,
                    label: format_label(&name, det.confidence),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let canvas = open_image(&enhanced_path)?.to_rgb8();
        let annotated = draw_annotations(&canvas, &annotations, &self.style)?;

        let result_path = self.store.result_path(filename)?;
        save_image(&image::DynamicImage::ImageRgb8(annotated), &result_path)?;
        info!(
            "Annotated {} object(s) in {} -> {}",
            detections.len(),
            filename,
            result_path.display()
        );

        Ok(PredictOutcome::Annotated {
            result_path,
            detections,
        })
    }
}
