// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! YOLOv8 detector ONNX model

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use image::DynamicImage;
use ort::session::Session;
use ort::value::Value;
use tracing::{debug, info, warn};

use super::labels::{load_labels_file, parse_names_metadata};
use super::postprocessing::{decode_predictions, non_max_suppression};
use super::preprocessing::preprocess_for_detection;
use super::{Detection, DetectorParams, ObjectDetector};
use crate::vision::session::{build_cpu_session, first_input_name};

/// YOLO detector wrapper
///
/// Expects a single `[1, 3, S, S]` float input and a `[1, 4 + C, N]`
/// prediction output.
#[derive(Clone)]
pub struct YoloDetector {
    /// ONNX Runtime session (thread-safe)
    session: Arc<Mutex<Session>>,
    /// Model input name
    input_name: String,
    /// Class names indexed by class id
    class_names: Arc<Vec<String>>,
    params: DetectorParams,
}

impl std::fmt::Debug for YoloDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YoloDetector")
            .field("input_name", &self.input_name)
            .field("num_classes", &self.class_names.len())
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl YoloDetector {
    /// Load the detector
    ///
    /// Class names come from `labels_path` when given, otherwise from the
    /// model's `names` metadata.
    pub fn new<P: AsRef<Path>>(
        model_path: P,
        labels_path: Option<&Path>,
        params: DetectorParams,
        intra_threads: usize,
    ) -> Result<Self> {
        let model_path = model_path.as_ref();
        info!("Loading detection model from {}", model_path.display());

        let session = build_cpu_session(model_path, intra_threads)?;
        let input_name = first_input_name(&session, "images");

        let class_names = match labels_path {
            Some(path) => load_labels_file(path)?,
            None => {
                let raw = session
                    .metadata()
                    .ok()
                    .and_then(|m| m.custom("names").ok().flatten())
                    .ok_or_else(|| {
                        anyhow!(
                            "Detection model {} has no 'names' metadata; configure a labels file",
                            model_path.display()
                        )
                    })?;
                parse_names_metadata(&raw)?
            }
        };

        info!(
            "✅ Detection model loaded (input: {}, {} classes, conf {}, iou {})",
            input_name,
            class_names.len(),
            params.confidence_threshold,
            params.iou_threshold
        );

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            input_name,
            class_names: Arc::new(class_names),
            params,
        })
    }
}

impl ObjectDetector for YoloDetector {
    fn detect(&self, image: &DynamicImage) -> Result<Vec<Detection>> {
        let (tensor, info) = preprocess_for_detection(image, self.params.input_size);

        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow!("Detection session lock poisoned"))?;

        let input_value = Value::from_array(tensor).context("Failed to create input tensor")?;

        let outputs = session
            .run(ort::inputs![&self.input_name => input_value])
            .context("Detection inference failed")?;

        let predictions = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract detection output")?;

        let candidates = decode_predictions(predictions, &info, self.params.confidence_threshold)?;
        let candidate_count = candidates.len();
        let detections = non_max_suppression(
            candidates,
            self.params.iou_threshold,
            self.params.max_detections,
        );

        if let Some(det) = detections.iter().find(|d| d.class_id >= self.class_names.len()) {
            warn!("Detector produced class index {} with no name", det.class_id);
        }

        debug!(
            "Detection: {} candidates, {} after NMS",
            candidate_count,
            detections.len()
        );
        Ok(detections)
    }

    fn class_name(&self, class_id: usize) -> Option<String> {
        self.class_names.get(class_id).cloned()
    }
}
