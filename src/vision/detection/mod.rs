// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Object detection
//!
//! YOLOv8-style detector exported to ONNX. Letterboxing, decoding and
//! non-maximum suppression all happen here, so callers only see boxes in
//! the pixel space of the image they passed in.

pub mod labels;
pub mod model;
pub mod postprocessing;
pub mod preprocessing;

use std::path::Path;

use anyhow::Result;
use image::DynamicImage;
use serde::Serialize;

use crate::vision::image_utils::open_image;

pub use labels::{load_labels_file, parse_names_metadata};
pub use model::YoloDetector;
pub use postprocessing::{decode_predictions, iou, non_max_suppression};
pub use preprocessing::{letterbox, preprocess_for_detection, LetterboxInfo};

/// Default square input resolution of the detector
pub const DEFAULT_DETECTOR_INPUT_SIZE: u32 = 640;

/// Default minimum class score for a box to be kept
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.25;

/// Default IoU above which overlapping boxes of one class are suppressed
pub const DEFAULT_IOU_THRESHOLD: f32 = 0.7;

/// Default cap on boxes returned per image
pub const DEFAULT_MAX_DETECTIONS: usize = 300;

/// One detected object, corners in image pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Detection {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub confidence: f32,
    pub class_id: usize,
}

impl Detection {
    pub fn width(&self) -> f32 {
        (self.x2 - self.x1).max(0.0)
    }

    pub fn height(&self) -> f32 {
        (self.y2 - self.y1).max(0.0)
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }
}

/// Detector tuning knobs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorParams {
    pub input_size: u32,
    pub confidence_threshold: f32,
    pub iou_threshold: f32,
    pub max_detections: usize,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            input_size: DEFAULT_DETECTOR_INPUT_SIZE,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            iou_threshold: DEFAULT_IOU_THRESHOLD,
            max_detections: DEFAULT_MAX_DETECTIONS,
        }
    }
}

/// Anything that finds labelled boxes in an image
pub trait ObjectDetector: Send + Sync {
    /// Boxes sorted by descending confidence
    fn detect(&self, image: &DynamicImage) -> Result<Vec<Detection>>;

    /// Human-readable name of a class index
    fn class_name(&self, class_id: usize) -> Option<String>;

    /// Open an image file and run [`ObjectDetector::detect`] on it
    fn detect_path(&self, path: &Path) -> Result<Vec<Detection>> {
        let image = open_image(path)?;
        self.detect(&image)
    }
}
