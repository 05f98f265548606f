// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Service configuration
//!
//! Every setting can be passed as a command-line flag or read from the
//! environment (a `.env` file is loaded first by `main`). The defaults
//! reproduce the fixed layout the service has always used: models next to
//! the binary, three sibling artifact directories, and a 0.25 detection
//! confidence threshold.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::vision::detection::DetectorParams;

/// Runtime configuration for the enhance-detect service
#[derive(Parser, Debug, Clone)]
#[command(name = "enhance-detect-node")]
#[command(about = "Image enhancement + object detection HTTP service", long_about = None)]
pub struct ServiceConfig {
    /// Interface to bind the HTTP server to
    #[arg(long, env = "API_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind the HTTP server to
    #[arg(long, env = "API_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Enhancement generator (ONNX)
    #[arg(long, env = "ENHANCER_MODEL_PATH", default_value = "model.onnx")]
    pub enhancer_model_path: PathBuf,

    /// YOLO detection model (ONNX)
    #[arg(long, env = "DETECTOR_MODEL_PATH", default_value = "best.onnx")]
    pub detector_model_path: PathBuf,

    /// Optional class-name file, one name per line; overrides model metadata
    #[arg(long, env = "DETECTOR_LABELS_PATH")]
    pub detector_labels_path: Option<PathBuf>,

    /// Staging directory for uploaded files
    #[arg(long, env = "UPLOAD_DIR", default_value = "uploads")]
    pub upload_dir: PathBuf,

    /// Directory for enhanced images
    #[arg(long, env = "ENHANCED_DIR", default_value = "enhanced")]
    pub enhanced_dir: PathBuf,

    /// Directory for annotated results
    #[arg(long, env = "RESULT_DIR", default_value = "results")]
    pub result_dir: PathBuf,

    /// Minimum detection confidence
    #[arg(long, env = "DETECTION_CONFIDENCE", default_value_t = 0.25)]
    pub confidence_threshold: f32,

    /// IoU above which overlapping same-class boxes are suppressed
    #[arg(long, env = "DETECTION_IOU", default_value_t = 0.7)]
    pub iou_threshold: f32,

    /// Maximum boxes kept per image
    #[arg(long, env = "DETECTION_MAX", default_value_t = 300)]
    pub max_detections: usize,

    /// Square input resolution of the detector
    #[arg(long, env = "DETECTOR_INPUT_SIZE", default_value_t = 640)]
    pub detector_input_size: u32,

    /// ONNX Runtime intra-op threads per model
    #[arg(long, env = "VISION_INTRA_THREADS", default_value_t = 4)]
    pub intra_threads: usize,

    /// Request body limit for uploads, in bytes
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = 64 * 1024 * 1024)]
    pub max_upload_bytes: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            enhancer_model_path: PathBuf::from("model.onnx"),
            detector_model_path: PathBuf::from("best.onnx"),
            detector_labels_path: None,
            upload_dir: PathBuf::from("uploads"),
            enhanced_dir: PathBuf::from("enhanced"),
            result_dir: PathBuf::from("results"),
            confidence_threshold: 0.25,
            iou_threshold: 0.7,
            max_detections: 300,
            detector_input_size: 640,
            intra_threads: 4,
            max_upload_bytes: 64 * 1024 * 1024,
        }
    }
}

impl ServiceConfig {
    /// Socket address the HTTP server listens on
    pub fn listen_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port).parse::<SocketAddr>()?;
        Ok(addr)
    }

    /// Detector parameters derived from this configuration
    pub fn detector_params(&self) -> DetectorParams {
        DetectorParams {
            input_size: self.detector_input_size,
            confidence_threshold: self.confidence_threshold,
            iou_threshold: self.iou_threshold,
            max_detections: self.max_detections,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(format!(
                "Detection confidence must be within [0, 1], got {}",
                self.confidence_threshold
            ));
        }
        if !(0.0..=1.0).contains(&self.iou_threshold) {
            return Err(format!(
                "Detection IoU must be within [0, 1], got {}",
                self.iou_threshold
            ));
        }
        if self.detector_input_size == 0 {
            return Err("Detector input size must be greater than 0".to_string());
        }
        if self.max_detections == 0 {
            return Err("Max detections must be greater than 0".to_string());
        }
        if self.intra_threads == 0 {
            return Err("Intra threads must be greater than 0".to_string());
        }
        if self.max_upload_bytes == 0 {
            return Err("Upload limit must be greater than 0".to_string());
        }
        Ok(())
    }
}
