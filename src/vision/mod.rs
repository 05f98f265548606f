// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision processing module for CPU-based image enhancement and detection
//!
//! This module provides:
//! - Image enhancement via an ONNX generator network
//! - Object detection via a YOLOv8 ONNX export
//! - Bounding-box annotation of detection results
//!
//! All models run on CPU through ONNX Runtime.

pub mod annotation;
pub mod detection;
pub mod enhancement;
pub mod image_utils;
pub mod model_manager;
pub mod session;

pub use annotation::{draw_annotations, format_label, AnnotateError, Annotation, AnnotationStyle};
pub use detection::{Detection, DetectorParams, ObjectDetector, YoloDetector};
pub use enhancement::{EnhancerModel, ImageEnhancer};
pub use image_utils::{decode_image_bytes, detect_format, ImageError, ImageInfo};
pub use model_manager::{VisionModelInfo, VisionModelManager};
