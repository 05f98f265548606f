// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Shared helpers for the HTTP endpoint tests

#![allow(dead_code)]

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, Response},
    Router,
};
use enhance_detect_node::{
    api::{create_router, AppState},
    pipeline::PredictPipeline,
    storage::ArtifactStore,
    vision::{detection::Detection, ImageEnhancer, ObjectDetector, VisionModelManager},
};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use mockall::mock;
use ndarray::Array4;

pub const BOUNDARY: &str = "----enhance-detect-boundary";

mock! {
    pub Enhancer {}

    impl ImageEnhancer for Enhancer {
        fn enhance(&self, batch: &Array4<f32>) -> anyhow::Result<Array4<f32>>;
    }
}

mock! {
    pub Detector {}

    impl ObjectDetector for Detector {
        fn detect(&self, image: &DynamicImage) -> anyhow::Result<Vec<Detection>>;
        fn class_name(&self, class_id: usize) -> Option<String>;
    }
}

/// Enhancer that returns its input unchanged
pub fn passthrough_enhancer() -> MockEnhancer {
    let mut enhancer = MockEnhancer::new();
    enhancer.expect_enhance().returning(|batch| Ok(batch.clone()));
    enhancer
}

/// Detector that always reports `detections` and names class 0 "cat"
pub fn fixed_detector(detections: Vec<Detection>) -> MockDetector {
    let mut detector = MockDetector::new();
    detector
        .expect_detect()
        .returning(move |_| Ok(detections.clone()));
    detector
        .expect_class_name()
        .returning(|id| (id == 0).then(|| "cat".to_string()));
    detector
}

pub fn cat_at_10_10_50_50() -> Detection {
    Detection {
        x1: 10.0,
        y1: 10.0,
        x2: 50.0,
        y2: 50.0,
        confidence: 0.9,
        class_id: 0,
    }
}

pub fn app_with(
    root: &Path,
    enhancer: MockEnhancer,
    detector: MockDetector,
    max_upload_bytes: usize,
) -> Router {
    let store = ArtifactStore::rooted_at(root);
    store.ensure_dirs().unwrap();

    let enhancer: Arc<dyn ImageEnhancer> = Arc::new(enhancer);
    let detector: Arc<dyn ObjectDetector> = Arc::new(detector);
    let manager = VisionModelManager::from_parts(
        enhancer.clone(),
        detector.clone(),
        "model.onnx",
        "best.onnx",
    );

    let pipeline = PredictPipeline::new(store, manager.enhancer(), manager.detector());
    create_router(AppState::new(pipeline, manager.list_models()), max_upload_bytes)
}

pub fn encoded_image(format: ImageFormat) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(80, 60, Rgb([90, 120, 150])));
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, format).unwrap();
    buffer.into_inner()
}

/// One multipart part: (field name, optional filename, content)
pub type Part<'a> = (&'a str, Option<&'a str>, &'a [u8]);

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, filename, content) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match filename {
            Some(filename) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        name, filename
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(b"Content-Type: application/octet-stream\r\n");
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n", name).as_bytes(),
                );
            }
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn predict_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
