// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Liveness and health endpoint tests

use axum::{body::Body, http::Request, http::StatusCode};
use tower::util::ServiceExt; // for `oneshot`

use super::common::{app_with, body_json, fixed_detector, passthrough_enhancer};

#[tokio::test]
async fn test_home_returns_running_message() {
    let tmp = tempfile::tempdir().unwrap();
    let app = app_with(tmp.path(), passthrough_enhancer(), fixed_detector(vec![]), 1 << 20);

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json,
        serde_json::json!({"message": "🚀 API is running! Upload an image to /predict"})
    );
}

#[tokio::test]
async fn test_health_lists_models() {
    let tmp = tempfile::tempdir().unwrap();
    let app = app_with(tmp.path(), passthrough_enhancer(), fixed_detector(vec![]), 1 << 20);

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], enhance_detect_node::version::VERSION);

    let models = json["models"].as_array().unwrap();
    assert_eq!(models.len(), 2);
    assert_eq!(models[0]["model_type"], "enhancement");
    assert_eq!(models[1]["name"], "best");
}

#[tokio::test]
async fn test_get_predict_not_allowed() {
    let tmp = tempfile::tempdir().unwrap();
    let app = app_with(tmp.path(), passthrough_enhancer(), fixed_detector(vec![]), 1 << 20);

    let request = Request::builder().uri("/predict").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let tmp = tempfile::tempdir().unwrap();
    let app = app_with(tmp.path(), passthrough_enhancer(), fixed_detector(vec![]), 1 << 20);

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/predict")
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}
