// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Detector decode + NMS tests on synthetic YOLOv8 output

use enhance_detect_node::vision::detection::{
    decode_predictions, letterbox, non_max_suppression, DetectorParams,
};
use image::DynamicImage;
use ndarray::Array3;

/// YOLOv8 `[1, 4 + classes, anchors]` tensor with the given anchors set
fn yolo_output(
    classes: usize,
    anchors: usize,
    boxes: &[(usize, [f32; 4], usize, f32)],
) -> Array3<f32> {
    let mut out = Array3::<f32>::zeros((1, 4 + classes, anchors));
    for &(anchor, [cx, cy, w, h], class, score) in boxes {
        out[[0, 0, anchor]] = cx;
        out[[0, 1, anchor]] = cy;
        out[[0, 2, anchor]] = w;
        out[[0, 3, anchor]] = h;
        out[[0, 4 + class, anchor]] = score;
    }
    out
}

#[test]
fn test_boxes_mapped_back_through_letterbox() {
    // 256x256 enhanced image letterboxed to 640 (scale 2.5, no padding)
    let img = DynamicImage::new_rgb8(256, 256);
    let (_, info) = letterbox(&img, 640);

    // Box spanning canvas (25, 25)-(125, 125)
    let out = yolo_output(2, 16, &[(3, [75.0, 75.0, 100.0, 100.0], 0, 0.9)]);
    let dets = decode_predictions(out.view().into_dyn(), &info, 0.25).unwrap();

    assert_eq!(dets.len(), 1);
    let d = dets[0];
    assert!((d.x1 - 10.0).abs() < 1e-3);
    assert!((d.y1 - 10.0).abs() < 1e-3);
    assert!((d.x2 - 50.0).abs() < 1e-3);
    assert!((d.y2 - 50.0).abs() < 1e-3);
}

#[test]
fn test_full_decode_nms_flow() {
    let img = DynamicImage::new_rgb8(640, 640);
    let (_, info) = letterbox(&img, 640);
    let params = DetectorParams::default();

    let out = yolo_output(
        3,
        32,
        &[
            // Two near-duplicates of class 0, one kept
            (0, [100.0, 100.0, 50.0, 50.0], 0, 0.95),
            (1, [102.0, 101.0, 50.0, 50.0], 0, 0.80),
            // Same spot, other class: kept
            (2, [100.0, 100.0, 50.0, 50.0], 2, 0.60),
            // Below the 0.25 threshold
            (3, [300.0, 300.0, 40.0, 40.0], 1, 0.20),
            // Separate object
            (4, [500.0, 400.0, 80.0, 60.0], 1, 0.30),
        ],
    );

    let candidates =
        decode_predictions(out.view().into_dyn(), &info, params.confidence_threshold).unwrap();
    assert_eq!(candidates.len(), 4);

    let dets = non_max_suppression(candidates, params.iou_threshold, params.max_detections);
    let summary: Vec<(usize, f32)> = dets.iter().map(|d| (d.class_id, d.confidence)).collect();
    assert_eq!(summary, vec![(0, 0.95), (2, 0.60), (1, 0.30)]);
}

#[test]
fn test_empty_output_yields_no_detections() {
    let img = DynamicImage::new_rgb8(256, 256);
    let (_, info) = letterbox(&img, 640);
    let out = yolo_output(80, 8400, &[]);

    let dets = decode_predictions(out.view().into_dyn(), &info, 0.25).unwrap();
    assert!(dets.is_empty());
    assert!(non_max_suppression(dets, 0.7, 300).is_empty());
}
