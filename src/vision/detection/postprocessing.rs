// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Decoding and non-maximum suppression for YOLOv8 output

use std::cmp::Ordering;

use anyhow::Result;
use ndarray::{ArrayViewD, Axis, Ix2};

use super::preprocessing::LetterboxInfo;
use super::Detection;

/// Decode raw detector output into boxes in original image coordinates
///
/// Accepts `[1, 4 + C, N]` (the usual YOLOv8 export) or the transposed
/// `[1, N, 4 + C]`. The layout with more anchors than attributes wins.
/// Each anchor keeps its best class if that score reaches
/// `confidence_threshold`. Results are unsorted.
pub fn decode_predictions(
    output: ArrayViewD<'_, f32>,
    info: &LetterboxInfo,
    confidence_threshold: f32,
) -> Result<Vec<Detection>> {
    let shape = output.shape().to_vec();
    if shape.len() != 3 || shape[0] != 1 {
        anyhow::bail!("Unexpected detector output shape: {:?}", shape);
    }

    let batch = output.index_axis(Axis(0), 0).into_dimensionality::<Ix2>()?;
    // Rows are attributes, columns are anchors
    let table = if shape[1] > shape[2] {
        batch.reversed_axes()
    } else {
        batch
    };

    let (attributes, anchors) = table.dim();
    if attributes < 5 {
        anyhow::bail!(
            "Detector output has {} attributes per anchor, need at least 5",
            attributes
        );
    }

    let mut detections = Vec::new();
    for i in 0..anchors {
        let mut best_class = 0;
        let mut best_score = f32::NEG_INFINITY;
        for c in 4..attributes {
            let score = table[[c, i]];
            if score > best_score {
                best_score = score;
                best_class = c - 4;
            }
        }

        if best_score.is_nan() || best_score < confidence_threshold {
            continue;
        }

        let cx = table[[0, i]];
        let cy = table[[1, i]];
        let w = table[[2, i]];
        let h = table[[3, i]];

        let (x1, y1) = info.map_to_original(cx - w / 2.0, cy - h / 2.0);
        let (x2, y2) = info.map_to_original(cx + w / 2.0, cy + h / 2.0);

        detections.push(Detection {
            x1,
            y1,
            x2,
            y2,
            confidence: best_score,
            class_id: best_class,
        });
    }

    Ok(detections)
}

/// Per-class greedy non-maximum suppression
///
/// Boxes are visited by descending confidence; a box is dropped when it
/// overlaps an already kept box of the same class with IoU above
/// `iou_threshold`. At most `max_detections` boxes are returned.
pub fn non_max_suppression(
    mut detections: Vec<Detection>,
    iou_threshold: f32,
    max_detections: usize,
) -> Vec<Detection> {
    detections.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });

    let mut keep: Vec<Detection> = Vec::new();
    for candidate in detections {
        if keep.len() >= max_detections {
            break;
        }
        let suppressed = keep.iter().any(|kept| {
            kept.class_id == candidate.class_id && iou(kept, &candidate) > iou_threshold
        });
        if !suppressed {
            keep.push(candidate);
        }
    }

    keep
}

/// Intersection over union of two corner boxes
pub fn iou(a: &Detection, b: &Detection) -> f32 {
    let x1 = a.x1.max(b.x1);
    let y1 = a.y1.max(b.y1);
    let x2 = a.x2.min(b.x2);
    let y2 = a.y2.min(b.y2);

    let intersection = (x2 - x1).max(0.0) * (y2 - y1).max(0.0);
    let union = a.area() + b.area() - intersection;

    if union > 0.0 {
        intersection / union
    } else {
        0.0
    }
}
