// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Bounding-box annotation
//!
//! Draws one rectangle outline and one text label per detection onto a copy
//! of the image. Labels are placed above the box's top-left corner with no
//! collision avoidance.

pub mod font;

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use thiserror::Error;

use crate::vision::detection::Detection;

/// Default outline color
pub const BOX_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Default label color
pub const TEXT_COLOR: Rgb<u8> = Rgb([255, 255, 0]);

/// Default outline thickness in pixels
pub const BOX_WIDTH: u32 = 3;

/// Default distance from the box's top edge to the label's top edge
pub const LABEL_OFFSET: i32 = 10;

#[derive(Debug, Error)]
pub enum AnnotateError {
    #[error("Malformed box coordinates: ({x1}, {y1}, {x2}, {y2})")]
    MalformedBox { x1: f32, y1: f32, x2: f32, y2: f32 },
}

/// A detection paired with the text drawn next to it
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub detection: Detection,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotationStyle {
    pub box_color: Rgb<u8>,
    pub box_width: u32,
    pub text_color: Rgb<u8>,
    pub label_offset: i32,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            box_color: BOX_COLOR,
            box_width: BOX_WIDTH,
            text_color: TEXT_COLOR,
            label_offset: LABEL_OFFSET,
        }
    }
}

/// `"<class name> <confidence to 2 decimals>"`
pub fn format_label(class_name: &str, confidence: f32) -> String {
    format!("{} {:.2}", class_name, confidence)
}

/// Draw every annotation onto a copy of `image`
///
/// Boxes are drawn in order, so later boxes paint over earlier ones where
/// they overlap.
pub fn draw_annotations(
    image: &RgbImage,
    annotations: &[Annotation],
    style: &AnnotationStyle,
) -> Result<RgbImage, AnnotateError> {
    let mut canvas = image.clone();

    for annotation in annotations {
        let det = &annotation.detection;
        let (x1, y1, x2, y2) = box_corners(det)?;

        draw_box(&mut canvas, x1, y1, x2, y2, style);
        font::draw_text(
            &mut canvas,
            x1,
            y1 - style.label_offset,
            &annotation.label,
            style.text_color,
        );
    }

    Ok(canvas)
}

/// Integer corners of a detection, rejecting non-finite or inverted boxes
fn box_corners(det: &Detection) -> Result<(i32, i32, i32, i32), AnnotateError> {
    let coords = [det.x1, det.y1, det.x2, det.y2];
    if coords.iter().any(|v| !v.is_finite()) || det.x2 < det.x1 || det.y2 < det.y1 {
        return Err(AnnotateError::MalformedBox {
            x1: det.x1,
            y1: det.y1,
            x2: det.x2,
            y2: det.y2,
        });
    }

    Ok((
        det.x1.round() as i32,
        det.y1.round() as i32,
        det.x2.round() as i32,
        det.y2.round() as i32,
    ))
}

/// Outline with corners inclusive, extra strokes stepping inward
fn draw_box(canvas: &mut RgbImage, x1: i32, y1: i32, x2: i32, y2: i32, style: &AnnotationStyle) {
    for i in 0..style.box_width as i32 {
        let w = x2 - x1 + 1 - 2 * i;
        let h = y2 - y1 + 1 - 2 * i;
        if w <= 0 || h <= 0 {
            break;
        }
        let rect = Rect::at(x1 + i, y1 + i).of_size(w as u32, h as u32);
        draw_hollow_rect_mut(canvas, rect, style.box_color);
    }
}
