// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image preprocessing for the detector

use image::{imageops::FilterType, DynamicImage, GenericImageView, Rgb, RgbImage};
use ndarray::Array4;

/// Padding color used by YOLO letterboxing
pub const LETTERBOX_FILL: Rgb<u8> = Rgb([114, 114, 114]);

/// How an image was placed into the square detector canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterboxInfo {
    /// Scale factor applied to the original image
    pub scale: f32,
    /// Horizontal padding before the image
    pub pad_x: u32,
    /// Vertical padding before the image
    pub pad_y: u32,
    pub original_width: u32,
    pub original_height: u32,
}

impl LetterboxInfo {
    /// Map a canvas point back into original image coordinates, clipped to
    /// the image bounds
    pub fn map_to_original(&self, x: f32, y: f32) -> (f32, f32) {
        if self.scale <= 0.0 {
            return (0.0, 0.0);
        }
        let ox = (x - self.pad_x as f32) / self.scale;
        let oy = (y - self.pad_y as f32) / self.scale;
        (
            ox.clamp(0.0, self.original_width as f32),
            oy.clamp(0.0, self.original_height as f32),
        )
    }
}

/// Resize keeping aspect ratio and center it on a gray `size x size` canvas
pub fn letterbox(image: &DynamicImage, size: u32) -> (RgbImage, LetterboxInfo) {
    let (orig_w, orig_h) = image.dimensions();
    let mut canvas = RgbImage::from_pixel(size, size, LETTERBOX_FILL);

    if orig_w == 0 || orig_h == 0 {
        let info = LetterboxInfo {
            scale: 0.0,
            pad_x: 0,
            pad_y: 0,
            original_width: orig_w,
            original_height: orig_h,
        };
        return (canvas, info);
    }

    let scale = (size as f32 / orig_w as f32).min(size as f32 / orig_h as f32);
    let new_w = ((orig_w as f32 * scale).round() as u32).clamp(1, size);
    let new_h = ((orig_h as f32 * scale).round() as u32).clamp(1, size);

    let resized = image::imageops::resize(&image.to_rgb8(), new_w, new_h, FilterType::Triangle);

    let pad_x = (size - new_w) / 2;
    let pad_y = (size - new_h) / 2;
    image::imageops::replace(&mut canvas, &resized, pad_x as i64, pad_y as i64);

    let info = LetterboxInfo {
        scale,
        pad_x,
        pad_y,
        original_width: orig_w,
        original_height: orig_h,
    };
    (canvas, info)
}

/// Letterbox and pack as NCHW tensor `[1, 3, size, size]` with values in [0, 1]
pub fn preprocess_for_detection(image: &DynamicImage, size: u32) -> (Array4<f32>, LetterboxInfo) {
    let (canvas, info) = letterbox(image, size);
    let s = size as usize;
    let mut tensor = Array4::zeros((1, 3, s, s));

    for (x, y, pixel) in canvas.enumerate_pixels() {
        for c in 0..3 {
            tensor[[0, c, y as usize, x as usize]] = pixel[c] as f32 / 255.0;
        }
    }

    (tensor, info)
}
