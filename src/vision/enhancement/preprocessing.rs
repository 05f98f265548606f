// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tensor conversion for the enhancement generator
//!
//! The generator works on NHWC tensors with values in [-1, 1]:
//! `v / 127.5 - 1.0` on the way in, `(v + 1) / 2 * 255` on the way out.

use image::{imageops::FilterType, DynamicImage, Rgb, RgbImage};
use ndarray::Array4;

/// Square input resolution of the enhancement generator
pub const ENHANCER_INPUT_SIZE: u32 = 256;

/// Number of color channels fed to the generator
pub const ENHANCER_CHANNELS: usize = 3;

/// Expected tensor shape `[batch, height, width, channels]`
pub const ENHANCER_INPUT_SHAPE: [usize; 4] = [
    1,
    ENHANCER_INPUT_SIZE as usize,
    ENHANCER_INPUT_SIZE as usize,
    ENHANCER_CHANNELS,
];

/// Preprocess an image for the enhancement generator
///
/// Steps:
/// 1. Convert to RGB
/// 2. Resize to 256x256, ignoring aspect ratio
/// 3. Scale pixels from [0, 255] to [-1, 1]
/// 4. Pack as NHWC tensor `[1, 256, 256, 3]`
pub fn preprocess_for_enhancement(image: &DynamicImage) -> Array4<f32> {
    let rgb = image.to_rgb8();
    let resized = image::imageops::resize(
        &rgb,
        ENHANCER_INPUT_SIZE,
        ENHANCER_INPUT_SIZE,
        FilterType::CatmullRom,
    );

    let size = ENHANCER_INPUT_SIZE as usize;
    let mut tensor = Array4::zeros((1, size, size, ENHANCER_CHANNELS));

    for (x, y, pixel) in resized.enumerate_pixels() {
        for c in 0..ENHANCER_CHANNELS {
            tensor[[0, y as usize, x as usize, c]] = normalize(pixel[c]);
        }
    }

    tensor
}

/// Convert generator output back into an 8-bit RGB image
///
/// Takes the first batch element, maps [-1, 1] back to [0, 255], clips and
/// truncates. The image takes the spatial size of the tensor.
pub fn postprocess_enhanced(output: &Array4<f32>) -> RgbImage {
    let (_, height, width, channels) = output.dim();

    RgbImage::from_fn(width as u32, height as u32, |x, y| {
        let mut pixel = [0u8; 3];
        for (c, value) in pixel.iter_mut().enumerate().take(channels) {
            *value = denormalize(output[[0, y as usize, x as usize, c]]);
        }
        Rgb(pixel)
    })
}

/// `[0, 255] -> [-1, 1]`
#[inline]
pub fn normalize(value: u8) -> f32 {
    value as f32 / 127.5 - 1.0
}

/// `[-1, 1] -> [0, 255]`, clipped and truncated
#[inline]
pub fn denormalize(value: f32) -> u8 {
    let scaled = (value + 1.0) / 2.0 * 255.0;
    if scaled.is_nan() {
        return 0;
    }
    scaled.clamp(0.0, 255.0) as u8
}
