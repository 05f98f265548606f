// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Enhancement tensor conversion tests

use enhance_detect_node::vision::enhancement::{
    denormalize, postprocess_enhanced, preprocess_for_enhancement, ENHANCER_INPUT_SHAPE,
};
use image::{DynamicImage, GrayAlphaImage, LumaA, Rgb, RgbImage, Rgba, RgbaImage};
use ndarray::Array4;

#[test]
fn test_any_input_becomes_nhwc_256() {
    let inputs = [
        DynamicImage::new_rgb8(1, 1),
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(1024, 77, Rgba([1, 2, 3, 0]))),
        DynamicImage::ImageLumaA8(GrayAlphaImage::from_pixel(300, 500, LumaA([200, 10]))),
    ];
    for img in &inputs {
        let tensor = preprocess_for_enhancement(img);
        assert_eq!(tensor.shape(), &ENHANCER_INPUT_SHAPE);
        assert!(tensor.iter().all(|v| (-1.0..=1.0).contains(v)));
    }
}

#[test]
fn test_alpha_dropped_not_blended() {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(256, 256, Rgba([255, 255, 255, 0])));
    let tensor = preprocess_for_enhancement(&img);
    assert!((tensor[[0, 100, 100, 0]] - 1.0).abs() < 1e-6);
}

#[test]
fn test_denormalize_formula() {
    // (v + 1) / 2 * 255, truncated
    assert_eq!(denormalize(0.0), 127);
    assert_eq!(denormalize(0.5), 191);
    assert_eq!(denormalize(-0.999), 0);
}

#[test]
fn test_out_of_range_output_is_clipped() {
    let mut output = Array4::<f32>::zeros((1, 256, 256, 3));
    output[[0, 0, 0, 0]] = 5.0;
    output[[0, 0, 0, 1]] = -5.0;
    output[[0, 0, 0, 2]] = f32::NAN;

    let img = postprocess_enhanced(&output);
    assert_eq!(img.dimensions(), (256, 256));
    assert_eq!(img.get_pixel(0, 0), &Rgb([255, 0, 0]));
}

#[test]
fn test_identity_enhancer_preserves_solid_color() {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(128, 64, Rgb([0, 255, 0])));
    let out = postprocess_enhanced(&preprocess_for_enhancement(&img));
    assert_eq!(out.get_pixel(200, 200), &Rgb([0, 255, 0]));
}
