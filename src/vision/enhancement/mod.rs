// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image enhancement
//!
//! A generator network that takes a 256x256 RGB image normalized to [-1, 1]
//! and returns an enhanced image of the same size.

pub mod model;
pub mod preprocessing;

pub use model::{EnhancerModel, ImageEnhancer};
pub use preprocessing::{
    denormalize, normalize, postprocess_enhanced, preprocess_for_enhancement, ENHANCER_CHANNELS,
    ENHANCER_INPUT_SHAPE, ENHANCER_INPUT_SIZE,
};
