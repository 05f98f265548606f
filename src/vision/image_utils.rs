// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image loading, saving and format helpers

use std::path::Path;

use image::{DynamicImage, ImageFormat};
use thiserror::Error;

/// Fallback content type for files whose extension is not an image format
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Custom error types for image processing
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Image data is empty")]
    EmptyData,

    #[error("Failed to decode image: {0}")]
    DecodeFailed(String),

    #[error("Failed to open image {path}: {message}")]
    OpenFailed { path: String, message: String },

    #[error("Failed to save image {path}: {message}")]
    SaveFailed { path: String, message: String },
}

/// Image information extracted during loading
#[derive(Debug, Clone)]
pub struct ImageInfo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Detected format
    pub format: ImageFormat,
    /// Size in bytes
    pub size_bytes: usize,
}

/// Decode raw image bytes (for multipart uploads)
///
/// The format is guessed from the content, not from the filename.
///
/// # Returns
/// * `Ok((DynamicImage, ImageInfo))` - The decoded image and metadata
/// * `Err(ImageError)` - If decoding fails
pub fn decode_image_bytes(bytes: &[u8]) -> Result<(DynamicImage, ImageInfo), ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::EmptyData);
    }

    let format = detect_format(bytes)?;

    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| ImageError::DecodeFailed(e.to_string()))?;

    let info = ImageInfo {
        width: img.width(),
        height: img.height(),
        format,
        size_bytes: bytes.len(),
    };

    Ok((img, info))
}

/// Detect image format from magic bytes
pub fn detect_format(bytes: &[u8]) -> Result<ImageFormat, ImageError> {
    image::guess_format(bytes).map_err(|e| ImageError::DecodeFailed(e.to_string()))
}

/// Open an image file from disk
pub fn open_image(path: &Path) -> Result<DynamicImage, ImageError> {
    image::open(path).map_err(|e| ImageError::OpenFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Save an image, choosing the encoder from the file extension
pub fn save_image(image: &DynamicImage, path: &Path) -> Result<(), ImageError> {
    // JPEG has no alpha channel
    let result = match ImageFormat::from_path(path) {
        Ok(ImageFormat::Jpeg) => DynamicImage::ImageRgb8(image.to_rgb8()).save(path),
        _ => image.save(path),
    };
    result.map_err(|e| ImageError::SaveFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Content type of a stored artifact, inferred from its extension
pub fn content_type_for_path(path: &Path) -> &'static str {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or(OCTET_STREAM)
}
