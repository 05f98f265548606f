// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the enhance-detect node

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-enhance-detect-2025-10-19";

/// Semantic version number
pub const VERSION_NUMBER: &str = "0.1.0";

/// Major version number
pub const VERSION_MAJOR: u32 = 0;

/// Minor version number
pub const VERSION_MINOR: u32 = 1;

/// Patch version number
pub const VERSION_PATCH: u32 = 0;

/// Build date
pub const BUILD_DATE: &str = "2025-10-19";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "onnx-enhancement",
    "yolo-detection",
    "bounding-box-annotation",
    "multipart-upload",
    "artifact-storage",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Enhance-Detect Node {} ({})", VERSION_NUMBER, BUILD_DATE)
}
