// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Class-name tables for the detector

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;

/// Parse the `names` metadata entry written by YOLO ONNX exports
///
/// The value is a dict literal such as `{0: 'cat', 1: "dog"}`.
/// Gaps in the index sequence are filled with `class_<n>`.
pub fn parse_names_metadata(raw: &str) -> Result<Vec<String>> {
    let pattern = Regex::new(r#"(\d+)\s*:\s*['"]([^'"]*)['"]"#)
        .context("Failed to compile names pattern")?;

    let mut names = BTreeMap::new();
    for caps in pattern.captures_iter(raw) {
        let index: usize = caps[1]
            .parse()
            .with_context(|| format!("Invalid class index '{}'", &caps[1]))?;
        names.insert(index, caps[2].to_string());
    }

    let Some(&max_index) = names.keys().next_back() else {
        anyhow::bail!("No class names found in model metadata");
    };

    Ok((0..=max_index)
        .map(|i| {
            names
                .remove(&i)
                .unwrap_or_else(|| format!("class_{}", i))
        })
        .collect())
}

/// Load class names from a text file, one name per line
///
/// Blank lines are skipped and surrounding whitespace trimmed.
pub fn load_labels_file(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read labels file {}", path.display()))?;

    let labels: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    if labels.is_empty() {
        anyhow::bail!("Labels file {} is empty", path.display());
    }

    Ok(labels)
}
