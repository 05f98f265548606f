// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared ONNX Runtime session setup for the vision models

use std::path::Path;

use anyhow::{Context, Result};
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;

/// Build a CPU-only ONNX Runtime session for `model_path`
///
/// # Errors
/// Returns error if:
/// - Model file not found
/// - ONNX Runtime initialization fails
/// - The file is not a loadable ONNX graph
pub fn build_cpu_session(model_path: &Path, intra_threads: usize) -> Result<Session> {
    if !model_path.exists() {
        anyhow::bail!("ONNX model file not found: {}", model_path.display());
    }

    Session::builder()
        .context("Failed to create session builder")?
        .with_execution_providers([CPUExecutionProvider::default().build()])
        .context("Failed to set CPU execution provider")?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .context("Failed to set optimization level")?
        .with_intra_threads(intra_threads)
        .context("Failed to set intra threads")?
        .commit_from_file(model_path)
        .context(format!(
            "Failed to load ONNX model from {}",
            model_path.display()
        ))
}

/// Name of the first graph input, or `fallback` if the graph declares none
pub fn first_input_name(session: &Session, fallback: &str) -> String {
    session
        .inputs
        .first()
        .map(|input| input.name.clone())
        .unwrap_or_else(|| fallback.to_string())
}
