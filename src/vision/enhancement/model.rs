// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ONNX wrapper around the image-enhancement generator

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use ndarray::{Array4, Ix4};
use ort::session::Session;
use ort::value::Value;
use tracing::{debug, info};

use super::preprocessing::ENHANCER_INPUT_SHAPE;
use crate::vision::session::{build_cpu_session, first_input_name};

/// Anything that maps a normalized `[1, 256, 256, 3]` batch to an enhanced
/// batch of the same shape.
pub trait ImageEnhancer: Send + Sync {
    fn enhance(&self, batch: &Array4<f32>) -> Result<Array4<f32>>;
}

/// Enhancement generator exported to ONNX
///
/// Loaded once at startup and shared by every request. Runs on CPU.
#[derive(Clone)]
pub struct EnhancerModel {
    /// ONNX Runtime session (thread-safe)
    session: Arc<Mutex<Session>>,
    /// Model input name
    input_name: String,
}

impl std::fmt::Debug for EnhancerModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnhancerModel")
            .field("input_name", &self.input_name)
            .finish_non_exhaustive()
    }
}

impl EnhancerModel {
    /// Load the enhancement generator from an ONNX file
    pub fn new<P: AsRef<Path>>(model_path: P, intra_threads: usize) -> Result<Self> {
        let model_path = model_path.as_ref();
        info!("Loading enhancement model from {}", model_path.display());

        let session = build_cpu_session(model_path, intra_threads)?;
        let input_name = first_input_name(&session, "input_1");

        if let Some(input) = session.inputs.first() {
            debug!("Enhancement model input type: {:?}", input.input_type);
        }

        info!("✅ Enhancement model loaded (input: {})", input_name);

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            input_name,
        })
    }
}

impl ImageEnhancer for EnhancerModel {
    fn enhance(&self, batch: &Array4<f32>) -> Result<Array4<f32>> {
        let shape = batch.shape();
        if shape != ENHANCER_INPUT_SHAPE {
            anyhow::bail!(
                "Invalid enhancer input shape: {:?}, expected {:?}",
                shape,
                ENHANCER_INPUT_SHAPE
            );
        }

        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow!("Enhancement session lock poisoned"))?;

        let input_value =
            Value::from_array(batch.to_owned()).context("Failed to create input tensor")?;

        let outputs = session
            .run(ort::inputs![&self.input_name => input_value])
            .context("Enhancement inference failed")?;

        let output = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract enhancement output")?
            .to_owned()
            .into_dimensionality::<Ix4>()
            .context("Enhancement output is not a 4-D tensor")?;

        if output.shape() != ENHANCER_INPUT_SHAPE {
            anyhow::bail!(
                "Unexpected enhancer output shape: {:?}, expected {:?}",
                output.shape(),
                ENHANCER_INPUT_SHAPE
            );
        }

        debug!("Enhancement output shape: {:?}", output.shape());
        Ok(output)
    }
}
