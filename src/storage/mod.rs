// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod artifact_store;

pub use artifact_store::{sanitize_filename, ArtifactStore, StorageError};
