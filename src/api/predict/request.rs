// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Multipart upload parsing

use axum_extra::extract::Multipart;
use tracing::debug;

use crate::api::errors::ApiError;
use crate::pipeline::UploadedFile;

/// Name of the multipart field carrying the image
pub const FILE_FIELD: &str = "file";

/// Pull the `file` field out of a multipart body
///
/// Other fields are read and ignored. The first `file` field wins.
pub async fn read_upload(mut multipart: Multipart) -> Result<UploadedFile, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Multipart(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name != FILE_FIELD {
            debug!("Ignoring multipart field '{}'", name);
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::Multipart(e.to_string()))?;

        debug!("Received upload '{}' ({} bytes)", filename, bytes.len());
        return Ok(UploadedFile {
            filename,
            bytes: bytes.to_vec(),
        });
    }

    Err(ApiError::MissingFile(FILE_FIELD))
}
