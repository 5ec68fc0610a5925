//! # Application data upload
//!
//! The upload page sends one JSON document per submission as a multipart form
//! with a single part named `file`. Before anything leaves the client,
//! [`validate_upload`] checks that:
//!
//! - the content type is `application/json` (inferred from a `.json`
//!   extension when the platform reports none),
//! - the file is non-empty and no larger than the configured ceiling
//!   (10 MiB by default),
//! - the bytes actually parse as JSON.
//!
//! A failed check is a [`ValidationError`] and no request is made.
//!
//! The acknowledgement has no fixed schema yet, so [`UploadAck`] keeps the raw
//! JSON and offers accessors for the fields current backends send.

use reqwest::multipart::{Form, Part};
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::{Operation, UploadError, ValidationError};

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A local file picked for upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    /// MIME type reported by the platform, if any.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type,
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// The reported content type, or one inferred from the file extension.
    pub fn effective_content_type(&self) -> Option<String> {
        match self.content_type.as_deref().map(str::trim) {
            Some(reported) if !reported.is_empty() => Some(reported.to_ascii_lowercase()),
            _ => self
                .name
                .rsplit_once('.')
                .filter(|(_, ext)| ext.eq_ignore_ascii_case("json"))
                .map(|_| JSON_CONTENT_TYPE.to_string()),
        }
    }
}

/// Check `file` against the client-side upload rules.
pub fn validate_upload(file: &UploadFile, max_bytes: u64) -> Result<(), ValidationError> {
    let content_type = file.effective_content_type();
    // Ignore parameters such as `; charset=utf-8`
    let essence = content_type
        .as_deref()
        .and_then(|ct| ct.split(';').next())
        .map(str::trim);
    if essence != Some(JSON_CONTENT_TYPE) {
        return Err(ValidationError::UnsupportedType(
            content_type.unwrap_or_else(|| "unknown type".to_string()),
        ));
    }
    if file.bytes.is_empty() {
        return Err(ValidationError::EmptyFile);
    }
    if file.size() > max_bytes {
        return Err(ValidationError::TooLarge {
            size: file.size(),
            limit: max_bytes,
        });
    }
    if serde_json::from_slice::<serde::de::IgnoredAny>(&file.bytes).is_err() {
        return Err(ValidationError::MalformedJson);
    }
    Ok(())
}

/// Backend acknowledgement of an upload.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadAck(pub Value);

impl UploadAck {
    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(Value::as_str)
    }

    pub fn upload_id(&self) -> Option<i64> {
        self.0.get("upload_id").and_then(Value::as_i64)
    }

    pub fn status(&self) -> Option<&str> {
        self.0.get("status").and_then(Value::as_str)
    }
}

impl ApiClient {
    /// Validate `file` locally, then POST it to `/api/upload`.
    pub async fn upload_data(&self, file: UploadFile) -> Result<UploadAck, UploadError> {
        validate_upload(&file, self.max_upload_bytes())?;

        let part = Part::bytes(file.bytes)
            .file_name(file.name.clone())
            .mime_str(JSON_CONTENT_TYPE)
            .map_err(|e| {
                tracing::warn!("Failed to build multipart body: {}", e);
                ValidationError::UnsupportedType(JSON_CONTENT_TYPE.to_string())
            })?;
        let form = Form::new().part("file", part);

        tracing::debug!("Uploading {}", file.name);
        let value = self.send_multipart(Operation::Upload, "/api/upload", form).await?;
        Ok(UploadAck(value))
    }
}
