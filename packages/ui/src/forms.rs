//! Input validation for the login and upload forms.
//!
//! Both run before any request is made, so a rejected form never reaches the
//! network.

use std::sync::Arc;

use api::{validate_upload, UploadFile, ValidationError};
use dioxus::html::FileEngine;

/// Credentials as typed into the login form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the username (trimmed) and password to submit.
    pub fn validate(&self) -> Result<(String, String), ValidationError> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(ValidationError::MissingField("username"));
        }
        // Whitespace may be part of a password
        if self.password.is_empty() {
            return Err(ValidationError::MissingField("password"));
        }
        Ok((username.to_string(), self.password.clone()))
    }
}

/// Base name of a picked file. Desktop file engines report full paths.
pub fn file_display_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Read the first file from a picker event and validate it for upload.
///
/// The size ceiling is checked before the contents are read.
pub async fn read_selected_file(
    files: Arc<dyn FileEngine>,
    max_bytes: u64,
) -> Result<UploadFile, ValidationError> {
    let Some(path) = files.files().into_iter().next() else {
        return Err(ValidationError::MissingField("file"));
    };
    if let Some(size) = files.file_size(&path).await {
        if size > max_bytes {
            return Err(ValidationError::TooLarge {
                size,
                limit: max_bytes,
            });
        }
    }
    let Some(bytes) = files.read_file(&path).await else {
        tracing::warn!("Could not read picked file {}", path);
        return Err(ValidationError::EmptyFile);
    };

    let file = UploadFile::new(file_display_name(&path), None, bytes);
    validate_upload(&file, max_bytes)?;
    Ok(file)
}
