//! # Error taxonomy for client operations
//!
//! | Type | Raised when | Network touched? |
//! |------|-------------|------------------|
//! | [`ValidationError`] | Local input checks fail (missing form field, wrong file type, oversized file) | no |
//! | [`ApiError`] | The backend answered with a failure, could not be reached, or the session could not be persisted | yes |
//! | [`UploadError`] | Either of the above, for [`crate::ApiClient::upload_data`] | maybe |
//!
//! The `Display` output of every variant is a message meant for the user, so
//! pages render errors with `to_string()` directly.

use store::StoreError;

/// Category of a remote call. Carries the fallback message shown when the
/// backend does not provide one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Login,
    Register,
    CurrentUser,
    Upload,
    Recommendations,
    ListResources,
    GetResource,
    CreateResource,
    UpdateResource,
    DeleteResource,
}

impl Operation {
    pub fn default_message(self) -> &'static str {
        match self {
            Operation::Login => "login failed",
            Operation::Register => "registration failed",
            Operation::CurrentUser => "failed to load profile",
            Operation::Upload => "upload failed",
            Operation::Recommendations => "failed to load recommendations",
            Operation::ListResources => "failed to load resources",
            Operation::GetResource => "failed to load resource",
            Operation::CreateResource => "failed to create resource",
            Operation::UpdateResource => "failed to update resource",
            Operation::DeleteResource => "failed to delete resource",
        }
    }

    /// Whether a 401 on this operation means the stored session is no longer
    /// valid. Credential exchanges answer 401 for bad input instead.
    pub fn rejects_session_on_401(self) -> bool {
        !matches!(self, Operation::Login | Operation::Register)
    }
}

/// A failed remote call, normalized to a display message.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend rejected the stored credential. The session has already
    /// been cleared when this is returned.
    #[error("{message}")]
    AuthRejected { message: String },
    /// Any other non-2xx response.
    #[error("{message}")]
    Http { status: u16, message: String },
    /// No response was received (unreachable, reset, or timed out).
    #[error("{message}")]
    Transport { message: String, timed_out: bool },
    /// A 2xx response whose body did not have the expected shape.
    #[error("{message}")]
    InvalidResponse { message: String },
    #[error("could not save session: {0}")]
    Storage(#[from] StoreError),
}

impl ApiError {
    pub fn is_auth_rejected(&self) -> bool {
        matches!(self, ApiError::AuthRejected { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Transport { timed_out: true, .. })
    }

    /// HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::AuthRejected { .. } => Some(401),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Input rejected before any request was made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("please enter your {0}")]
    MissingField(&'static str),
    #[error("please choose a JSON file (got {0})")]
    UnsupportedType(String),
    #[error("the selected file is empty")]
    EmptyFile,
    #[error("file is {size} bytes, the limit is {limit} bytes")]
    TooLarge { size: u64, limit: u64 },
    #[error("the selected file is not valid JSON")]
    MalformedJson,
}

/// Failure of [`crate::ApiClient::upload_data`].
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
}
