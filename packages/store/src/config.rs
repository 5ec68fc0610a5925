//! # Client configuration: `resource-school.toml`
//!
//! Defines the TOML configuration file read by native builds at startup
//! (filename: [`ClientConfig::filename`] = `"resource-school.toml"`). Web builds
//! use [`ClientConfig::default`], whose base URL can be baked in at compile time
//! through the `RESOURCE_SCHOOL_API_URL` environment variable.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8000"   # backend origin, no trailing slash needed
//! timeout_secs = 10                     # per-request deadline
//!
//! [upload]
//! max_bytes = 10485760                  # client-side size ceiling (10 MiB)
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`ClientConfig`] | Top-level config. Provides builder helpers (`with_base_url`, `with_timeout_secs`, `with_max_upload_bytes`), TOML (de)serialisation, and the canonical filename constant. |
//! | [`ApiConfig`] | Backend origin and request timeout (default **10 seconds**). |
//! | [`UploadConfig`] | Upload size ceiling (default **10 MiB**). |
//!
//! All structs implement `Default`, so a missing or empty config file is
//! equivalent to the default configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Top-level configuration stored in `resource-school.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

/// Backend connection settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Origin of the backend, e.g. `https://api.example.com`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Requests running longer than this are aborted.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Upload validation settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
}

fn default_base_url() -> String {
    option_env!("RESOURCE_SCHOOL_API_URL")
        .unwrap_or(DEFAULT_BASE_URL)
        .to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_bytes() -> u64 {
    10 * 1024 * 1024
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
        }
    }
}

impl ClientConfig {
    /// Builder method to set the backend origin.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    /// Builder method to set the request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.api.timeout_secs = secs;
        self
    }

    /// Builder method to set the upload size ceiling.
    pub fn with_max_upload_bytes(mut self, bytes: u64) -> Self {
        self.upload.max_bytes = bytes;
        self
    }

    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "resource-school.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
