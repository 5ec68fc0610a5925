//! # API crate: session and backend access for Resource School
//!
//! This crate is the layer every page depends on. It owns the HTTP client,
//! the error taxonomy, sign-in state, and the navigation policy for
//! protected views. Persistence is delegated to a [`store::SessionStore`]
//! injected at construction time.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`] and its builder: bearer token injection, deadline, error normalization, auth-lost callback |
//! | [`error`] | [`ApiError`], [`ValidationError`], [`UploadError`] and the per-operation default messages |
//! | [`session`] | [`SessionManager`]: `login`, `logout`, `register`, `refresh_user`, `current_user`, `is_authenticated` |
//! | [`guard`] | [`RouteGuard`] and the [`GuardedRoute`] trait implemented by the app's route table |
//! | [`upload`] | Client-side upload validation and multipart submission |
//! | [`recommendation`] | Recommendation results for a user |
//! | [`resources`] | Resource catalog CRUD |
//!
//! ## Backend endpoints
//!
//! - **Authentication**: `POST /api/auth/login`, `POST /api/auth/register`, `GET /api/auth/me`
//! - **Upload**: `POST /api/upload`
//! - **Recommendations**: `GET /api/recommendation/{user_id}`
//! - **Resources**: `GET|POST /resources`, `GET|PUT|DELETE /resources/{id}`

pub mod client;
mod deadline;
pub mod error;
pub mod guard;
pub mod recommendation;
pub mod resources;
pub mod session;
pub mod upload;

#[cfg(test)]
mod test_support;

pub use client::{ApiClient, ApiClientBuilder, AuthLostHook};
pub use error::{ApiError, Operation, UploadError, ValidationError};
pub use guard::{Access, GuardedRoute, RouteGuard};
pub use recommendation::Recommendation;
pub use resources::{NewResource, Resource};
pub use session::{RegisterRequest, SessionManager};
pub use upload::{validate_upload, UploadAck, UploadFile, JSON_CONTENT_TYPE};

pub use reqwest::Method;
pub use store::{ClientConfig, Session, SessionStore, StoreError, User};
