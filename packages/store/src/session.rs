//! # Session store abstraction
//!
//! The [`SessionStore`] trait is the single seam through which the rest of the
//! workspace reads and writes the signed-in session. Backends only implement
//! three primitives over one whole [`Session`] record:
//!
//! | Method | Contract |
//! |--------|----------|
//! | [`SessionStore::load`] | Return the stored record, or `None` if absent or unreadable |
//! | [`SessionStore::write`] | Replace the record in one storage operation |
//! | [`SessionStore::clear`] | Remove the record |
//!
//! Token and user are never stored separately, so [`SessionStore::read_token`]
//! and [`SessionStore::read_user`] cannot disagree with each other.

use crate::models::{Session, User};

/// Errors raised by a session store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("session record could not be encoded: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("session storage unavailable: {0}")]
    Unavailable(String),
}

/// Persistent holder of the authentication token and cached user profile.
pub trait SessionStore {
    /// Read the whole session record.
    fn load(&self) -> Option<Session>;

    /// Replace the stored record with `session`.
    fn write(&self, session: &Session) -> Result<(), StoreError>;

    /// Remove the stored record. Clearing an empty store succeeds.
    fn clear(&self) -> Result<(), StoreError>;

    /// Persist `token` and `user` together.
    fn save(&self, token: &str, user: &User) -> Result<(), StoreError> {
        self.write(&Session::new(token, user.clone()))
    }

    fn read_token(&self) -> Option<String> {
        self.load().map(|session| session.token)
    }

    fn read_user(&self) -> Option<User> {
        self.load().map(|session| session.user)
    }
}

/// Decode a stored record, logging and discarding anything unreadable.
pub(crate) fn decode_record(raw: &str, origin: &str) -> Option<Session> {
    match serde_json::from_str(raw) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::warn!("Ignoring unreadable session record in {}: {}", origin, e);
            None
        }
    }
}
