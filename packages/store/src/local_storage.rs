//! # localStorage session store: browser-side persistence
//!
//! [`LocalStorageSessionStore`] is the [`SessionStore`] implementation used on
//! the **web platform**. The session lives under one fixed key in the
//! browser's per-origin `window.localStorage`, so it survives reloads but is
//! not shared with other origins or browsers.
//!
//! | Key | Value |
//! |-----|-------|
//! | `"resource-school.session"` | JSON-encoded [`Session`] |
//!
//! Older builds kept the token and user under two separate keys (`"token"`,
//! `"user"`). Those are removed on every save and clear so a stale half of a
//! session cannot linger next to the current record.
//!
//! ## Connection management
//!
//! The store is a zero-size handle. It looks up `window.localStorage` on every
//! operation because `web_sys::Storage` cannot be held across threads and the
//! lookup is cheap.

use crate::models::Session;
use crate::session::{decode_record, SessionStore, StoreError};

const SESSION_KEY: &str = "resource-school.session";
const LEGACY_KEYS: [&str; 2] = ["token", "user"];

/// localStorage-backed SessionStore for the web platform.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageSessionStore;

impl LocalStorageSessionStore {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Result<web_sys::Storage, StoreError> {
        let window = web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window object".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StoreError::Unavailable("localStorage disabled".to_string()))
    }

    fn remove_legacy(storage: &web_sys::Storage) {
        for key in LEGACY_KEYS {
            let _ = storage.remove_item(key);
        }
    }
}

impl SessionStore for LocalStorageSessionStore {
    fn load(&self) -> Option<Session> {
        let storage = match self.storage() {
            Ok(storage) => storage,
            Err(e) => {
                tracing::warn!("{}", e);
                return None;
            }
        };
        let raw = storage.get_item(SESSION_KEY).ok().flatten()?;
        decode_record(&raw, "localStorage")
    }

    fn write(&self, session: &Session) -> Result<(), StoreError> {
        let storage = self.storage()?;
        let encoded = serde_json::to_string(session)?;
        // set_item fails when the origin's quota is exhausted
        storage
            .set_item(SESSION_KEY, &encoded)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?;
        Self::remove_legacy(&storage);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let storage = self.storage()?;
        storage
            .remove_item(SESSION_KEY)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?;
        Self::remove_legacy(&storage);
        Ok(())
    }
}
