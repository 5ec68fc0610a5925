//! # Session data model
//!
//! Defines the records persisted by a [`crate::SessionStore`]. They are
//! `Serialize + Deserialize` so the same types go over the wire (the login
//! response embeds a [`User`]) and into local storage.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`User`] | The signed-in account as returned by the backend. `id` is the integer primary key, `email` and `full_name` are optional profile fields. |
//! | [`Session`] | The unit written to storage: the bearer token **and** the user it belongs to. A token never exists without its user, and the reverse never happens either. |

use serde::{Deserialize, Serialize};

/// An authenticated account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl User {
    /// Get display name, falling back to the username if no full name is set.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

/// A persisted credential together with its owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token.
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }
}
