//! # Filesystem-backed session store
//!
//! [`FileSessionStore`] is a [`SessionStore`] implementation that keeps the
//! session in a single JSON file. It is used on desktop and mobile platforms
//! to stay signed in across app restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── session.json       # {"token": "...", "user": {...}}
//! └── session.json.tmp   # only present while a write is in flight
//! ```
//!
//! Writes land in the temporary file first and are then renamed over
//! `session.json`, so a reader observes either the previous record or the new
//! one, never a half-written file.
//!
//! ## Platform data directories
//!
//! Use [`dirs::data_dir()`] to obtain a platform-appropriate base:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS / iOS | `~/Library/Application Support/resource-school/` |
//! | Linux | `~/.local/share/resource-school/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\resource-school\` |

use std::io::ErrorKind;
use std::path::PathBuf;

use crate::models::Session;
use crate::session::{decode_record, SessionStore, StoreError};

const SESSION_FILE: &str = "session.json";
const TEMP_SUFFIX: &str = "tmp";

/// Filesystem-backed SessionStore for desktop and mobile persistence.
#[derive(Clone, Debug)]
pub struct FileSessionStore {
    base: PathBuf,
}

impl FileSessionStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn session_path(&self) -> PathBuf {
        self.base.join(SESSION_FILE)
    }

    fn temp_path(&self) -> PathBuf {
        self.session_path().with_extension(format!("json.{TEMP_SUFFIX}"))
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Option<Session> {
        let path = self.session_path();
        match std::fs::read_to_string(&path) {
            Ok(raw) => decode_record(&raw, &path.display().to_string()),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    fn write(&self, session: &Session) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.base)?;
        let encoded = serde_json::to_vec(session)?;
        let temp = self.temp_path();
        std::fs::write(&temp, encoded)?;
        std::fs::rename(&temp, self.session_path())?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(self.session_path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
