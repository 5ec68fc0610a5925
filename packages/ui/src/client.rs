//! Platform wiring for the API client.
//!
//! - **Web** (WASM + `web` feature): session in `localStorage` via
//!   [`store::LocalStorageSessionStore`], configuration baked in at build time
//! - **Desktop / Mobile** (native): session file under
//!   `<data_dir>/resource-school/`, configuration read from
//!   `<config_dir>/resource-school/resource-school.toml` when present

use std::rc::Rc;

use store::{ClientConfig, SessionStore};

#[cfg(not(target_arch = "wasm32"))]
const APP_DIR: &str = "resource-school";

/// Create the platform-appropriate session store.
pub fn make_store() -> Rc<dyn SessionStore> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        Rc::new(store::LocalStorageSessionStore::new())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join(APP_DIR);
        Rc::new(store::FileSessionStore::new(base))
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        Rc::new(store::MemorySessionStore::new())
    }
}

/// Load the client configuration, falling back to defaults.
pub fn load_config() -> ClientConfig {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let Some(dir) = dirs::config_dir() else {
            return ClientConfig::default();
        };
        let path = dir.join(APP_DIR).join(ClientConfig::filename());
        match std::fs::read_to_string(&path) {
            Ok(raw) => match ClientConfig::from_toml(&raw) {
                Ok(config) => {
                    tracing::debug!("Loaded client config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Ignoring invalid config {}: {}", path.display(), e);
                    ClientConfig::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => ClientConfig::default(),
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                ClientConfig::default()
            }
        }
    }
    #[cfg(target_arch = "wasm32")]
    {
        ClientConfig::default()
    }
}

/// Sleep on whichever timer the platform provides.
pub async fn delay(duration: std::time::Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}
