pub mod config;
pub mod models;
pub mod session;

mod memory;
pub use memory::MemorySessionStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileSessionStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorageSessionStore;

pub use config::ClientConfig;
pub use models::{Session, User};
pub use session::{SessionStore, StoreError};
