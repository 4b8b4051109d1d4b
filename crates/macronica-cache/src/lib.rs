//! Type-safe key-value storage for the Macronica cart.
//!
//! A [`KeyValueStore`] moves raw strings; a [`Cache`] layered on top adds
//! JSON serialization. Backends:
//!
//! - [`MemoryStore`]: a `HashMap`, for tests and throwaway sessions
//! - [`FileStore`]: one file per key in a directory
//! - `LocalStorage`: the browser's `window.localStorage`
//!   (`local-storage` feature, `wasm32` only)
//!
//! # Example
//!
//! ```
//! use macronica_cache::{Cache, FileStore};
//! # let tmp = tempfile::tempdir().unwrap();
//!
//! let mut cache = Cache::new(FileStore::open(tmp.path()));
//! cache.set("macronica_cart", &serde_json::json!({ "items": [] })).unwrap();
//!
//! let raw = cache.get_value("macronica_cart").unwrap().unwrap();
//! assert!(raw["items"].is_array());
//! ```

mod error;
mod file;
mod kv;
mod memory;

#[cfg(all(target_arch = "wasm32", feature = "local-storage"))]
mod local;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KeyValueStore};
pub use memory::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "local-storage"))]
pub use local::LocalStorage;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
