//! External collaborators the checks talk to.
//!
//! The engine never links a concrete cache or database client. It sees a
//! [`CacheBackend`] that can store and return strings, and any number of
//! [`Connection`] handles that must be closed when the run ends. Both live
//! in a [`ConnectionPool`] owned by the check context.
//!
//! # Modules
//!
//! - [`memory`] - In-process backends (`locmem`, `dummy`)
//! - [`file`] - Filesystem backend (`file`)
//! - [`probe`] - Round-trip probe and backend classification
//! - [`pool`] - Handle ownership and release

pub mod file;
pub mod memory;
pub mod pool;
pub mod probe;

pub use file::FileCache;
pub use memory::{MemoryCache, NullCache};
pub use pool::ConnectionPool;
pub use probe::{
    backend_diagnostic, classify_backend, round_trip, BackendClass, PROBE_KEY,
    UNAVAILABLE_MESSAGE,
};

use std::path::Path;

use anyhow::{bail, Result};

use crate::config::CacheConfig;

/// A handle to an external service that must be released at shutdown.
pub trait Connection {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Release the handle.
    fn close(&self) -> Result<()>;
}

/// A key/value cache collaborator.
pub trait CacheBackend {
    /// The configured backend identifier (`locmem`, `file`, ...).
    fn backend_id(&self) -> &str;

    /// Store `value` under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Fetch the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Release any held resources. Most backends hold none.
    fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// Build the cache backend named in the config.
///
/// An empty backend id yields a [`NullCache`] that reports the empty id, so
/// the classification check can reject it with a proper diagnostic. Only
/// the built-in backends are known here; networked caches are implemented
/// by the host and passed to `CheckContext::with_cache`.
pub fn backend_from_config(config: &CacheConfig, base_dir: &Path) -> Result<Box<dyn CacheBackend>> {
    let id = config.backend.trim();
    let backend: Box<dyn CacheBackend> = match id {
        "locmem" => Box::new(MemoryCache::new()),
        "" | "dummy" => Box::new(NullCache::with_id(id)),
        "file" => {
            let Some(location) = &config.location else {
                bail!("cache backend 'file' needs a 'location'");
            };
            let location = if location.is_absolute() {
                location.clone()
            } else {
                base_dir.join(location)
            };
            Box::new(FileCache::new(location))
        }
        other => bail!(
            "unknown cache backend '{}' (expected locmem, dummy or file; \
             other backends are installed with CheckContext::with_cache)",
            other
        ),
    };
    tracing::debug!("Using cache backend '{}'", backend.backend_id());
    Ok(backend)
}
