//! In-process cache backends.

use std::cell::RefCell;
use std::collections::HashMap;

use anyhow::Result;

use super::CacheBackend;

/// Process-local memory cache (`locmem`).
///
/// Works for a single process; every worker in a multi-process deployment
/// gets its own copy.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether the cache holds nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl CacheBackend for MemoryCache {
    fn backend_id(&self) -> &str {
        "locmem"
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn close(&self) -> Result<()> {
        self.entries.borrow_mut().clear();
        Ok(())
    }
}

/// A cache that accepts writes and forgets them (`dummy`).
#[derive(Debug, Clone)]
pub struct NullCache {
    id: String,
}

impl NullCache {
    /// A `dummy` backend.
    pub fn new() -> Self {
        Self::with_id("dummy")
    }

    /// A no-op backend reporting a custom id.
    pub fn with_id(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheBackend for NullCache {
    fn backend_id(&self) -> &str {
        &self.id
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Ok(())
    }

    fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }
}
