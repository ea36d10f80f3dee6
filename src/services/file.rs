//! Filesystem cache backend.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use super::CacheBackend;

/// One file per key under a root directory (`file`).
#[derive(Debug, Clone)]
pub struct FileCache {
    root: PathBuf,
}

impl FileCache {
    /// Create a cache rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`.
    pub fn entry_path(&self, key: &str) -> PathBuf {
        let hash = Sha256::digest(key.as_bytes());
        self.root.join(hex::encode(&hash[..16]))
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create cache directory {:?}", self.root))
    }
}

impl CacheBackend for FileCache {
    fn backend_id(&self) -> &str {
        "file"
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir()?;
        let path = self.entry_path(key);
        fs::write(&path, value).with_context(|| format!("Failed to write cache entry {:?}", path))
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cache entry {:?}", path))?;
        Ok(Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn round_trips_through_disk() {
        let temp = TempDir::new().unwrap();
        let cache = FileCache::new(temp.path().join("cache"));

        cache.set("greeting", "hello").unwrap();
        assert_eq!(cache.get("greeting").unwrap(), Some("hello".to_string()));
        assert!(cache.entry_path("greeting").exists());
    }

    #[test]
    fn missing_key_is_none() {
        let temp = TempDir::new().unwrap();
        let cache = FileCache::new(temp.path());
        assert_eq!(cache.get("nope").unwrap(), None);
    }

    #[test]
    fn entry_names_are_hashed() {
        let cache = FileCache::new("/tmp/cache");
        let path = cache.entry_path("a/b");
        let name = path.file_name().unwrap().to_str().unwrap();
        assert_eq!(name.len(), 32);
        assert!(name.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(cache.entry_path("a"), cache.entry_path("b"));
    }

    #[test]
    fn unwritable_root_is_an_error() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let cache = FileCache::new(blocker.join("cache"));
        assert!(cache.set("k", "v").is_err());
    }
}
