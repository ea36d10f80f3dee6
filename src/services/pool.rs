//! Ownership of collaborator handles.

use super::{CacheBackend, Connection};

/// Holds the cache and any other open handles until the run ends.
///
/// [`release_all`](ConnectionPool::release_all) closes everything exactly
/// once. A handle that fails to close is logged and the rest are still
/// closed.
#[derive(Default)]
pub struct ConnectionPool {
    cache: Option<Box<dyn CacheBackend>>,
    connections: Vec<Box<dyn Connection>>,
    released: bool,
}

impl ConnectionPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pool holding `cache`.
    pub fn with_cache(cache: Box<dyn CacheBackend>) -> Self {
        Self {
            cache: Some(cache),
            ..Self::default()
        }
    }

    /// The cache collaborator, if one was configured.
    pub fn cache(&self) -> Option<&dyn CacheBackend> {
        self.cache.as_deref()
    }

    /// Hand another handle (a database connection, say) to the pool.
    pub fn register(&mut self, connection: Box<dyn Connection>) {
        self.connections.push(connection);
    }

    /// Number of held handles, the cache included.
    pub fn len(&self) -> usize {
        self.connections.len() + usize::from(self.cache.is_some())
    }

    /// Whether the pool holds nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether [`release_all`](Self::release_all) has run.
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Close every handle. Returns how many closed cleanly.
    ///
    /// Calling this again is a no-op.
    pub fn release_all(&mut self) -> usize {
        if self.released {
            return 0;
        }
        self.released = true;

        let mut closed = 0;
        for connection in self.connections.drain(..) {
            match connection.close() {
                Ok(()) => closed += 1,
                Err(e) => tracing::warn!("Failed to close {}: {:#}", connection.name(), e),
            }
        }
        if let Some(cache) = self.cache.take() {
            match cache.close() {
                Ok(()) => closed += 1,
                Err(e) => tracing::warn!("Failed to close cache {}: {:#}", cache.backend_id(), e),
            }
        }
        tracing::debug!("Released {} connection(s)", closed);
        closed
    }
}

impl std::fmt::Debug for ConnectionPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionPool")
            .field("cache", &self.cache.as_ref().map(|c| c.backend_id().to_string()))
            .field(
                "connections",
                &self.connections.iter().map(|c| c.name().to_string()).collect::<Vec<_>>(),
            )
            .field("released", &self.released)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MemoryCache;
    use anyhow::{anyhow, Result};
    use std::cell::Cell;
    use std::rc::Rc;

    struct Tracked {
        name: &'static str,
        closes: Rc<Cell<usize>>,
        fail: bool,
    }

    impl Connection for Tracked {
        fn name(&self) -> &str {
            self.name
        }

        fn close(&self) -> Result<()> {
            self.closes.set(self.closes.get() + 1);
            if self.fail {
                Err(anyhow!("socket already gone"))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn releases_everything_once() {
        let closes = Rc::new(Cell::new(0));
        let mut pool = ConnectionPool::with_cache(Box::new(MemoryCache::new()));
        pool.register(Box::new(Tracked {
            name: "database",
            closes: closes.clone(),
            fail: false,
        }));
        assert_eq!(pool.len(), 2);

        assert_eq!(pool.release_all(), 2);
        assert!(pool.is_released());
        assert!(pool.cache().is_none());
        assert_eq!(pool.release_all(), 0);
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn failing_close_does_not_stop_release() {
        let closes = Rc::new(Cell::new(0));
        let mut pool = ConnectionPool::new();
        pool.register(Box::new(Tracked {
            name: "broken",
            closes: closes.clone(),
            fail: true,
        }));
        pool.register(Box::new(Tracked {
            name: "database",
            closes: closes.clone(),
            fail: false,
        }));

        assert_eq!(pool.release_all(), 1);
        assert_eq!(closes.get(), 2);
    }

    #[test]
    fn empty_pool() {
        let mut pool = ConnectionPool::new();
        assert!(pool.is_empty());
        assert_eq!(pool.release_all(), 0);
    }
}
