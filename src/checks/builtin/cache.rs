//! Cache collaborator check.

use crate::checks::{Check, CheckContext, CheckResult};
use crate::services::{backend_diagnostic, classify_backend, round_trip, BackendClass};

/// The cache answers, and is durable enough for the deployment.
///
/// Order: classification first, then the round trip, then the warning. A
/// disabled (`dummy` or empty) backend therefore fails as a configuration
/// problem, not as `Unavailable`, even though a no-op cache would also fail
/// the round trip. Any other backend must survive the round trip; a
/// single-process backend then earns a warning.
pub struct CacheBackendCheck;

impl Check for CacheBackendCheck {
    fn name(&self) -> &str {
        "cache-backend"
    }

    fn description(&self) -> &str {
        "The cache answers a round trip and is not disabled"
    }

    fn run(&self, ctx: &CheckContext) -> CheckResult {
        let backend_id = ctx.cache().map(|c| c.backend_id()).unwrap_or_default();

        if classify_backend(backend_id) == BackendClass::Disabled {
            if let Some(diagnostic) = backend_diagnostic(backend_id) {
                diagnostic.into_result()?;
            }
        }
        if let Some(cache) = ctx.cache() {
            round_trip(cache)?;
        }

        Ok(backend_diagnostic(backend_id).into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Snapshot;
    use crate::diagnostic::{DiagnosticKind, Severity};
    use crate::services::{CacheBackend, FileCache, MemoryCache, NullCache};
    use anyhow::Result;
    use tempfile::TempDir;

    struct Echoes(&'static str);

    impl CacheBackend for Echoes {
        fn backend_id(&self) -> &str {
            "redis"
        }
        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Ok(())
        }
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(Some(self.0.to_string()))
        }
    }

    fn run(cache: Box<dyn CacheBackend>) -> CheckResult {
        CacheBackendCheck.run(&CheckContext::new(Snapshot::new()).with_cache(cache))
    }

    #[test]
    fn no_cache_is_disabled() {
        let err = CacheBackendCheck
            .run(&CheckContext::new(Snapshot::new()))
            .unwrap_err();
        assert_eq!(err.kind(), DiagnosticKind::Configuration);
        assert!(err.report().contains("\"locmem\""));
    }

    #[test]
    fn dummy_backend_is_disabled() {
        let err = run(Box::new(NullCache::new())).unwrap_err();
        assert_eq!(err.kind(), DiagnosticKind::Configuration);
    }

    #[test]
    fn locmem_warns() {
        let diagnostics = run(Box::new(MemoryCache::new())).unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
    }

    #[test]
    fn durable_backend_is_silent() {
        let temp = TempDir::new().unwrap();
        assert!(run(Box::new(FileCache::new(temp.path()))).unwrap().is_empty());
    }

    #[test]
    fn wrong_echo_is_unavailable() {
        let err = run(Box::new(Echoes("stale"))).unwrap_err();
        assert_eq!(err.kind(), DiagnosticKind::Unavailable);
    }
}
