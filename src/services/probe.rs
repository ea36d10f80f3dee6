//! Cache probes.
//!
//! [`round_trip`] writes a uniquely tagged value and reads it back.
//! [`classify_backend`] judges the configured backend id on its own.

use chrono::Utc;

use super::CacheBackend;
use crate::diagnostic::{Diagnostic, DiagnosticError, DiagnosticKind};

/// Key written by the round-trip probe.
pub const PROBE_KEY: &str = "preflight-cache-test";

/// First line of the unavailability report.
pub const UNAVAILABLE_MESSAGE: &str = "Cache server is unavailable.";

const UNAVAILABLE_HINT: &str = "Check your cache settings and make sure that \
the cache backend is working properly.";

const DISABLED_MESSAGE: &str = "Please enable at least a \"locmem\" cache (for a single process server).\n\
If you need to run > 1 server process, set up some production caching system,\n\
such as redis or memcached";

const SINGLE_PROCESS_MESSAGE: &str = "You are using a 'locmem' (local memory) caching backend,\n\
which is OK for a low volume site running on a single-process server.\n\
For a multi-process configuration it is necessary to have a production\n\
cache system, such as redis or memcached.\n\n\
With local memory caching and multi-process setup you might intermittently\n\
see outdated content on your site.";

/// Write a tagged value, read it back, compare.
///
/// A mismatch, a missing value and a backend error all mean the same thing
/// to the operator: the cache is unavailable.
pub fn round_trip(cache: &dyn CacheBackend) -> Result<(), DiagnosticError> {
    let value = format!("test value {}", Utc::now().to_rfc3339());

    let echoed = cache
        .set(PROBE_KEY, &value)
        .and_then(|()| cache.get(PROBE_KEY));

    match echoed {
        Ok(Some(echo)) if echo == value => {
            tracing::debug!("Cache '{}' answered the round trip", cache.backend_id());
            Ok(())
        }
        Ok(echo) => {
            tracing::debug!(
                backend = cache.backend_id(),
                expected = %value,
                found = ?echo,
                "Cache round trip mismatch"
            );
            Err(unavailable())
        }
        Err(e) => {
            tracing::debug!(backend = cache.backend_id(), "Cache round trip failed: {:#}", e);
            Err(unavailable())
        }
    }
}

fn unavailable() -> DiagnosticError {
    DiagnosticError::new(
        DiagnosticKind::Unavailable,
        format!("{}\n{}", UNAVAILABLE_MESSAGE, UNAVAILABLE_HINT),
    )
}

/// How durable a cache backend is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendClass {
    /// No backend or a no-op one; nothing is cached.
    Disabled,
    /// Per-process memory; inconsistent across workers.
    SingleProcess,
    /// Shared between processes.
    Durable,
}

/// Classify a backend identifier.
pub fn classify_backend(backend_id: &str) -> BackendClass {
    let id = backend_id.trim();
    if id.is_empty() || id.contains("dummy") {
        BackendClass::Disabled
    } else if id.contains("locmem") {
        BackendClass::SingleProcess
    } else {
        BackendClass::Durable
    }
}

/// The diagnostic for a backend id, if it warrants one.
pub fn backend_diagnostic(backend_id: &str) -> Option<Diagnostic> {
    match classify_backend(backend_id) {
        BackendClass::Disabled => Some(Diagnostic::configuration(vec![DISABLED_MESSAGE.into()])),
        BackendClass::SingleProcess => Some(Diagnostic::warning(vec![SINGLE_PROCESS_MESSAGE.into()])),
        BackendClass::Durable => None,
    }
}
