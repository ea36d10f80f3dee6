//! Top-level self-test driver.
//!
//! The driver honours the administrative switch, runs the registry, prints
//! a fatal report, and always releases the context's connections. Release
//! happens on every path: switched off, completed, aborted, and unwinding.
//!
//! # Example
//!
//! ```
//! use preflight::checks::{CheckContext, CheckRegistry};
//! use preflight::config::Snapshot;
//! use preflight::driver::{Driver, RunOutcome};
//!
//! let mut ctx = CheckContext::new(Snapshot::new());
//! let mut out = Vec::new();
//! let outcome = Driver::new(false).run(&CheckRegistry::with_builtins(), &mut ctx, &mut out);
//! assert!(matches!(outcome, RunOutcome::Skipped));
//! assert!(ctx.connections.is_released());
//! ```

use std::io::Write;

use crate::checks::{CheckContext, CheckRegistry, CheckRunner, RunReport};
use crate::diagnostic::{stdin_is_interactive, DiagnosticError};
use crate::error::PreflightError;

/// Exit status of an aborted run.
pub const ABORT_EXIT_CODE: u8 = 1;

/// How a driver run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// The self-test is switched off; no check ran.
    Skipped,
    /// Every check ran.
    Completed(RunReport),
    /// A check reported a fatal problem.
    Aborted(DiagnosticError),
}

impl RunOutcome {
    /// Process exit status for this outcome.
    pub fn exit_code(&self) -> u8 {
        match self {
            RunOutcome::Aborted(_) => ABORT_EXIT_CODE,
            RunOutcome::Skipped | RunOutcome::Completed(_) => 0,
        }
    }

    /// Whether the host may start.
    pub fn is_success(&self) -> bool {
        !matches!(self, RunOutcome::Aborted(_))
    }

    /// Convert into a crate [`Result`](crate::Result) for hosts that
    /// propagate with `?`. A skipped run yields `Ok(None)`.
    pub fn into_result(self) -> crate::Result<Option<RunReport>> {
        match self {
            RunOutcome::Skipped => Ok(None),
            RunOutcome::Completed(report) => Ok(Some(report)),
            RunOutcome::Aborted(error) => Err(PreflightError::Fatal(error)),
        }
    }
}

/// Releases the context's connections when dropped.
struct ReleaseGuard<'a> {
    ctx: &'a mut CheckContext,
}

impl Drop for ReleaseGuard<'_> {
    fn drop(&mut self) {
        self.ctx.connections.release_all();
    }
}

/// Runs the self-test once.
#[derive(Debug, Clone)]
pub struct Driver {
    self_test: bool,
    interactive: bool,
}

impl Driver {
    /// Create a driver. `self_test = false` skips the checks.
    pub fn new(self_test: bool) -> Self {
        Self {
            self_test,
            interactive: stdin_is_interactive(),
        }
    }

    /// Override terminal detection for the interactive trailer.
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Run the registry against `ctx`, writing a fatal report to `out`.
    pub fn run(
        &self,
        registry: &CheckRegistry,
        ctx: &mut CheckContext,
        out: &mut dyn Write,
    ) -> RunOutcome {
        let guard = ReleaseGuard { ctx };

        if !self.self_test {
            tracing::debug!("Self-test disabled, skipping {} check(s)", registry.len());
            return RunOutcome::Skipped;
        }

        match CheckRunner::new().run(registry, &*guard.ctx) {
            Ok(report) => RunOutcome::Completed(report),
            Err(error) => {
                tracing::debug!(
                    check = error.check().unwrap_or("unknown"),
                    kind = %error.kind(),
                    "Self-test aborted"
                );
                if let Err(e) = writeln!(out, "{}", error.render(self.interactive)) {
                    tracing::debug!("Failed to write report: {}", e);
                }
                RunOutcome::Aborted(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{Check, CheckResult};
    use crate::config::Snapshot;
    use crate::diagnostic::{Diagnostic, INTERACTIVE_TRAILER};
    use crate::services::{CacheBackend, Connection, MemoryCache};
    use anyhow::Result;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Counted(Rc<Cell<usize>>);

    impl Connection for Counted {
        fn name(&self) -> &str {
            "database"
        }
        fn close(&self) -> Result<()> {
            self.0.set(self.0.get() + 1);
            Ok(())
        }
    }

    struct Fails;

    impl Check for Fails {
        fn name(&self) -> &str {
            "fails"
        }
        fn description(&self) -> &str {
            "always fails"
        }
        fn run(&self, _ctx: &CheckContext) -> CheckResult {
            Diagnostic::configuration(vec!["MEDIA_URL is wrong".into()]).into_result()?;
            Ok(Vec::new())
        }
    }

    struct Passes;

    impl Check for Passes {
        fn name(&self) -> &str {
            "passes"
        }
        fn description(&self) -> &str {
            "always passes"
        }
        fn run(&self, _ctx: &CheckContext) -> CheckResult {
            Ok(Vec::new())
        }
    }

    fn ctx(closes: &Rc<Cell<usize>>) -> CheckContext {
        let mut ctx = CheckContext::new(Snapshot::new()).with_cache(Box::new(MemoryCache::new()));
        ctx.connections.register(Box::new(Counted(closes.clone())));
        ctx
    }

    fn registry(check: Box<dyn Check>) -> CheckRegistry {
        let mut registry = CheckRegistry::new();
        registry.register(check);
        registry
    }

    #[test]
    fn abort_prints_report_and_releases() {
        let closes = Rc::new(Cell::new(0));
        let mut ctx = ctx(&closes);
        let mut out = Vec::new();

        let outcome = Driver::new(true)
            .with_interactive(false)
            .run(&registry(Box::new(Fails)), &mut ctx, &mut out);

        assert_eq!(outcome.exit_code(), 1);
        assert!(!outcome.is_success());
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Preflight self-test"));
        assert!(printed.contains("MEDIA_URL is wrong"));
        assert!(!printed.contains(INTERACTIVE_TRAILER.trim()));
        assert_eq!(closes.get(), 1);
        assert!(ctx.connections.is_released());

        match outcome.into_result() {
            Err(PreflightError::Fatal(error)) => assert_eq!(error.check(), Some("fails")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn interactive_abort_adds_trailer() {
        let closes = Rc::new(Cell::new(0));
        let mut out = Vec::new();
        Driver::new(true)
            .with_interactive(true)
            .run(&registry(Box::new(Fails)), &mut ctx(&closes), &mut out);
        assert!(String::from_utf8(out).unwrap().contains("Ctrl-C"));
    }

    #[test]
    fn success_releases() {
        let closes = Rc::new(Cell::new(0));
        let mut ctx = ctx(&closes);
        let mut out = Vec::new();

        let outcome = Driver::new(true).run(&registry(Box::new(Passes)), &mut ctx, &mut out);

        assert_eq!(outcome.exit_code(), 0);
        assert!(matches!(outcome, RunOutcome::Completed(ref r) if r.executed == ["passes"]));
        assert!(out.is_empty());
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn disabled_self_test_still_releases() {
        let closes = Rc::new(Cell::new(0));
        let mut ctx = ctx(&closes);
        let mut out = Vec::new();

        let outcome = Driver::new(false).run(&registry(Box::new(Fails)), &mut ctx, &mut out);

        assert!(matches!(outcome, RunOutcome::Skipped));
        assert_eq!(outcome.exit_code(), 0);
        assert!(out.is_empty());
        assert_eq!(closes.get(), 1);
        assert!(ctx.cache().is_none());
    }

    #[test]
    fn cache_unavailable_aborts_before_later_checks() {
        struct Garbles;

        impl CacheBackend for Garbles {
            fn backend_id(&self) -> &str {
                "redis"
            }
            fn set(&self, _key: &str, _value: &str) -> Result<()> {
                Ok(())
            }
            fn get(&self, _key: &str) -> Result<Option<String>> {
                Ok(Some("not what was written".into()))
            }
        }

        struct Marks(Rc<Cell<bool>>);

        impl Check for Marks {
            fn name(&self) -> &str {
                "marks"
            }
            fn description(&self) -> &str {
                "records that it ran"
            }
            fn run(&self, _ctx: &CheckContext) -> CheckResult {
                self.0.set(true);
                Ok(Vec::new())
            }
        }

        let ran = Rc::new(Cell::new(false));
        let mut registry = CheckRegistry::new();
        registry.register(Box::new(crate::checks::builtin::CacheBackendCheck));
        registry.register(Box::new(Marks(ran.clone())));

        let mut ctx = CheckContext::new(Snapshot::new()).with_cache(Box::new(Garbles));
        let mut out = Vec::new();
        let outcome = Driver::new(true)
            .with_interactive(false)
            .run(&registry, &mut ctx, &mut out);

        match outcome {
            RunOutcome::Aborted(error) => {
                assert_eq!(error.kind(), crate::diagnostic::DiagnosticKind::Unavailable);
                assert_eq!(error.check(), Some("cache-backend"));
                assert!(error.report().contains("Cache server is unavailable"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(!ran.get());
        assert!(ctx.connections.is_released());
    }
}
