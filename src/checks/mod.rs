//! The check engine.
//!
//! A [`Check`] is a named, read-only probe over a [`CheckContext`]. The
//! [`CheckRegistry`] keeps checks in registration order and the
//! [`CheckRunner`] executes them in that order, stopping at the first fatal
//! result. Order matters: later checks assume earlier ones already
//! validated their preconditions (requirement lines parse before anything
//! looks up installed versions, for instance).
//!
//! # Example
//!
//! ```
//! use preflight::checks::{CheckContext, CheckRegistry, CheckRunner};
//! use preflight::config::Snapshot;
//!
//! let registry = CheckRegistry::new();
//! let ctx = CheckContext::new(Snapshot::new());
//! let report = CheckRunner::new().run(&registry, &ctx).unwrap();
//! assert!(report.executed.is_empty());
//! ```

pub mod builtin;
pub mod context;
pub mod registry;
pub mod runner;

pub use context::{CheckContext, TEST_RUN_TOKEN};
pub use registry::CheckRegistry;
pub use runner::{CheckRunner, CheckWarning, RunReport, RunState};

use crate::diagnostic::{Diagnostic, DiagnosticError};

/// What a check hands back.
///
/// `Err` aborts the run. `Ok` carries zero or more non-fatal diagnostics
/// for the runner to log and record.
pub type CheckResult = Result<Vec<Diagnostic>, DiagnosticError>;

/// A single validation step.
///
/// Checks must not mutate external state and must not keep state between
/// runs: running the same registry twice against the same context yields
/// the same report.
pub trait Check {
    /// Stable kebab-case name.
    fn name(&self) -> &str;

    /// One-line description of what is validated.
    fn description(&self) -> &str;

    /// Run against the context.
    fn run(&self, ctx: &CheckContext) -> CheckResult;
}
