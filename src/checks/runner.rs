//! Sequential check execution.
//!
//! The runner walks the registry in order. A fatal result stops the run on
//! the spot; warnings are logged, recorded and the run moves on. Nothing a
//! check did is rolled back on abort, which is fine because checks only
//! read.

use super::{CheckContext, CheckRegistry};
use crate::diagnostic::{Diagnostic, DiagnosticError};

/// Lifecycle of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Not started.
    Pending,
    /// Checks are executing.
    Running,
    /// Every check ran without a fatal result.
    Completed,
    /// A check returned a fatal result.
    Aborted,
}

/// A warning together with the check that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckWarning {
    /// Name of the check.
    pub check: String,
    /// What it found.
    pub diagnostic: Diagnostic,
}

/// Outcome of a run that reached the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Names of the checks that ran, in order.
    pub executed: Vec<String>,
    /// Warnings, in the order they were found.
    pub warnings: Vec<CheckWarning>,
}

impl RunReport {
    /// Returns true if any warnings were recorded.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Runs a registry against a context.
#[derive(Debug)]
pub struct CheckRunner {
    state: RunState,
    warnings: Vec<CheckWarning>,
}

impl CheckRunner {
    /// Create a runner in the `Pending` state.
    pub fn new() -> Self {
        Self {
            state: RunState::Pending,
            warnings: Vec::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Warnings recorded by the latest run, kept after an abort.
    pub fn warnings(&self) -> &[CheckWarning] {
        &self.warnings
    }

    /// Execute every check in registration order.
    ///
    /// Returns the first fatal error, tagged with the name of the check that
    /// raised it. Checks registered after it never run. Warnings a check
    /// returns alongside a fatal diagnostic are still emitted.
    pub fn run(
        &mut self,
        registry: &CheckRegistry,
        ctx: &CheckContext,
    ) -> Result<RunReport, DiagnosticError> {
        self.state = RunState::Running;
        self.warnings.clear();
        let mut executed = Vec::new();

        for check in registry.iter() {
            let name = check.name();
            tracing::debug!("Running check {}", name);

            let result = check.run(ctx);
            executed.push(name.to_string());

            let outcome = result.and_then(|diagnostics| {
                let (fatal, warnings): (Vec<_>, Vec<_>) =
                    diagnostics.into_iter().partition(Diagnostic::is_fatal);
                self.record_warnings(name, warnings);
                fatal.into_iter().try_for_each(Diagnostic::into_result)
            });

            if let Err(error) = outcome {
                tracing::debug!("Check {} failed: {}", name, error.kind());
                self.state = RunState::Aborted;
                return Err(error.with_check(name));
            }
        }

        self.state = RunState::Completed;
        tracing::info!(
            "Self-test passed: {} check(s), {} warning(s)",
            executed.len(),
            self.warnings.len()
        );
        Ok(RunReport {
            executed,
            warnings: self.warnings.clone(),
        })
    }

    fn record_warnings(&mut self, check: &str, diagnostics: Vec<Diagnostic>) {
        for diagnostic in diagnostics.into_iter().filter(|d| !d.is_empty()) {
            diagnostic.emit();
            self.warnings.push(CheckWarning {
                check: check.to_string(),
                diagnostic,
            });
        }
    }
}

impl Default for CheckRunner {
    fn default() -> Self {
        Self::new()
    }
}
