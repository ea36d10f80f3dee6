//! Validation diagnostics.
//!
//! A check describes what it found with a [`Diagnostic`]: a severity, a
//! kind, an optional header and footer, and one or more messages. Several
//! problems found by the same check travel together so the operator can fix
//! all of them in one pass.
//!
//! - **Fatal** diagnostics become a [`DiagnosticError`] and stop the run
//! - **Warning** diagnostics are logged and the run continues
//!
//! # Example
//!
//! ```
//! use preflight::diagnostic::{Diagnostic, DiagnosticKind};
//!
//! // Nothing to report: no error
//! assert!(Diagnostic::configuration(Vec::new()).into_result().is_ok());
//!
//! let err = Diagnostic::configuration(vec!["a".into(), "b".into()])
//!     .into_result()
//!     .unwrap_err();
//! assert_eq!(err.kind(), DiagnosticKind::Configuration);
//! assert_eq!(err.report(), "1. a\n\n2. b");
//! ```

pub mod error;
pub mod report;

pub use error::{is_ci, stdin_is_interactive, DiagnosticError, BANNER, INTERACTIVE_TRAILER};
pub use report::{enumerate_messages, format_literal_list, format_report, ATTEND_LINE};

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Operable but suboptimal; reported and the run continues.
    Warning,
    /// The process must not start.
    Fatal,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Fatal => write!(f, "fatal"),
        }
    }
}

/// The category of problem a diagnostic describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A requirement or version string could not be parsed.
    Parse,
    /// An installed package does not satisfy a declared constraint.
    UnsatisfiedConstraint,
    /// A required package is not installed.
    MissingDependency,
    /// One or more settings are wrong.
    Configuration,
    /// An external service did not answer correctly.
    Unavailable,
    /// Suboptimal but operable configuration.
    Advisory,
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DiagnosticKind::Parse => "parse-error",
            DiagnosticKind::UnsatisfiedConstraint => "unsatisfied-constraint",
            DiagnosticKind::MissingDependency => "missing-dependency",
            DiagnosticKind::Configuration => "configuration",
            DiagnosticKind::Unavailable => "unavailable",
            DiagnosticKind::Advisory => "advisory",
        };
        f.write_str(name)
    }
}

/// A structured validation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Whether this halts the run.
    pub severity: Severity,
    /// Category of the problem.
    pub kind: DiagnosticKind,
    /// Text shown above the messages.
    pub header: Option<String>,
    /// The problems found, in discovery order.
    pub messages: Vec<String>,
    /// Text shown below the messages.
    pub footer: Option<String>,
}

impl Diagnostic {
    /// Create a fatal diagnostic of the given kind.
    pub fn fatal(kind: DiagnosticKind, messages: Vec<String>) -> Self {
        Self {
            severity: Severity::Fatal,
            kind,
            header: None,
            messages,
            footer: None,
        }
    }

    /// Create a fatal configuration diagnostic.
    pub fn configuration(messages: Vec<String>) -> Self {
        Self::fatal(DiagnosticKind::Configuration, messages)
    }

    /// Create an advisory warning.
    pub fn warning(messages: Vec<String>) -> Self {
        Self {
            severity: Severity::Warning,
            kind: DiagnosticKind::Advisory,
            header: None,
            messages,
            footer: None,
        }
    }

    /// Set the header text.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Set the footer text.
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Whether there is anything to report.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Whether this diagnostic halts the run.
    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }

    /// The formatted report, or `None` if there are no messages.
    pub fn report(&self) -> Option<String> {
        format_report(
            &self.messages,
            self.header.as_deref(),
            self.footer.as_deref(),
        )
    }

    /// Escalate a fatal diagnostic.
    ///
    /// Returns `Err` only for a fatal diagnostic with at least one message.
    /// Warnings never unwind; a check hands them back to the runner instead.
    pub fn into_result(self) -> Result<(), DiagnosticError> {
        if !self.is_fatal() {
            return Ok(());
        }
        match self.report() {
            Some(report) => Err(DiagnosticError::new(self.kind, report)),
            None => Ok(()),
        }
    }

    /// Write a warning to the operator log. Empty diagnostics log nothing.
    pub fn emit(&self) {
        if let Some(report) = self.report() {
            match self.severity {
                Severity::Warning => tracing::warn!("{}", report),
                Severity::Fatal => tracing::error!("{}", report),
            }
        }
    }
}
