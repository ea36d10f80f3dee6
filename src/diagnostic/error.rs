//! The fatal validation error.
//!
//! A [`DiagnosticError`] carries a finished report. Its `Display` output is
//! the report wrapped in the self-test banner, followed by a short trailer
//! that only makes sense to someone sitting at a terminal.

use std::fmt;
use std::io::IsTerminal;

use super::DiagnosticKind;

/// Banner printed above every fatal report.
pub const BANNER: &str = "\n\n\
************************\n\
*                      *\n\
*  Preflight self-test *\n\
*                      *\n\
************************\n\n";

/// Trailer appended when the process was started from an interactive shell.
pub const INTERACTIVE_TRAILER: &str = "\n\n\
If necessary, type ^C (Ctrl-C) to stop the program\n\
(to disable the self-test set `self_test: false`).\n";

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

/// Whether standard input is attached to an operator's terminal.
///
/// CI runners sometimes allocate a pseudo-terminal, so a detected CI
/// environment always counts as non-interactive.
pub fn stdin_is_interactive() -> bool {
    std::io::stdin().is_terminal() && !is_ci()
}

/// A fatal validation failure that halts the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticError {
    kind: DiagnosticKind,
    check: Option<String>,
    report: String,
}

impl DiagnosticError {
    /// Create a new error from an already formatted report.
    pub fn new(kind: DiagnosticKind, report: impl Into<String>) -> Self {
        Self {
            kind,
            check: None,
            report: report.into(),
        }
    }

    /// Attach the name of the check that raised this error.
    pub fn with_check(mut self, check: impl Into<String>) -> Self {
        self.check = Some(check.into());
        self
    }

    /// What kind of misconfiguration this is.
    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    /// Name of the check that raised the error, once the runner has seen it.
    pub fn check(&self) -> Option<&str> {
        self.check.as_deref()
    }

    /// The bare report without banner or trailer.
    pub fn report(&self) -> &str {
        &self.report
    }

    /// Render the full text shown to the operator.
    pub fn render(&self, interactive: bool) -> String {
        let mut text = String::with_capacity(BANNER.len() + self.report.len());
        text.push_str(BANNER);
        text.push_str(&self.report);
        if interactive {
            text.push_str(INTERACTIVE_TRAILER);
        }
        text
    }
}

impl fmt::Display for DiagnosticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(stdin_is_interactive()))
    }
}

impl std::error::Error for DiagnosticError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_wraps_report_in_banner() {
        let err = DiagnosticError::new(DiagnosticKind::Configuration, "MEDIA_URL is wrong");
        let text = err.render(false);
        assert!(text.starts_with(BANNER));
        assert!(text.ends_with("MEDIA_URL is wrong"));
    }

    #[test]
    fn trailer_only_when_interactive() {
        let err = DiagnosticError::new(DiagnosticKind::Configuration, "report");
        assert!(err.render(true).contains("Ctrl-C"));
        assert!(!err.render(false).contains("Ctrl-C"));
    }

    #[test]
    fn check_name_is_attached() {
        let err = DiagnosticError::new(DiagnosticKind::Unavailable, "down").with_check("cache-backend");
        assert_eq!(err.check(), Some("cache-backend"));
        assert_eq!(err.kind(), DiagnosticKind::Unavailable);
        assert_eq!(err.report(), "down");
    }

    #[test]
    fn display_contains_report() {
        let err = DiagnosticError::new(DiagnosticKind::Parse, "bad requirement");
        assert!(err.to_string().contains("bad requirement"));
    }

    #[test]
    fn is_ci_detects_environment() {
        // Just ensure function doesn't panic
        let _ = is_ci();
    }
}
