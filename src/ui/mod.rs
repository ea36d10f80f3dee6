//! Operator-facing output.
//!
//! This module provides:
//! - [`UserInterface`] trait for output abstraction
//! - [`TerminalUI`] writing styled lines to the terminal
//! - [`MockUI`] capturing output in tests
//!
//! # Example
//!
//! ```
//! use preflight::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.success("Self-test passed");
//! assert_eq!(ui.successes(), ["Self-test passed".to_string()]);
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, PreflightTheme};

/// Trait for user-facing output.
///
/// This trait allows capturing output in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a plain line on stdout.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning on stderr.
    fn warning(&mut self, msg: &str);

    /// Display an error on stderr. Shown in every mode.
    fn error(&mut self, msg: &str);

    /// Writer for a fatal self-test report. Reports go to stderr unstyled.
    fn report_writer(&mut self) -> &mut dyn std::io::Write;
}
