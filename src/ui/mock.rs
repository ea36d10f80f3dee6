//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all output
//! for later assertion.

use super::{OutputMode, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    report: Vec<u8>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Get captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get captured warnings.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get captured errors.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Text written through the report writer.
    pub fn report(&self) -> String {
        String::from_utf8_lossy(&self.report).into_owned()
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn report_writer(&mut self) -> &mut dyn std::io::Write {
        &mut self.report
    }
}
