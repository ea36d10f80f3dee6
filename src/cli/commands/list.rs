//! List command implementation.
//!
//! The `preflight list` command prints the built-in checks in the order
//! they run.

use crate::checks::CheckRegistry;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
#[derive(Debug, Default)]
pub struct ListCommand;

impl ListCommand {
    /// Create a new list command.
    pub fn new() -> Self {
        Self
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let registry = CheckRegistry::with_builtins();
        let width = registry.names().iter().map(|n| n.len()).max().unwrap_or(0);

        for (index, check) in registry.iter().enumerate() {
            ui.message(&format!(
                "{:>2}. {:<width$}  {}",
                index + 1,
                check.name(),
                check.description(),
                width = width
            ));
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;

    #[test]
    fn lists_checks_in_order() {
        let mut ui = MockUI::new();
        ListCommand::new().execute(&mut ui).unwrap();

        let messages = ui.messages();
        assert_eq!(messages.len(), 12);
        assert!(messages[0].starts_with(" 1. requirements-parser"));
        assert!(messages[11].starts_with("12. test-runner-settings"));
    }
}
