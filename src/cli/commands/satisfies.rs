//! Satisfies command implementation.
//!
//! `preflight satisfies "django>=3.0,<5" 4.2.1` answers whether a version
//! meets a requirement, using the same comparator as the self-test.

use crate::cli::args::SatisfiesArgs;
use crate::error::Result;
use crate::requirements::{failed_constraints, parse_requirement};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The satisfies command implementation.
pub struct SatisfiesCommand {
    args: SatisfiesArgs,
}

impl SatisfiesCommand {
    /// Create a new satisfies command.
    pub fn new(args: SatisfiesArgs) -> Self {
        Self { args }
    }
}

impl Command for SatisfiesCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let requirement = parse_requirement(&self.args.requirement)?;
        let version = self.args.version.trim();
        let failed = failed_constraints(version, &requirement);

        if failed.is_empty() {
            ui.success(&format!("{} satisfies {}", version, requirement));
            return Ok(CommandResult::success());
        }

        let failed = failed
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        ui.error(&format!(
            "{} does not satisfy {} (fails {})",
            version, requirement, failed
        ));
        Ok(CommandResult::failure(1))
    }
}
