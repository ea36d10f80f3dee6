//! Check command implementation.
//!
//! The `preflight check` command loads `preflight.yml`, builds the check
//! context and hands it to the [`Driver`].

use std::path::{Path, PathBuf};

use crate::checks::{CheckContext, CheckRegistry};
use crate::cli::args::CheckArgs;
use crate::config::{load_config, Snapshot};
use crate::driver::{Driver, RunOutcome};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(project_root: &Path, config_override: Option<PathBuf>, args: CheckArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override,
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &CheckArgs {
        &self.args
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let loaded = load_config(&self.project_root, self.config_override.as_deref())?;
        let self_test = loaded.config.self_test && !self.args.skip_self_test;
        // A disabled self-test must not touch the inputs it would check.
        let mut ctx = if self_test {
            CheckContext::from_config(&loaded, self.args.argv.clone())?
        } else {
            CheckContext::new(Snapshot::new())
        };
        let registry = CheckRegistry::with_builtins();

        let outcome = Driver::new(self_test).run(&registry, &mut ctx, ui.report_writer());

        match &outcome {
            RunOutcome::Skipped => ui.message("Self-test disabled"),
            RunOutcome::Completed(report) => {
                if ui.output_mode().shows_detail() {
                    for name in &report.executed {
                        ui.message(&format!("  {}", name));
                    }
                }
                for warning in &report.warnings {
                    ui.warning(&format!("{} reported a warning", warning.check));
                }
                ui.success(&format!(
                    "Self-test passed ({} checks)",
                    report.executed.len()
                ));
            }
            RunOutcome::Aborted(_) => {}
        }

        Ok(match outcome.exit_code() {
            0 => CommandResult::success(),
            code => CommandResult::failure(code),
        })
    }
}
