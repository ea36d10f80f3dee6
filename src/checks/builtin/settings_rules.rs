//! Rule table check.

use crate::checks::{Check, CheckContext, CheckResult};

/// Every rule of the context's rule table holds.
pub struct SettingsRulesCheck;

impl Check for SettingsRulesCheck {
    fn name(&self) -> &str {
        "settings-rules"
    }

    fn description(&self) -> &str {
        "Settings match the declarative rule table"
    }

    fn run(&self, ctx: &CheckContext) -> CheckResult {
        ctx.rules.run(&ctx.snapshot)?;
        Ok(Vec::new())
    }
}
