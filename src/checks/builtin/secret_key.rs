//! Secret key sanity.

use crate::checks::{Check, CheckContext, CheckResult};
use crate::diagnostic::Diagnostic;

/// The key shipped in the sample settings file.
pub const SAMPLE_SECRET_KEY: &str = "sdljdfjkldsflsdjkhsjkldgjlsdgfs s ";

/// `SECRET_KEY` is set and is not the published sample.
pub struct SecretKeyCheck;

impl Check for SecretKeyCheck {
    fn name(&self) -> &str {
        "secret-key"
    }

    fn description(&self) -> &str {
        "SECRET_KEY is set and is not the sample value"
    }

    fn run(&self, ctx: &CheckContext) -> CheckResult {
        let key = ctx.snapshot.str("SECRET_KEY").unwrap_or_default();
        let message = if key.trim().is_empty() {
            Some("please create a random SECRET_KEY setting")
        } else if key == SAMPLE_SECRET_KEY {
            Some("Please change your SECRET_KEY setting, the current is not secure")
        } else {
            None
        };

        if let Some(message) = message {
            Diagnostic::configuration(vec![message.to_string()]).into_result()?;
        }
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Snapshot;

    fn run(snapshot: Snapshot) -> CheckResult {
        SecretKeyCheck.run(&CheckContext::new(snapshot))
    }

    #[test]
    fn missing_or_blank_key() {
        assert!(run(Snapshot::new()).is_err());
        let err = run(Snapshot::new().with("SECRET_KEY", "   ")).unwrap_err();
        assert!(err.report().contains("create a random SECRET_KEY"));
    }

    #[test]
    fn sample_key_is_rejected() {
        let err = run(Snapshot::new().with("SECRET_KEY", SAMPLE_SECRET_KEY)).unwrap_err();
        assert!(err.report().contains("not secure"));
    }

    #[test]
    fn random_key_passes() {
        assert!(run(Snapshot::new().with("SECRET_KEY", "k9$2mQ!x")).is_ok());
    }
}
