//! Language mode settings.

use serde_yaml::Value;

use crate::checks::{Check, CheckContext, CheckResult};
use crate::diagnostic::Diagnostic;

/// Accepted values of `LANGUAGE_MODE`.
pub const LANGUAGE_MODES: &[&str] = &["single-lang", "url-lang", "user-lang"];

/// Middleware that url-prefixed language mode depends on.
pub const LOCALE_MIDDLEWARE: &str = "django.middleware.locale.LocaleMiddleware";

/// `LANGUAGE_MODE` is valid and consistent with the middleware stack.
pub struct LanguageModeCheck;

impl Check for LanguageModeCheck {
    fn name(&self) -> &str {
        "language-mode"
    }

    fn description(&self) -> &str {
        "LANGUAGE_MODE is valid and the legacy MULTILINGUAL switch is gone"
    }

    fn run(&self, ctx: &CheckContext) -> CheckResult {
        let snapshot = &ctx.snapshot;

        if let Some(legacy) = snapshot.get("MULTILINGUAL").filter(|v| !v.is_null()) {
            let advice = if legacy.as_bool() == Some(true) {
                "replace MULTILINGUAL = True with either:\n\
                 LANGUAGE_MODE = 'url-lang' or\n\
                 LANGUAGE_MODE = 'user-lang'"
            } else {
                "replace MULTILINGUAL = False with either:\n\
                 LANGUAGE_MODE = 'single-lang' or just delete the setting"
            };
            Diagnostic::configuration(vec![advice.to_string()]).into_result()?;
        }

        let mode = match snapshot.get("LANGUAGE_MODE") {
            None | Some(Value::Null) => None,
            Some(Value::String(mode)) if mode.is_empty() => None,
            Some(Value::String(mode)) => Some(mode.as_str()),
            Some(_) => Some(""),
        };
        let Some(mode) = mode else {
            return Ok(Vec::new());
        };

        let mut errors = Vec::new();
        if !LANGUAGE_MODES.contains(&mode) {
            errors.push(format!(
                "LANGUAGE_MODE must be one of:\n{}",
                LANGUAGE_MODES
                    .iter()
                    .map(|m| format!("'{}'", m))
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }

        if mode == "url-lang" && !snapshot.list_contains("MIDDLEWARE", LOCALE_MIDDLEWARE) {
            errors.push(format!(
                "add '{}' to your MIDDLEWARE if you want a multilingual setup",
                LOCALE_MIDDLEWARE
            ));
        }

        let multilingual = mode == "url-lang" || mode == "user-lang";
        if multilingual && snapshot.bool("TRANSLATE_URL") == Some(true) {
            errors.push(
                "Please set TRANSLATE_URL to False, the \"True\" option \
                 is not supported in multilingual modes"
                    .to_string(),
            );
        }

        Diagnostic::configuration(errors).into_result()?;
        Ok(Vec::new())
    }
}
