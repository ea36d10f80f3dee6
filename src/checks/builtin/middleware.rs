//! Middleware stack and test-runner settings.

use crate::checks::{Check, CheckContext, CheckResult};
use crate::diagnostic::{format_literal_list, Diagnostic};

const MISSING_MIDDLEWARE: &str = "Please add the following middleware (listed after this message)\n\
to the MIDDLEWARE variable in your settings.\n\
The order of the middleware records is important.";

const MIDDLEWARE_ORDER: &str = "Please check the order of middleware closely.\n\
The order of the middleware records is important.";

const REMOVED_MIDDLEWARE: &str = "Please remove the following middleware entries from\n\
the list of MIDDLEWARE in your settings - these are not used any more:";

/// Debug toolbar app, unwanted under the test runner.
pub const DEBUG_TOOLBAR_APP: &str = "debug_toolbar";

/// Debug toolbar middleware, unwanted under the test runner.
pub const DEBUG_TOOLBAR_MIDDLEWARE: &str = "debug_toolbar.middleware.DebugToolbarMiddleware";

/// Required middleware is present in order and retired middleware is gone.
#[derive(Debug, Clone)]
pub struct MiddlewareCheck {
    required: Vec<String>,
    removed: Vec<String>,
}

impl MiddlewareCheck {
    /// A check with custom required and retired lists.
    pub fn new(required: Vec<String>, removed: Vec<String>) -> Self {
        Self { required, removed }
    }
}

impl Default for MiddlewareCheck {
    fn default() -> Self {
        Self::new(
            vec![
                "django.contrib.sessions.middleware.SessionMiddleware".into(),
                "django.middleware.common.CommonMiddleware".into(),
                "django.contrib.auth.middleware.AuthenticationMiddleware".into(),
            ],
            vec!["recaptcha_django.middleware.ReCaptchaMiddleware".into()],
        )
    }
}

impl Check for MiddlewareCheck {
    fn name(&self) -> &str {
        "middleware"
    }

    fn description(&self) -> &str {
        "Required middleware is installed in order and retired middleware is removed"
    }

    fn run(&self, ctx: &CheckContext) -> CheckResult {
        let installed = ctx.snapshot.string_list("MIDDLEWARE").unwrap_or_default();

        let found: Vec<&str> = installed
            .iter()
            .copied()
            .filter(|m| self.required.iter().any(|r| r == m))
            .collect();

        if found != self.required {
            let missing: Vec<&str> = self
                .required
                .iter()
                .map(String::as_str)
                .filter(|r| !found.contains(r))
                .collect();

            let message = if missing.is_empty() {
                MIDDLEWARE_ORDER.to_string()
            } else {
                format!("{}\n\n{}", MISSING_MIDDLEWARE, format_literal_list(missing))
            };
            Diagnostic::configuration(vec![message]).into_result()?;
        }

        let retired: Vec<&str> = installed
            .iter()
            .copied()
            .filter(|m| self.removed.iter().any(|r| r == m))
            .collect();
        if !retired.is_empty() {
            Diagnostic::configuration(vec![format!(
                "{}\n\n{}",
                REMOVED_MIDDLEWARE,
                format_literal_list(retired)
            )])
            .into_result()?;
        }

        Ok(Vec::new())
    }
}

/// The debug toolbar is disabled on test runs.
pub struct TestRunnerSettingsCheck;

impl Check for TestRunnerSettingsCheck {
    fn name(&self) -> &str {
        "test-runner-settings"
    }

    fn description(&self) -> &str {
        "The debug toolbar is disabled when running the test suite"
    }

    fn run(&self, ctx: &CheckContext) -> CheckResult {
        if !ctx.is_test_run() {
            return Ok(Vec::new());
        }

        let mut errors = Vec::new();
        if ctx.snapshot.list_contains("INSTALLED_APPS", DEBUG_TOOLBAR_APP) {
            errors.push(format!(
                "When testing - remove {} from INSTALLED_APPS",
                DEBUG_TOOLBAR_APP
            ));
        }
        if ctx
            .snapshot
            .list_contains("MIDDLEWARE", DEBUG_TOOLBAR_MIDDLEWARE)
        {
            errors.push(format!(
                "When testing - remove {} from MIDDLEWARE",
                DEBUG_TOOLBAR_MIDDLEWARE
            ));
        }

        Diagnostic::configuration(errors).into_result()?;
        Ok(Vec::new())
    }
}
