//! URL-shaped settings.

use serde_yaml::Value;

use crate::checks::{Check, CheckContext, CheckResult};
use crate::diagnostic::Diagnostic;

/// `APP_URL_PREFIX` is empty or a relative path ending with `/`.
pub struct AppUrlCheck;

impl Check for AppUrlCheck {
    fn name(&self) -> &str {
        "app-url"
    }

    fn description(&self) -> &str {
        "APP_URL_PREFIX is empty or a relative path ending with /"
    }

    fn run(&self, ctx: &CheckContext) -> CheckResult {
        let url = match ctx.snapshot.get("APP_URL_PREFIX") {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::String(url)) => url,
            Some(_) => {
                Diagnostic::configuration(vec![
                    "setting APP_URL_PREFIX must be a string".into()
                ])
                .into_result()?;
                return Ok(Vec::new());
            }
        };

        let mut errors = Vec::new();
        if url == "/" {
            errors.push(
                "value \"/\" for APP_URL_PREFIX is invalid. Please, either make \
                 APP_URL_PREFIX an empty string or a non-empty path, ending with \"/\" \
                 but not starting with \"/\", for example: \"forum/\""
                    .to_string(),
            );
        } else if !url.is_empty() {
            if !url.ends_with('/') {
                errors.push("if APP_URL_PREFIX setting is not empty, it must end with /".into());
            }
            if url.starts_with('/') {
                errors.push(
                    "if APP_URL_PREFIX setting is not empty, it must not start with /".into(),
                );
            }
        }

        Diagnostic::configuration(errors).into_result()?;
        Ok(Vec::new())
    }
}

/// `MEDIA_URL` is site-absolute or a full URL.
pub struct MediaUrlCheck;

impl Check for MediaUrlCheck {
    fn name(&self) -> &str {
        "media-url"
    }

    fn description(&self) -> &str {
        "MEDIA_URL starts with a slash or http"
    }

    fn run(&self, ctx: &CheckContext) -> CheckResult {
        let media_url = ctx.snapshot.str("MEDIA_URL").unwrap_or_default();
        if !(media_url.starts_with('/') || media_url.starts_with("http")) {
            Diagnostic::configuration(vec![
                "MEDIA_URL parameter must be a unique url on the site\n\
                 and must start with a slash - e.g. /media/ or http(s)://"
                    .into(),
            ])
            .into_result()?;
        }
        Ok(Vec::new())
    }
}

/// `SERVICE_URL_PREFIX`, when set, is more than `/` and ends with `/`.
pub struct ServiceUrlPrefixCheck;

impl Check for ServiceUrlPrefixCheck {
    fn name(&self) -> &str {
        "service-url-prefix"
    }

    fn description(&self) -> &str {
        "SERVICE_URL_PREFIX is longer than one character and ends with /"
    }

    fn run(&self, ctx: &CheckContext) -> CheckResult {
        let prefix = match ctx.snapshot.get("SERVICE_URL_PREFIX") {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::String(prefix)) if prefix.is_empty() => return Ok(Vec::new()),
            Some(Value::String(prefix)) => Some(prefix.as_str()),
            Some(_) => None,
        };

        let valid = prefix.is_some_and(|p| p.chars().count() > 1 && p.ends_with('/'));
        if !valid {
            Diagnostic::configuration(vec![
                "Service url prefix must have > 1 letters and must end with /".into(),
            ])
            .into_result()?;
        }
        Ok(Vec::new())
    }
}
