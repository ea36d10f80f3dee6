//! Declarative settings assertions.
//!
//! A rule table lists, per setting, what must be true about it: it must
//! equal a value, it must be present, or it must be absent (a retired
//! setting). [`SettingsTester`] evaluates the whole table against a
//! [`Snapshot`] and reports every failure in a single diagnostic, so an
//! operator fixes everything in one pass instead of one restart per rule.
//!
//! # Example
//!
//! ```
//! use preflight::config::Snapshot;
//! use preflight::rules::{Rule, SettingsTester};
//!
//! let tester = SettingsTester::new(vec![
//!     Rule::equals("USE_I18N", true, "Please set USE_I18N = true"),
//!     Rule::absent("FILE_UPLOAD_DIR", "Please replace FILE_UPLOAD_DIR ")
//!         .with_replace_hint("with MEDIA_ROOT = '%s'"),
//! ]);
//!
//! let snapshot = Snapshot::new()
//!     .with("USE_I18N", true)
//!     .with("FILE_UPLOAD_DIR", "/srv/uploads");
//! assert_eq!(
//!     tester.evaluate(&snapshot),
//!     vec!["Please replace FILE_UPLOAD_DIR with MEDIA_ROOT = '/srv/uploads'".to_string()]
//! );
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::config::{render_value, Snapshot};
use crate::diagnostic::{Diagnostic, DiagnosticError};

/// Header of the composite report.
pub const MAINTENANCE_HEADER: &str = "Time to do some maintenance of your settings:";

/// Placeholder in a replace hint that receives the current value.
pub const HINT_PLACEHOLDER: &str = "%s";

/// What a rule asserts about its setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// The setting must be present and equal to this value.
    Equals(#[schemars(with = "serde_json::Value")] Value),
    /// The setting must be present with any value.
    Present,
    /// The setting must not be present.
    Absent {
        /// Appended to the message with `%s` replaced by the current value.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        replace_hint: Option<String>,
    },
}

/// One assertion about one setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Rule {
    /// Setting name.
    pub setting: String,
    /// What must hold.
    #[serde(rename = "expect")]
    pub kind: RuleKind,
    /// Message reported when the rule fails.
    pub message: String,
}

impl Rule {
    /// The setting must equal `value`.
    pub fn equals(setting: &str, value: impl Into<Value>, message: &str) -> Self {
        Self {
            setting: setting.to_string(),
            kind: RuleKind::Equals(value.into()),
            message: message.to_string(),
        }
    }

    /// The setting must be present.
    pub fn present(setting: &str, message: &str) -> Self {
        Self {
            setting: setting.to_string(),
            kind: RuleKind::Present,
            message: message.to_string(),
        }
    }

    /// The setting must be absent.
    pub fn absent(setting: &str, message: &str) -> Self {
        Self {
            setting: setting.to_string(),
            kind: RuleKind::Absent { replace_hint: None },
            message: message.to_string(),
        }
    }

    /// Attach a replace hint. Only meaningful for absence rules.
    pub fn with_replace_hint(mut self, hint: &str) -> Self {
        if let RuleKind::Absent { replace_hint } = &mut self.kind {
            *replace_hint = Some(hint.to_string());
        }
        self
    }

    /// Evaluate against a snapshot; `Some(message)` when the rule fails.
    pub fn evaluate(&self, snapshot: &Snapshot) -> Option<String> {
        let current = snapshot.get(&self.setting);
        match (&self.kind, current) {
            (RuleKind::Absent { .. }, None) => None,
            (RuleKind::Absent { replace_hint }, Some(value)) => {
                let mut message = self.message.clone();
                if let Some(hint) = replace_hint {
                    message.push_str(&hint.replace(HINT_PLACEHOLDER, &render_value(value)));
                }
                Some(message)
            }
            (RuleKind::Present, None) | (RuleKind::Equals(_), None) => Some(self.message.clone()),
            (RuleKind::Present, Some(_)) => None,
            (RuleKind::Equals(expected), Some(value)) => {
                (value != expected).then(|| self.message.clone())
            }
        }
    }
}

/// Evaluates a rule table against a settings snapshot.
#[derive(Debug, Clone, Default)]
pub struct SettingsTester {
    rules: Vec<Rule>,
}

impl SettingsTester {
    /// Create a tester over `rules`, evaluated in order.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The built-in rule table.
    pub fn defaults() -> Self {
        Self::new(vec![
            Rule::equals(
                "CACHE_MIDDLEWARE_ANONYMOUS_ONLY",
                true,
                "add line CACHE_MIDDLEWARE_ANONYMOUS_ONLY = True",
            ),
            Rule::equals(
                "USE_I18N",
                true,
                "Please set USE_I18N = True and\nset the LANGUAGE_CODE parameter correctly",
            ),
            Rule::present(
                "LOGIN_REDIRECT_URL",
                "add setting LOGIN_REDIRECT_URL - an url\n\
                 where you want to send users after they log in\n\
                 a reasonable default is\n\
                 LOGIN_REDIRECT_URL = APP_URL_PREFIX",
            ),
            Rule::absent(
                "FILE_UPLOAD_DIR",
                "Please replace setting FILE_UPLOAD_DIR ",
            )
            .with_replace_hint("with MEDIA_ROOT = '%s'"),
            Rule::absent(
                "UPLOADED_FILES_URL",
                "Please replace setting UPLOADED_FILES_URL ",
            )
            .with_replace_hint("with MEDIA_URL = '/%s'"),
            Rule::equals("NOCAPTCHA", true, "Please add: NOCAPTCHA = True"),
        ])
    }

    /// The rules in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Every failure message, in rule order.
    pub fn evaluate(&self, snapshot: &Snapshot) -> Vec<String> {
        self.rules
            .iter()
            .filter_map(|rule| rule.evaluate(snapshot))
            .collect()
    }

    /// Evaluate and raise one composite error if anything failed.
    pub fn run(&self, snapshot: &Snapshot) -> Result<(), DiagnosticError> {
        let messages = self.evaluate(snapshot);
        tracing::debug!(
            rules = self.rules.len(),
            failures = messages.len(),
            "Evaluated settings rules"
        );
        Diagnostic::configuration(messages)
            .with_header(MAINTENANCE_HEADER)
            .into_result()
    }
}
