//! The built-in check catalogue.
//!
//! Each check reads the settings snapshot or a collaborator and reports
//! what it found. Registration order lives in
//! [`CheckRegistry::with_builtins`](crate::checks::CheckRegistry::with_builtins).

mod cache;
mod dependencies;
mod language;
mod middleware;
mod secret_key;
mod settings_rules;
mod urls;

pub use cache::CacheBackendCheck;
pub use dependencies::{
    DependenciesCheck, RequirementsParserCheck, TestDependenciesCheck, INSTALL_ALL_HINT,
    TEST_DEPENDENCY_HINT,
};
pub use language::{LanguageModeCheck, LANGUAGE_MODES, LOCALE_MIDDLEWARE};
pub use middleware::{
    MiddlewareCheck, TestRunnerSettingsCheck, DEBUG_TOOLBAR_APP, DEBUG_TOOLBAR_MIDDLEWARE,
};
pub use secret_key::{SecretKeyCheck, SAMPLE_SECRET_KEY};
pub use settings_rules::SettingsRulesCheck;
pub use urls::{AppUrlCheck, MediaUrlCheck, ServiceUrlPrefixCheck};
