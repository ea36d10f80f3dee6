//! Ordered registry of checks.
//!
//! Unlike a lookup table, the [`CheckRegistry`] is a sequence: the order
//! checks are registered in is the order they run in.

use super::builtin::{
    AppUrlCheck, CacheBackendCheck, DependenciesCheck, LanguageModeCheck, MediaUrlCheck,
    MiddlewareCheck, RequirementsParserCheck, SecretKeyCheck, ServiceUrlPrefixCheck,
    SettingsRulesCheck, TestDependenciesCheck, TestRunnerSettingsCheck,
};
use super::Check;

/// Registry of checks in execution order.
pub struct CheckRegistry {
    checks: Vec<Box<dyn Check>>,
}

impl CheckRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Create a registry with the built-in catalogue.
    ///
    /// Requirement checks come first so that a missing package is reported
    /// before anything that depends on it.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(RequirementsParserCheck));
        registry.register(Box::new(DependenciesCheck));
        registry.register(Box::new(TestDependenciesCheck));
        registry.register(Box::new(LanguageModeCheck));
        registry.register(Box::new(AppUrlCheck));
        registry.register(Box::new(CacheBackendCheck));
        registry.register(Box::new(MediaUrlCheck));
        registry.register(Box::new(MiddlewareCheck::default()));
        registry.register(Box::new(SecretKeyCheck));
        registry.register(Box::new(ServiceUrlPrefixCheck));
        registry.register(Box::new(SettingsRulesCheck));
        registry.register(Box::new(TestRunnerSettingsCheck));
        registry
    }

    /// Append a check.
    pub fn register(&mut self, check: Box<dyn Check>) {
        self.checks.push(check);
    }

    /// Get the first check registered under `name`.
    pub fn get(&self, name: &str) -> Option<&dyn Check> {
        self.checks
            .iter()
            .find(|c| c.name() == name)
            .map(|c| c.as_ref())
    }

    /// Iterate in execution order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Check> {
        self.checks.iter().map(|c| c.as_ref())
    }

    /// Check names in execution order.
    pub fn names(&self) -> Vec<&str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Get the number of registered checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{CheckContext, CheckResult};

    struct NamedCheck(&'static str, &'static str);

    impl Check for NamedCheck {
        fn name(&self) -> &str {
            self.0
        }
        fn description(&self) -> &str {
            self.1
        }
        fn run(&self, _ctx: &CheckContext) -> CheckResult {
            Ok(Vec::new())
        }
    }

    #[test]
    fn registry_new_is_empty() {
        let registry = CheckRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn registration_order_is_kept() {
        let mut registry = CheckRegistry::new();
        registry.register(Box::new(NamedCheck("zeta", "")));
        registry.register(Box::new(NamedCheck("alpha", "")));
        registry.register(Box::new(NamedCheck("mid", "")));
        assert_eq!(registry.names(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn get_returns_first_duplicate() {
        let mut registry = CheckRegistry::new();
        registry.register(Box::new(NamedCheck("dup", "first")));
        registry.register(Box::new(NamedCheck("dup", "second")));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("dup").unwrap().description(), "first");
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn builtins_are_registered_in_order() {
        let registry = CheckRegistry::with_builtins();
        assert_eq!(
            registry.names(),
            vec![
                "requirements-parser",
                "dependencies",
                "test-dependencies",
                "language-mode",
                "app-url",
                "cache-backend",
                "media-url",
                "middleware",
                "secret-key",
                "service-url-prefix",
                "settings-rules",
                "test-runner-settings",
            ]
        );
    }

    #[test]
    fn builtins_have_descriptions() {
        for check in CheckRegistry::with_builtins().iter() {
            assert!(!check.description().is_empty(), "{}", check.name());
        }
    }
}
