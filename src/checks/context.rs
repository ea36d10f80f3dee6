//! Everything a check may read.

use crate::config::{LoadedConfig, RequirementTable, Snapshot};
use crate::error::Result;
use crate::requirements::{InstalledPackages, PackageIndex};
use crate::rules::SettingsTester;
use crate::services::{backend_from_config, CacheBackend, ConnectionPool};

/// Host argv token marking a test run.
pub const TEST_RUN_TOKEN: &str = "test";

/// Inputs shared by every check in a run.
///
/// The snapshot, the requirement tables and the rule table are fixed for the
/// run. Collaborator handles live in [`connections`](Self::connections) and
/// are released by the driver once the run is over.
pub struct CheckContext {
    /// The settings under validation.
    pub snapshot: Snapshot,
    /// Where installed versions come from.
    pub installed: Box<dyn InstalledPackages>,
    /// Logical name -> requirement line.
    pub requirements: RequirementTable,
    /// Requirements that only matter on test runs.
    pub test_requirements: RequirementTable,
    /// Declarative settings assertions.
    pub rules: SettingsTester,
    /// Arguments of the host process.
    pub argv: Vec<String>,
    /// Open collaborator handles.
    pub connections: ConnectionPool,
}

impl CheckContext {
    /// A context over `snapshot` with nothing installed, no requirements,
    /// the built-in rule table and no collaborators.
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            installed: Box::new(PackageIndex::new()),
            requirements: RequirementTable::default(),
            test_requirements: RequirementTable::default(),
            rules: SettingsTester::defaults(),
            argv: Vec::new(),
            connections: ConnectionPool::new(),
        }
    }

    /// Build the context a config file describes.
    pub fn from_config(loaded: &LoadedConfig, argv: Vec<String>) -> Result<Self> {
        let config = &loaded.config;
        let snapshot = loaded.snapshot()?;
        let installed = loaded.installed_packages()?;
        let rules = match &config.rules {
            Some(rules) => SettingsTester::new(rules.clone()),
            None => SettingsTester::defaults(),
        };
        // Opened last so that nothing is left unreleased if loading fails.
        let cache = backend_from_config(&config.cache, loaded.base_dir())?;

        Ok(Self::new(snapshot)
            .with_installed(installed)
            .with_requirements(config.requirements.clone())
            .with_test_requirements(config.test_requirements.clone())
            .with_rules(rules)
            .with_argv(argv)
            .with_cache(cache))
    }

    /// Set the installed-version source.
    pub fn with_installed(mut self, installed: impl InstalledPackages + 'static) -> Self {
        self.installed = Box::new(installed);
        self
    }

    /// Set the requirement table.
    pub fn with_requirements(mut self, requirements: RequirementTable) -> Self {
        self.requirements = requirements;
        self
    }

    /// Set the test-only requirement table.
    pub fn with_test_requirements(mut self, requirements: RequirementTable) -> Self {
        self.test_requirements = requirements;
        self
    }

    /// Replace the rule table.
    pub fn with_rules(mut self, rules: SettingsTester) -> Self {
        self.rules = rules;
        self
    }

    /// Set the host argv.
    pub fn with_argv<I, S>(mut self, argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.argv = argv.into_iter().map(Into::into).collect();
        self
    }

    /// Hand a cache to the connection pool.
    pub fn with_cache(mut self, cache: Box<dyn CacheBackend>) -> Self {
        self.connections = ConnectionPool::with_cache(cache);
        self
    }

    /// The cache collaborator, if any.
    pub fn cache(&self) -> Option<&dyn CacheBackend> {
        self.connections.cache()
    }

    /// Whether the host process is a test run.
    pub fn is_test_run(&self) -> bool {
        self.argv.iter().any(|arg| arg == TEST_RUN_TOKEN)
    }
}

impl std::fmt::Debug for CheckContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckContext")
            .field("snapshot", &self.snapshot)
            .field("requirements", &self.requirements)
            .field("test_requirements", &self.test_requirements)
            .field("argv", &self.argv)
            .field("connections", &self.connections)
            .finish_non_exhaustive()
    }
}
