//! Configuration file discovery and loading.
//!
//! This module finds `preflight.yml`, parses it, and resolves the files it
//! points at (settings snapshot, installed-package list) relative to the
//! directory the config file lives in.

use crate::config::schema::PreflightConfig;
use crate::config::snapshot::Snapshot;
use crate::error::{PreflightError, Result};
use crate::requirements::PackageIndex;
use std::fs;
use std::path::{Path, PathBuf};

/// File names searched for, in priority order.
pub const CONFIG_FILE_NAMES: &[&str] = &["preflight.yml", "preflight.yaml", ".preflight.yml"];

/// Find the config file in `project_root`.
pub fn find_config(project_root: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| project_root.join(name))
        .find(|path| path.is_file())
}

/// Read a file, mapping a missing file to `ConfigNotFound`.
fn read_config_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PreflightError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PreflightError::Io(e)
        }
    })
}

/// Parse YAML content into PreflightConfig.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<PreflightConfig> {
    if content.trim().is_empty() {
        return Ok(PreflightConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| PreflightError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// A parsed config file together with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The parsed configuration.
    pub config: PreflightConfig,
    /// Path of the config file.
    pub path: PathBuf,
}

impl LoadedConfig {
    /// Directory relative paths resolve against.
    pub fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Resolve a path from the config file against [`base_dir`](Self::base_dir).
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir().join(path)
        }
    }

    /// Build the settings snapshot.
    ///
    /// Reads `settings_file` when set, otherwise uses the inline `settings`.
    pub fn snapshot(&self) -> Result<Snapshot> {
        let Some(file) = &self.config.settings_file else {
            return Ok(self.config.settings.clone());
        };

        let path = self.resolve(file);
        let content = read_config_text(&path)?;
        if content.trim().is_empty() {
            return Ok(Snapshot::new());
        }
        serde_yaml::from_str(&content).map_err(|e| PreflightError::ConfigParseError {
            path,
            message: format!("settings file must be a mapping: {}", e),
        })
    }

    /// Build the installed-package index.
    ///
    /// Entries from `installed_file` are loaded first; inline `installed`
    /// entries override them.
    pub fn installed_packages(&self) -> Result<PackageIndex> {
        let mut index = match &self.config.installed_file {
            Some(file) => PackageIndex::load(&self.resolve(file))?,
            None => PackageIndex::new(),
        };
        index.extend(
            self.config
                .installed
                .iter()
                .map(|(name, version)| (name.as_str(), version.as_str()))
                .collect(),
        );
        Ok(index)
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<LoadedConfig> {
    let content = read_config_text(path)?;
    let config = parse_config(&content, path)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(LoadedConfig {
        config,
        path: path.to_path_buf(),
    })
}

/// Load config with optional path override.
///
/// If `config_override` is provided that file is loaded, otherwise the
/// config is discovered in `project_root`.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<LoadedConfig> {
    if let Some(path) = config_override {
        return load_config_file(path);
    }
    match find_config(project_root) {
        Some(path) => load_config_file(&path),
        None => Err(PreflightError::ConfigNotFound {
            path: project_root.join(CONFIG_FILE_NAMES[0]),
        }),
    }
}
