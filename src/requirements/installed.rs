//! Installed-version sources.
//!
//! The engine never inspects a package manager directly; it asks an
//! [`InstalledPackages`] implementation "which version of X is installed?".
//! [`PackageIndex`] answers from an in-memory table, usually read from a
//! pip-freeze style lock file:
//!
//! ```text
//! # generated by pip freeze
//! Django==4.2.1
//! jinja2==3.1.2
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{PreflightError, Result};

static SEPARATOR_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-_.]+").unwrap());

/// Normalize a package name for lookups.
///
/// Case is folded and runs of `-`, `_` and `.` collapse to a single `-`, so
/// `Django_Compressor` and `django-compressor` name the same package.
pub fn normalize_name(name: &str) -> String {
    SEPARATOR_RUN
        .replace_all(&name.trim().to_lowercase(), "-")
        .into_owned()
}

/// Something that can report installed package versions.
pub trait InstalledPackages {
    /// The installed version of `name`, or `None` if it is not installed.
    fn version(&self, name: &str) -> Option<String>;

    /// Whether `name` is installed at all.
    fn is_installed(&self, name: &str) -> bool {
        self.version(name).is_some()
    }
}

/// An in-memory table of installed packages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageIndex {
    packages: BTreeMap<String, String>,
}

impl PackageIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an installed package, replacing any earlier entry.
    pub fn insert(&mut self, name: &str, version: impl Into<String>) {
        self.packages.insert(normalize_name(name), version.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: &str, version: impl Into<String>) -> Self {
        self.insert(name, version);
        self
    }

    /// Merge another index into this one. Entries in `other` win.
    pub fn extend(&mut self, other: PackageIndex) {
        self.packages.extend(other.packages);
    }

    /// Parse pip-freeze style content.
    ///
    /// Blank lines, `#` comments and installer options (`-e`, `--index-url`)
    /// are skipped. Every other line must be `name==version`.
    pub fn parse_freeze(content: &str, source: &Path) -> Result<Self> {
        let mut index = Self::new();
        for (number, raw) in content.lines().enumerate() {
            let line = raw.split(" #").next().unwrap_or_default().trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('-') {
                continue;
            }

            let Some((name, version)) = line.split_once("==") else {
                return Err(PreflightError::InstalledParseError {
                    path: source.to_path_buf(),
                    line: number + 1,
                    message: format!("expected name==version, found '{}'", line),
                });
            };

            let version = version.split(';').next().unwrap_or_default().trim();
            if name.trim().is_empty() || version.is_empty() {
                return Err(PreflightError::InstalledParseError {
                    path: source.to_path_buf(),
                    line: number + 1,
                    message: format!("empty package name or version in '{}'", line),
                });
            }
            index.insert(name, version);
        }
        Ok(index)
    }

    /// Load an index from a freeze file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PreflightError::ConfigNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                PreflightError::Io(e)
            }
        })?;
        Self::parse_freeze(&content, path)
    }

    /// Number of recorded packages.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Iterate over `(normalized name, version)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.packages
            .iter()
            .map(|(name, version)| (name.as_str(), version.as_str()))
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for PackageIndex {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut index = Self::new();
        for (name, version) in iter {
            index.insert(name.as_ref(), version);
        }
        index
    }
}

impl InstalledPackages for PackageIndex {
    fn version(&self, name: &str) -> Option<String> {
        self.packages.get(&normalize_name(name)).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn normalize_folds_case_and_separators() {
        assert_eq!(normalize_name("Django_Compressor"), "django-compressor");
        assert_eq!(normalize_name("zope.interface"), "zope-interface");
        assert_eq!(normalize_name("a__-.b"), "a-b");
    }

    #[test]
    fn lookup_is_normalized() {
        let index = PackageIndex::new().with("Jinja2", "3.1.2");
        assert_eq!(index.version("jinja2"), Some("3.1.2".to_string()));
        assert!(index.is_installed("JINJA2"));
        assert!(!index.is_installed("celery"));
    }

    #[test]
    fn parse_freeze_skips_noise() {
        let content = "# pip freeze\n\n-e git+https://example.com/x.git#egg=x\nDjango==4.2.1\ncelery==5.3.1 # worker\n";
        let index = PackageIndex::parse_freeze(content, &PathBuf::from("req.lock")).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.version("django"), Some("4.2.1".to_string()));
        assert_eq!(index.version("celery"), Some("5.3.1".to_string()));
    }

    #[test]
    fn parse_freeze_strips_markers() {
        let index = PackageIndex::parse_freeze(
            "pywin32==306 ; sys_platform == 'win32'",
            &PathBuf::from("req.lock"),
        )
        .unwrap();
        assert_eq!(index.version("pywin32"), Some("306".to_string()));
    }

    #[test]
    fn parse_freeze_rejects_unpinned_lines() {
        let err = PackageIndex::parse_freeze("django>=3.0", &PathBuf::from("req.lock")).unwrap_err();
        match err {
            PreflightError::InstalledParseError { line, .. } => assert_eq!(line, 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn load_reads_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("requirements.lock");
        fs::write(&path, "redis==5.0.1\n").unwrap();

        let index = PackageIndex::load(&path).unwrap();
        assert_eq!(index.version("redis"), Some("5.0.1".to_string()));
    }

    #[test]
    fn load_missing_file_names_the_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.lock");

        let err = PackageIndex::load(&path).unwrap_err();
        assert!(matches!(err, PreflightError::ConfigNotFound { .. }));
        assert!(err.to_string().contains("missing.lock"));
    }

    #[test]
    fn extend_prefers_other() {
        let mut index = PackageIndex::new().with("django", "3.2");
        index.extend(PackageIndex::new().with("Django", "4.2"));
        assert_eq!(index.version("django"), Some("4.2".to_string()));
    }

    #[test]
    fn collects_from_pairs() {
        let index: PackageIndex = vec![("A", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(index.iter().collect::<Vec<_>>(), vec![("a", "1"), ("b", "2")]);
    }
}
