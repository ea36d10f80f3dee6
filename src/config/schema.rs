//! Configuration schema definitions for preflight.
//!
//! This module contains the struct definitions that map to the
//! `preflight.yml` file format.

use schemars::JsonSchema;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::rules::Rule;

use super::snapshot::Snapshot;

/// Root configuration structure for preflight.yml
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PreflightConfig {
    /// Run the self-test at all. Connections are released either way.
    #[serde(default = "default_true")]
    pub self_test: bool,

    /// Ordered logical name -> requirement line (`Jinja2>=2.10,<4`)
    #[schemars(with = "BTreeMap<String, String>")]
    pub requirements: RequirementTable,

    /// Requirements only checked on test runs
    #[schemars(with = "BTreeMap<String, String>")]
    pub test_requirements: RequirementTable,

    /// Inline installed versions; entries here win over `installed_file`
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub installed: BTreeMap<String, String>,

    /// pip-freeze style file listing installed versions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installed_file: Option<PathBuf>,

    /// Cache collaborator
    pub cache: CacheConfig,

    /// Declarative rule table; the built-in table is used when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<Rule>>,

    /// YAML file holding the settings snapshot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings_file: Option<PathBuf>,

    /// Inline settings snapshot, used when `settings_file` is not set
    #[schemars(with = "BTreeMap<String, serde_json::Value>")]
    pub settings: Snapshot,
}

impl Default for PreflightConfig {
    fn default() -> Self {
        Self {
            self_test: true,
            requirements: RequirementTable::default(),
            test_requirements: RequirementTable::default(),
            installed: BTreeMap::new(),
            installed_file: None,
            cache: CacheConfig::default(),
            rules: None,
            settings_file: None,
            settings: Snapshot::default(),
        }
    }
}

/// Cache collaborator settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CacheConfig {
    /// Backend identifier: `locmem`, `dummy`, `file`, or empty
    pub backend: String,

    /// Directory for the `file` backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            location: None,
        }
    }
}

fn default_backend() -> String {
    "locmem".to_string()
}

fn default_true() -> bool {
    true
}

/// Requirement lines keyed by logical name, in declaration order.
///
/// YAML mappings are ordered; a plain `HashMap` would lose the order the
/// operator wrote them in, and with it the order of the report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementTable(Vec<(String, String)>);

impl RequirementTable {
    /// Create a table from `(logical name, requirement line)` pairs.
    pub fn new(entries: Vec<(String, String)>) -> Self {
        Self(entries)
    }

    /// Iterate in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RequirementTable {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl Serialize for RequirementTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

impl<'de> Deserialize<'de> for RequirementTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = RequirementTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of logical names to requirement lines")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, line)) = map.next_entry::<String, String>()? {
                    entries.push((name, line));
                }
                Ok(RequirementTable(entries))
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(RequirementTable::default())
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleKind;

    #[test]
    fn defaults() {
        let config = PreflightConfig::default();
        assert!(config.self_test);
        assert_eq!(config.cache.backend, "locmem");
        assert!(config.rules.is_none());
        assert!(config.requirements.is_empty());
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config: PreflightConfig = serde_yaml::from_str("{}").unwrap();
        assert!(config.self_test);
        assert_eq!(config.cache.backend, "locmem");
    }

    #[test]
    fn requirements_keep_declaration_order() {
        let yaml = r#"
requirements:
  zeta: "zeta>=1"
  alpha: "alpha"
  mid: "mid==2.0"
"#;
        let config: PreflightConfig = serde_yaml::from_str(yaml).unwrap();
        let names: Vec<&str> = config.requirements.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn parses_rule_table() {
        let yaml = r#"
rules:
  - setting: USE_I18N
    expect: { equals: true }
    message: "Please set USE_I18N = true"
  - setting: LOGIN_REDIRECT_URL
    expect: present
    message: "add LOGIN_REDIRECT_URL"
  - setting: FILE_UPLOAD_DIR
    expect: { absent: { replace_hint: "with MEDIA_ROOT = '%s'" } }
    message: "Please replace FILE_UPLOAD_DIR "
"#;
        let config: PreflightConfig = serde_yaml::from_str(yaml).unwrap();
        let rules = config.rules.unwrap();
        assert_eq!(rules.len(), 3);
        assert_eq!(rules[0].kind, RuleKind::Equals(serde_yaml::Value::Bool(true)));
        assert_eq!(rules[1].kind, RuleKind::Present);
        assert!(matches!(
            rules[2].kind,
            RuleKind::Absent { replace_hint: Some(_) }
        ));
    }

    #[test]
    fn requirement_table_serializes_as_mapping() {
        let table: RequirementTable = vec![("b", "b>=1"), ("a", "a")].into_iter().collect();
        let yaml = serde_yaml::to_string(&table).unwrap();
        assert_eq!(yaml, "b: b>=1\na: a\n");
    }
}
