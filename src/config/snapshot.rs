//! Read-only view over the application's settings.
//!
//! A [`Snapshot`] is taken once before the checks run and never changes
//! afterwards. A missing key is `None`, which is different from a key that
//! is present with a false, empty or null value.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// Immutable key → value view of the active settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    values: Mapping,
}

impl Snapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing YAML mapping.
    pub fn from_mapping(values: Mapping) -> Self {
        Self { values }
    }

    /// Builder used to assemble snapshots in code.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.values.insert(Value::String(key.to_string()), value.into());
        self
    }

    /// The raw value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Whether `key` is present, whatever its value.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// The value under `key` if it is a string.
    pub fn str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// The value under `key` if it is a boolean.
    pub fn bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// The value under `key` if it is an integer.
    pub fn int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    /// The string items of a sequence under `key`.
    ///
    /// Non-string items are skipped. Returns `None` when the key is missing
    /// or not a sequence.
    pub fn string_list(&self, key: &str) -> Option<Vec<&str>> {
        self.get(key)
            .and_then(Value::as_sequence)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
    }

    /// Whether the sequence under `key` contains `item`.
    pub fn list_contains(&self, key: &str, item: &str) -> bool {
        self.string_list(key)
            .is_some_and(|items| items.contains(&item))
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().filter_map(Value::as_str)
    }

    /// Number of settings.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no settings.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Render a setting value the way an operator would type it.
///
/// Strings are shown bare, scalars in their YAML spelling and collections
/// as flow-style YAML.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
