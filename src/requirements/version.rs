//! Version tuples and constraint satisfaction.
//!
//! Version strings are split on `.` and each component is read as an
//! integer when possible, text otherwise. Comparison happens in two phases:
//!
//! 1. Component-wise typed comparison (integers numerically, text
//!    lexicographically).
//! 2. If the first differing position pairs an integer with text, both
//!    tuples are re-derived as all-text and compared lexicographically.
//!
//! Phase 2 makes every pair of version strings comparable, but the result
//! is not a total order across a *set* of versions (`2 < 10` typed,
//! `"10" < "1a"` and `"1a" < "2"` as text), so [`VersionTuple`] does not
//! implement `Ord`.

use std::cmp::Ordering;
use std::fmt;

use super::spec::{Constraint, Requirement};

/// One dot-separated component of a version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Component {
    /// A component that parsed as an unsigned integer.
    Int(u64),
    /// Anything else (`"2a"`, `"rc1"`, `"post"`).
    Str(String),
}

impl Component {
    /// Parse a single component, preferring the integer reading.
    pub fn parse(text: &str) -> Self {
        match text.parse::<u64>() {
            Ok(n) => Component::Int(n),
            Err(_) => Component::Str(text.to_string()),
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Int(n) => write!(f, "{}", n),
            Component::Str(s) => f.write_str(s),
        }
    }
}

/// The typed comparison hit an integer and a string at the same position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeConflict {
    /// Zero-based component index of the conflict.
    pub position: usize,
}

/// A parsed version string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionTuple(Vec<Component>);

impl VersionTuple {
    /// Split a version string on `.` and parse each component.
    pub fn parse(version: &str) -> Self {
        Self(version.trim().split('.').map(Component::parse).collect())
    }

    /// The parsed components.
    pub fn components(&self) -> &[Component] {
        &self.0
    }

    /// Every component rendered as text.
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(|c| c.to_string()).collect()
    }

    /// Compare component-wise without coercion.
    ///
    /// Fails if the first non-equal position holds an integer on one side
    /// and a string on the other.
    pub fn typed_cmp(&self, other: &Self) -> Result<Ordering, TypeConflict> {
        for (position, (a, b)) in self.0.iter().zip(other.0.iter()).enumerate() {
            let ordering = match (a, b) {
                (Component::Int(x), Component::Int(y)) => x.cmp(y),
                (Component::Str(x), Component::Str(y)) => x.cmp(y),
                _ => return Err(TypeConflict { position }),
            };
            if ordering != Ordering::Equal {
                return Ok(ordering);
            }
        }
        Ok(self.0.len().cmp(&other.0.len()))
    }

    /// Two-phase comparison: typed first, all-string on a type conflict.
    pub fn compare(&self, other: &Self) -> Ordering {
        match self.typed_cmp(other) {
            Ok(ordering) => ordering,
            Err(conflict) => {
                tracing::trace!(
                    position = conflict.position,
                    "mixed version components, comparing as text"
                );
                self.to_strings().cmp(&other.to_strings())
            }
        }
    }
}

impl fmt::Display for VersionTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_strings().join("."))
    }
}

/// Compare two version strings with the two-phase comparator.
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use preflight::requirements::compare_versions;
///
/// assert_eq!(compare_versions("2.10.0", "2.9.9"), Ordering::Greater);
/// assert_eq!(compare_versions("2.4.2", "2.4.2a"), Ordering::Less);
/// ```
pub fn compare_versions(installed: &str, required: &str) -> Ordering {
    VersionTuple::parse(installed).compare(&VersionTuple::parse(required))
}

/// Whether `installed` satisfies a single constraint.
pub fn constraint_holds(installed: &str, constraint: &Constraint) -> bool {
    constraint
        .op
        .holds(compare_versions(installed, &constraint.version))
}

/// The constraints of `requirement` that `installed` fails, in order.
pub fn failed_constraints<'a>(installed: &str, requirement: &'a Requirement) -> Vec<&'a Constraint> {
    requirement
        .constraints
        .iter()
        .filter(|c| !constraint_holds(installed, c))
        .collect()
}

/// Whether `installed` satisfies every constraint of `requirement`.
///
/// A requirement without constraints is satisfied by any version.
pub fn is_satisfied(installed: &str, requirement: &Requirement) -> bool {
    requirement
        .constraints
        .iter()
        .all(|c| constraint_holds(installed, c))
}
