//! Requirement declarations.
//!
//! A requirement is a pip-style dependency line: a package name, optional
//! extras in square brackets, and zero or more comma-separated version
//! constraints.
//!
//! ```text
//! Jinja2 [i18n] >= 2.10, < 4
//! ^name  ^extras ^constraint ^constraint
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*").unwrap());

static CONSTRAINT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<op>[<>=!~]+)\s*(?P<version>[A-Za-z0-9.*+!_-]+)$").unwrap()
});

/// Errors produced while parsing a requirement line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequirementError {
    /// The operator is not one this engine evaluates.
    #[error("Unsupported dependency version operator '{op}' in '{line}'")]
    UnsupportedOperator { op: String, line: String },

    /// The line does not follow `name[extras] op version, ...`.
    #[error("Malformed requirement '{line}': {message}")]
    Malformed { line: String, message: String },
}

impl RequirementError {
    fn malformed(line: &str, message: impl Into<String>) -> Self {
        RequirementError::Malformed {
            line: line.to_string(),
            message: message.into(),
        }
    }
}

/// A version comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `==`
    Eq,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>=`
    Ge,
}

impl Operator {
    /// The operator's source spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Ge => ">=",
        }
    }

    /// Whether `installed <op> required` holds given how the two compare.
    pub fn holds(&self, ordering: std::cmp::Ordering) -> bool {
        use std::cmp::Ordering::*;
        match self {
            Operator::Eq => ordering == Equal,
            Operator::Gt => ordering == Greater,
            Operator::Lt => ordering == Less,
            Operator::Le => ordering != Greater,
            Operator::Ge => ordering != Less,
        }
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "==" => Ok(Operator::Eq),
            ">" => Ok(Operator::Gt),
            "<" => Ok(Operator::Lt),
            "<=" => Ok(Operator::Le),
            ">=" => Ok(Operator::Ge),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `(operator, version)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    /// How the installed version must compare.
    pub op: Operator,
    /// The version on the right-hand side.
    pub version: String,
}

impl Constraint {
    /// Create a new constraint.
    pub fn new(op: Operator, version: impl Into<String>) -> Self {
        Self {
            op,
            version: version.into(),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op, self.version)
    }
}

/// A parsed dependency declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Package name as written.
    pub name: String,
    /// Optional extras (`pkg[extra1,extra2]`).
    pub extras: Vec<String>,
    /// Constraints that must all hold.
    pub constraints: Vec<Constraint>,
}

impl Requirement {
    /// A requirement on `name` with no version constraints.
    pub fn unconstrained(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extras: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Whether any version of the package is acceptable.
    pub fn is_unconstrained(&self) -> bool {
        self.constraints.is_empty()
    }
}

impl FromStr for Requirement {
    type Err = RequirementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_requirement(s)
    }
}

/// Renders the requirement the way it is passed to an installer:
/// `name`, then constraints joined by `,`, then ` [extras]`.
impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        let specs: Vec<String> = self.constraints.iter().map(|c| c.to_string()).collect();
        f.write_str(&specs.join(","))?;
        if !self.extras.is_empty() {
            write!(f, " [{}]", self.extras.join(","))?;
        }
        Ok(())
    }
}

/// Parse a single requirement line.
///
/// Environment markers (anything after `;`) are ignored.
///
/// # Example
///
/// ```
/// use preflight::requirements::{parse_requirement, Operator};
///
/// let req = parse_requirement("django>=3.0,<5.0").unwrap();
/// assert_eq!(req.name, "django");
/// assert_eq!(req.constraints.len(), 2);
/// assert_eq!(req.constraints[1].op, Operator::Lt);
/// ```
pub fn parse_requirement(text: &str) -> Result<Requirement, RequirementError> {
    let line = text.trim();
    let without_markers = line.split(';').next().unwrap_or_default().trim();

    let name_match = NAME_REGEX
        .find(without_markers)
        .ok_or_else(|| RequirementError::malformed(line, "missing package name"))?;
    let name = name_match.as_str().to_string();
    let mut rest = without_markers[name_match.end()..].to_string();

    let mut extras = Vec::new();
    if let Some(open) = rest.find('[') {
        let close = rest[open..]
            .find(']')
            .map(|offset| open + offset)
            .ok_or_else(|| RequirementError::malformed(line, "unterminated extras"))?;
        extras = rest[open + 1..close]
            .split(',')
            .map(str::trim)
            .filter(|extra| !extra.is_empty())
            .map(String::from)
            .collect();
        rest.replace_range(open..=close, "");
    }

    let rest = rest.trim();
    let mut constraints = Vec::new();
    if !rest.is_empty() {
        for part in rest.split(',') {
            constraints.push(parse_constraint(part.trim(), line)?);
        }
    }

    Ok(Requirement {
        name,
        extras,
        constraints,
    })
}

fn parse_constraint(part: &str, line: &str) -> Result<Constraint, RequirementError> {
    if part.is_empty() {
        return Err(RequirementError::malformed(line, "empty version specifier"));
    }

    let Some(caps) = CONSTRAINT_REGEX.captures(part) else {
        let starts_with_operator = part
            .chars()
            .next()
            .is_some_and(|c| "<>=!~".contains(c));
        let message = if starts_with_operator {
            format!("invalid version in '{}'", part)
        } else {
            format!("expected a version operator before '{}'", part)
        };
        return Err(RequirementError::malformed(line, message));
    };

    let op_token = &caps["op"];
    let op = op_token
        .parse::<Operator>()
        .map_err(|op| RequirementError::UnsupportedOperator {
            op,
            line: line.to_string(),
        })?;

    Ok(Constraint::new(op, &caps["version"]))
}

/// Parse one requirement per line, skipping blank lines and `#` comments.
pub fn parse_requirements(text: &str) -> Result<Vec<Requirement>, RequirementError> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(parse_requirement)
        .collect()
}
