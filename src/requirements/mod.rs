//! Dependency declarations and version-constraint checking.
//!
//! This module answers one question: does the installed version of a
//! package satisfy the declared requirement? It checks, it never resolves
//! or installs.
//!
//! # Modules
//!
//! - [`spec`] - Requirement line parsing (`name[extras] op version, ...`)
//! - [`version`] - Version tuples and the two-phase comparator
//! - [`installed`] - Installed-version sources
//!
//! # Example
//!
//! ```
//! use preflight::requirements::{is_satisfied, parse_requirement};
//!
//! let req = parse_requirement("django>=3.0,<5.0").unwrap();
//! assert!(is_satisfied("4.2.1", &req));
//! assert!(!is_satisfied("5.0.0", &req));
//! ```

pub mod installed;
pub mod spec;
pub mod version;

pub use installed::{normalize_name, InstalledPackages, PackageIndex};
pub use spec::{
    parse_requirement, parse_requirements, Constraint, Operator, Requirement, RequirementError,
};
pub use version::{
    compare_versions, constraint_holds, failed_constraints, is_satisfied, Component,
    TypeConflict, VersionTuple,
};
