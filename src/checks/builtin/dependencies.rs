//! Requirement checks.
//!
//! Declared requirements are parsed first, then looked up in the
//! installed-version source, then compared against their constraints.

use crate::checks::{Check, CheckContext, CheckResult};
use crate::config::RequirementTable;
use crate::diagnostic::{Diagnostic, DiagnosticError, DiagnosticKind};
use crate::requirements::{failed_constraints, parse_requirement, InstalledPackages, Requirement};

/// Footer shown under missing runtime dependencies.
pub const INSTALL_ALL_HINT: &str =
    "To install all the dependencies at once, type:\npip install -r requirements.txt";

/// Footer shown under missing test dependencies.
pub const TEST_DEPENDENCY_HINT: &str =
    "These packages are required for running the test suite.";

/// Parse every line of a requirement table.
///
/// All malformed lines are reported together.
fn parse_table(table: &RequirementTable) -> Result<Vec<Requirement>, DiagnosticError> {
    let mut parsed = Vec::with_capacity(table.len());
    let mut errors = Vec::new();

    for (logical, line) in table.iter() {
        match parse_requirement(line) {
            Ok(requirement) => parsed.push(requirement),
            Err(e) => errors.push(format!("requirement '{}': {}", logical, e)),
        }
    }

    Diagnostic::fatal(DiagnosticKind::Parse, errors)
        .with_header("Some declared requirements could not be parsed.")
        .into_result()?;
    Ok(parsed)
}

fn missing_message(requirement: &Requirement) -> String {
    format!(
        "Error: package '{}' is not installed\n\nPlease run: >pip install {}",
        requirement.name, requirement
    )
}

fn unsatisfied_message(requirement: &Requirement, found: &str) -> String {
    format!(
        "Unsupported version of module {name},\n\
         found version {found}, {spec} required.\n\
         please run:\n\
         > pip uninstall '{name}' && pip install '{spec}'",
        name = requirement.name,
        found = found,
        spec = requirement,
    )
}

/// Verify presence first, then versions.
///
/// Missing packages are reported before version mismatches because a
/// mismatch report for a package that is not there would be noise.
fn verify_installed(
    requirements: &[Requirement],
    installed: &dyn InstalledPackages,
    missing_footer: &str,
) -> Result<(), DiagnosticError> {
    let mut missing = Vec::new();
    let mut unsatisfied = Vec::new();

    for requirement in requirements {
        match installed.version(&requirement.name) {
            None => missing.push(missing_message(requirement)),
            Some(found) => {
                let failed = failed_constraints(&found, requirement);
                if !failed.is_empty() {
                    tracing::debug!(
                        "{} {} fails {} constraint(s)",
                        requirement.name,
                        found,
                        failed.len()
                    );
                    unsatisfied.push(unsatisfied_message(requirement, &found));
                }
            }
        }
    }

    Diagnostic::fatal(DiagnosticKind::MissingDependency, missing)
        .with_footer(missing_footer)
        .into_result()?;
    Diagnostic::fatal(DiagnosticKind::UnsatisfiedConstraint, unsatisfied).into_result()
}

/// Every configured requirement line parses.
pub struct RequirementsParserCheck;

impl Check for RequirementsParserCheck {
    fn name(&self) -> &str {
        "requirements-parser"
    }

    fn description(&self) -> &str {
        "Declared requirement lines are well formed"
    }

    fn run(&self, ctx: &CheckContext) -> CheckResult {
        parse_table(&ctx.requirements)?;
        parse_table(&ctx.test_requirements)?;
        Ok(Vec::new())
    }
}

/// Runtime dependencies are installed at acceptable versions.
pub struct DependenciesCheck;

impl Check for DependenciesCheck {
    fn name(&self) -> &str {
        "dependencies"
    }

    fn description(&self) -> &str {
        "Required packages are installed and satisfy their version constraints"
    }

    fn run(&self, ctx: &CheckContext) -> CheckResult {
        let requirements = parse_table(&ctx.requirements)?;
        verify_installed(&requirements, ctx.installed.as_ref(), INSTALL_ALL_HINT)?;
        Ok(Vec::new())
    }
}

/// Test-only dependencies are installed, on test runs.
pub struct TestDependenciesCheck;

impl Check for TestDependenciesCheck {
    fn name(&self) -> &str {
        "test-dependencies"
    }

    fn description(&self) -> &str {
        "Test-only packages are installed when running the test suite"
    }

    fn run(&self, ctx: &CheckContext) -> CheckResult {
        if !ctx.is_test_run() {
            return Ok(Vec::new());
        }
        let requirements = parse_table(&ctx.test_requirements)?;
        verify_installed(&requirements, ctx.installed.as_ref(), TEST_DEPENDENCY_HINT)?;
        Ok(Vec::new())
    }
}
