//! Integration tests for the preflight binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn setup_project(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("preflight.yml"), config).unwrap();
    temp
}

fn preflight(dir: &std::path::Path) -> Command {
    let mut cmd = Command::new(cargo_bin("preflight"));
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("PREFLIGHT_CONFIG")
        .env_remove("PREFLIGHT_SKIP_SELF_TEST")
        .env_remove("RUST_LOG");
    cmd
}

const HEALTHY_CONFIG: &str = r#"
requirements:
  jinja2: "Jinja2>=2.10,<4"
  django: "django>=3.0,<5.0"
installed_file: requirements.lock
cache:
  backend: file
  location: .cache
settings:
  SECRET_KEY: "k9$2mQ!x"
  MEDIA_URL: /media/
  APP_URL_PREFIX: "forum/"
  MIDDLEWARE:
    - django.contrib.sessions.middleware.SessionMiddleware
    - django.middleware.common.CommonMiddleware
    - django.contrib.auth.middleware.AuthenticationMiddleware
  CACHE_MIDDLEWARE_ANONYMOUS_ONLY: true
  USE_I18N: true
  LOGIN_REDIRECT_URL: /forum/
  NOCAPTCHA: true
"#;

const LOCKFILE: &str = "# pip freeze\nJinja2==3.1.2\nDjango==4.2.1\n";

fn healthy_project() -> TempDir {
    let temp = setup_project(HEALTHY_CONFIG);
    fs::write(temp.path().join("requirements.lock"), LOCKFILE).unwrap();
    temp
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    preflight(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("configuration validation"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    preflight(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn check_passes_on_healthy_project() -> Result<(), Box<dyn std::error::Error>> {
    let temp = healthy_project();
    preflight(temp.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Self-test passed (12 checks)"));
    Ok(())
}

#[test]
fn no_subcommand_runs_check() -> Result<(), Box<dyn std::error::Error>> {
    let temp = healthy_project();
    preflight(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Self-test passed"));
    Ok(())
}

#[test]
fn unsatisfied_version_aborts_with_report() -> Result<(), Box<dyn std::error::Error>> {
    let temp = healthy_project();
    fs::write(
        temp.path().join("requirements.lock"),
        "Jinja2==3.1.2\nDjango==5.0.1\n",
    )?;

    preflight(temp.path())
        .arg("check")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Preflight self-test"))
        .stderr(predicate::str::contains("found version 5.0.1"))
        .stderr(predicate::str::contains("Ctrl-C").not());
    Ok(())
}

#[test]
fn missing_dependency_aborts() -> Result<(), Box<dyn std::error::Error>> {
    let temp = healthy_project();
    fs::write(temp.path().join("requirements.lock"), "Jinja2==3.1.2\n")?;

    preflight(temp.path())
        .arg("check")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("pip install django>=3.0,<5.0"));
    Ok(())
}

#[test]
fn settings_rules_are_batched() -> Result<(), Box<dyn std::error::Error>> {
    let config = HEALTHY_CONFIG
        .replace("  USE_I18N: true\n", "  USE_I18N: false\n")
        .replace("  NOCAPTCHA: true\n", "");
    let temp = setup_project(&config);
    fs::write(temp.path().join("requirements.lock"), LOCKFILE)?;

    preflight(temp.path())
        .arg("check")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Time to do some maintenance of your settings:",
        ))
        .stderr(predicate::str::contains("1. Please set USE_I18N"))
        .stderr(predicate::str::contains("2. Please add: NOCAPTCHA = True"));
    Ok(())
}

#[test]
fn disabled_self_test_skips_checks() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("self_test: false\nsettings: {}\n");
    preflight(temp.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Self-test disabled"));
    Ok(())
}

#[test]
fn disabled_self_test_skips_input_loading() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("self_test: false\ninstalled_file: missing.lock\n");
    preflight(temp.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Self-test disabled"));
    Ok(())
}

#[test]
fn skip_env_var_skips_checks() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("settings: {}\n");
    preflight(temp.path())
        .env("PREFLIGHT_SKIP_SELF_TEST", "true")
        .arg("check")
        .assert()
        .success();
    Ok(())
}

#[test]
fn test_run_enables_test_checks() -> Result<(), Box<dyn std::error::Error>> {
    let config = format!("{}test_requirements:\n  mock: \"mock>=4\"\n", HEALTHY_CONFIG);
    let temp = setup_project(&config);
    fs::write(temp.path().join("requirements.lock"), LOCKFILE)?;

    preflight(temp.path())
        .args(["check", "--", "manage.py", "runserver"])
        .assert()
        .success();

    preflight(temp.path())
        .args(["check", "--", "manage.py", "test"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("package 'mock' is not installed"));
    Ok(())
}

#[test]
fn missing_config_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    preflight(temp.path())
        .arg("check")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration not found"));
    Ok(())
}

#[test]
fn config_flag_overrides_discovery() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let path = temp.path().join("custom.yml");
    fs::write(&path, "self_test: false\n")?;

    preflight(temp.path())
        .args(["check", "--config"])
        .arg(&path)
        .assert()
        .success();
    Ok(())
}

#[test]
fn list_shows_checks_in_order() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    preflight(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?s)requirements-parser.*dependencies.*cache-backend.*test-runner-settings")?);
    Ok(())
}

#[test]
fn satisfies_reports_both_ways() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    preflight(temp.path())
        .args(["satisfies", "django>=3.0,<5.0", "4.2.1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4.2.1 satisfies django>=3.0,<5.0"));

    preflight(temp.path())
        .args(["satisfies", "pkg==2.4.2a", "2.4.2"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not satisfy"));
    Ok(())
}

#[test]
fn schema_is_json() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let output = preflight(temp.path()).arg("schema").output()?;
    assert!(output.status.success());
    let schema: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert!(schema["properties"]["requirements"].is_object());
    Ok(())
}
