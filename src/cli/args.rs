//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Preflight - configuration self-test for deployed applications.
#[derive(Debug, Parser)]
#[command(name = "preflight")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides preflight.yml discovery)
    #[arg(short, long, global = true, env = "PREFLIGHT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the self-test (default if no command specified)
    Check(CheckArgs),

    /// List the built-in checks in execution order
    List,

    /// Test an installed version against a requirement line
    Satisfies(SatisfiesArgs),

    /// Print the JSON schema of preflight.yml
    Schema,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Skip the checks (connections are still released)
    #[arg(long, env = "PREFLIGHT_SKIP_SELF_TEST")]
    pub skip_self_test: bool,

    /// Arguments of the host process, e.g. `-- manage.py test`
    #[arg(last = true)]
    pub argv: Vec<String>,
}

/// Arguments for the `satisfies` command.
#[derive(Debug, Clone, clap::Args)]
pub struct SatisfiesArgs {
    /// Requirement line, e.g. "Jinja2>=2.10,<4"
    pub requirement: String,

    /// Installed version to test
    #[arg(id = "installed_version", value_name = "VERSION")]
    pub version: String,
}
