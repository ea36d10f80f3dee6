//! Preflight - configuration self-test for deployed applications.
//!
//! Before an application starts serving traffic, preflight runs an ordered
//! battery of checks against its settings, its installed dependencies and
//! its cache. Fatal findings stop the start-up with one aggregated report;
//! advisory findings are logged and the start-up continues.
//!
//! # Modules
//!
//! - [`checks`] - Check trait, ordered registry, runner and built-in checks
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and the settings snapshot
//! - [`diagnostic`] - Diagnostics, severities and report formatting
//! - [`driver`] - Top-level run with unconditional connection release
//! - [`error`] - Error types and result aliases
//! - [`requirements`] - Requirement parsing and version constraints
//! - [`rules`] - Declarative settings assertions
//! - [`services`] - Cache backends, probes and connection handles
//! - [`ui`] - Operator-facing output
//!
//! # Example
//!
//! ```
//! use preflight::checks::{CheckContext, CheckRegistry};
//! use preflight::config::Snapshot;
//! use preflight::driver::Driver;
//! use preflight::services::MemoryCache;
//!
//! let snapshot = Snapshot::new()
//!     .with("SECRET_KEY", "k9$2mQ!x")
//!     .with("MEDIA_URL", "/media/");
//! let mut ctx = CheckContext::new(snapshot).with_cache(Box::new(MemoryCache::new()));
//!
//! let mut report = Vec::new();
//! let outcome = Driver::new(true)
//!     .with_interactive(false)
//!     .run(&CheckRegistry::with_builtins(), &mut ctx, &mut report);
//!
//! // The default middleware stack is missing from this snapshot.
//! assert_eq!(outcome.exit_code(), 1);
//! assert!(String::from_utf8(report).unwrap().contains("middleware"));
//! assert!(ctx.connections.is_released());
//! ```

pub mod checks;
pub mod cli;
pub mod config;
pub mod diagnostic;
pub mod driver;
pub mod error;
pub mod requirements;
pub mod rules;
pub mod services;
pub mod ui;

pub use error::{PreflightError, Result};
