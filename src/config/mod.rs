//! Configuration loading for preflight.
//!
//! This module handles:
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - The read-only settings view in [`snapshot`]
//!
//! # Example
//!
//! ```
//! use preflight::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(
//!     temp.path().join("preflight.yml"),
//!     "settings:\n  SECRET_KEY: abc\n",
//! )
//! .unwrap();
//!
//! let loaded = load_config(temp.path(), None).unwrap();
//! let snapshot = loaded.snapshot().unwrap();
//! assert_eq!(snapshot.str("SECRET_KEY"), Some("abc"));
//! ```

pub mod loader;
pub mod schema;
pub mod snapshot;

pub use loader::{
    find_config, load_config, load_config_file, parse_config, LoadedConfig, CONFIG_FILE_NAMES,
};
pub use schema::{CacheConfig, PreflightConfig, RequirementTable};
pub use snapshot::{render_value, Snapshot};
