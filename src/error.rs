//! Error types for preflight operations.
//!
//! This module defines [`PreflightError`], the error type used for everything
//! that happens *around* a validation run (loading the config file, reading
//! the installed-package index) and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Fatal validation findings are [`DiagnosticError`] values; they unwind
//!   only as far as the check runner and the driver
//! - Loading problems use the dedicated `PreflightError` variants
//! - Use `anyhow::Error` (via `PreflightError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

use crate::diagnostic::DiagnosticError;
use crate::requirements::RequirementError;

/// Core error type for preflight operations.
#[derive(Debug, Error)]
pub enum PreflightError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Failed to parse an installed-package (freeze) file.
    #[error("Failed to parse installed packages at {path}, line {line}: {message}")]
    InstalledParseError {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A requirement line given on the command line did not parse.
    #[error(transparent)]
    Requirement(#[from] RequirementError),

    /// A validation run aborted on a fatal diagnostic.
    #[error(transparent)]
    Fatal(#[from] DiagnosticError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for preflight operations.
pub type Result<T> = std::result::Result<T, PreflightError>;
