//! Error types and handling for the bundle locator
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Only a handful of conditions are fatal for a locate operation. Anything local
//! to a single package or file is reported through the diagnostics sink instead
//! (see [`crate::diagnostics`]). The sub-modules hold constructor helpers:
//! - [`bundle`]: Bundle lookup errors
//! - [`config`]: Configuration errors
//! - [`fs`]: File system errors
//! - [`ruleset`]: Ruleset loading errors

pub mod bundle;
pub mod config;
pub mod fs;
pub mod ruleset;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for locator operations
#[derive(Error, Diagnostic, Debug)]
pub enum LocatorError {
    // Root errors
    #[error("Root directory is not accessible: {path}")]
    #[diagnostic(
        code(bundle_locator::root::inaccessible),
        help("Check that the directory exists and is readable")
    )]
    RootInaccessible { path: String, reason: String },

    // Bundle errors
    #[error("Bundle '{name}' not found")]
    #[diagnostic(
        code(bundle_locator::bundle::not_found),
        help("Run 'bundle-locator list' to see the bundles that were located")
    )]
    BundleNotFound { name: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(bundle_locator::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(bundle_locator::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(bundle_locator::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(bundle_locator::config::invalid))]
    ConfigInvalid { message: String },

    // Ruleset errors
    #[error("Failed to parse rulesets file: {path}: {reason}")]
    #[diagnostic(
        code(bundle_locator::ruleset::parse_failed),
        help("A rulesets file maps ruleset names to objects with 'rules', 'bundles' and 'skip' lists")
    )]
    RulesetParseFailed { path: String, reason: String },

    #[error("Invalid pattern '{pattern}' in ruleset '{ruleset}': {reason}")]
    #[diagnostic(code(bundle_locator::ruleset::invalid_pattern))]
    InvalidPattern {
        ruleset: String,
        pattern: String,
        reason: String,
    },

    // File system errors
    #[error("IO error: {message}")]
    #[diagnostic(code(bundle_locator::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for LocatorError {
    fn from(err: std::io::Error) -> Self {
        LocatorError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for LocatorError {
    fn from(err: serde_yaml::Error) -> Self {
        LocatorError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for LocatorError {
    fn from(err: serde_json::Error) -> Self {
        LocatorError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, LocatorError>;
