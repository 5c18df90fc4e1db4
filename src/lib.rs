//! Bundle locator
//!
//! Locates the bundles of an application (the application itself, the
//! packages installed below it in `node_modules`, and directory bundles such
//! as `mojits/*`) and classifies the files of each bundle into typed
//! resources according to pluggable rulesets.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use bundle_locator::config::LocatorConfig;
//! use bundle_locator::domain::ResourceFilter;
//! use bundle_locator::locator::BundleLocator;
//!
//! let locator = BundleLocator::new(LocatorConfig::default().exclude("build"));
//! let index = locator.parse_bundle(Path::new("."), None)?;
//! for resource in index.list_all_resources(&ResourceFilter::extension("js")) {
//!     println!("{} {}", resource.bundle_name, resource.relative_path.display());
//! }
//! # Ok::<(), bundle_locator::error::LocatorError>(())
//! ```

pub mod classifier;
pub mod common;
pub mod config;
pub mod diagnostics;
pub mod discovery;
pub mod domain;
pub mod error;
pub mod locator;
pub mod ruleset;

#[cfg(test)]
mod test_fixtures;

pub use config::{LocatorConfig, SeedOptions};
pub use diagnostics::{DiagnosticsSink, LocatorEvent, RecordingSink};
pub use domain::{Bundle, BundleSeed, Resource, ResourceFilter};
pub use error::{LocatorError, Result};
pub use locator::{BundleIndex, BundleLocator};
