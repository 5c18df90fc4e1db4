//! Configuration handling for the locator
//!
//! This module contains data structures for:
//! - `locator.yaml` - Locator configuration
//! - `package.json` - Package manifests (name, version, `locator` section)
//! - Layered per-bundle locator options

pub mod locator;
pub mod manifest;
pub mod options;

// Re-export commonly used types
pub use locator::{LocatorConfig, PACKAGES_DIR};
pub use manifest::{MANIFEST_FILE, PackageManifest};
pub use options::SeedOptions;
