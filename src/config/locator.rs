//! Locator configuration (`locator.yaml`)
//!
//! Everything here is immutable for the duration of a locate operation and
//! may be shared between concurrent invocations.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::SeedOptions;
use crate::error::{Result, config as config_error};

/// Directory name that is never classified as bundle content
pub const PACKAGES_DIR: &str = "node_modules";

/// Configuration of a [`crate::locator::BundleLocator`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocatorConfig {
    /// Application directory anchoring app-level ruleset lookups
    ///
    /// Defaults to the directory passed to `parse_bundle`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_directory: Option<PathBuf>,

    /// Directory names skipped while classifying resources (e.g. `build`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,

    /// Deepest `node_modules` nesting level that is walked; `0` walks only the root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_package_depth: Option<usize>,

    /// Ruleset name applied to the root bundle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ruleset: Option<String>,

    /// Rulesets file location applied to the root bundle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rulesets: Option<String>,
}

impl LocatorConfig {
    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    ///
    /// A relative `applicationDirectory` is resolved against the directory
    /// containing the file.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(config_error::not_found(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| config_error::read_failed(path.display().to_string(), e.to_string()))?;

        let mut config: Self = serde_yaml::from_str(&content)
            .map_err(|e| config_error::parse_failed(path.display().to_string(), e.to_string()))?;
        config.validate()?;

        if let (Some(app_dir), Some(parent)) = (&config.application_directory, path.parent()) {
            if app_dir.is_relative() {
                config.application_directory = Some(parent.join(app_dir));
            }
        }

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        for name in &self.exclude {
            if name.is_empty() || name.contains('/') || name.contains('\\') {
                return Err(config_error::invalid(format!(
                    "exclude entries must be plain directory names, got '{name}'"
                )));
            }
        }

        if self.ruleset.as_deref().is_some_and(str::is_empty) {
            return Err(config_error::invalid("ruleset name must not be empty"));
        }

        Ok(())
    }

    /// Add an excluded directory name
    #[must_use]
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.exclude.push(name.into());
        self
    }

    /// Limit the walk to `depth` levels of nested packages
    #[must_use]
    pub fn max_package_depth(mut self, depth: usize) -> Self {
        self.max_package_depth = Some(depth);
        self
    }

    /// Set the application directory
    #[must_use]
    pub fn application_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.application_directory = Some(dir.into());
        self
    }

    /// Whether a directory name is excluded from classification
    pub fn is_excluded(&self, dir_name: &str) -> bool {
        dir_name == PACKAGES_DIR || self.exclude.iter().any(|e| e == dir_name)
    }

    /// Root-level options derived from this configuration
    pub fn seed_options(&self) -> SeedOptions {
        SeedOptions {
            ruleset: self.ruleset.clone(),
            rulesets: self.rulesets.clone(),
            ..SeedOptions::default()
        }
    }
}
