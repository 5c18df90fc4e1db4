//! Package manifest (`package.json`) reading
//!
//! Only `name`, `version` and the `locator` section are read. A manifest that
//! is missing or does not parse means "this directory is not a package".

use std::path::Path;

use serde::Deserialize;

use super::SeedOptions;

/// File name of a package manifest
pub const MANIFEST_FILE: &str = "package.json";

/// The fields of a package manifest the locator cares about
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    /// Locator options declared by the package
    #[serde(default)]
    pub locator: Option<SeedOptions>,
}

impl PackageManifest {
    /// Parse a manifest from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Read the manifest of a package directory
    ///
    /// Returns `None` when the directory has no manifest, the manifest cannot
    /// be read or parsed, or it does not declare a name.
    pub fn read(dir: &Path) -> Option<Self> {
        let path = dir.join(MANIFEST_FILE);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::debug!(path = %path.display(), error = %e, "unreadable manifest");
                }
                return None;
            }
        };

        match Self::from_json(&content) {
            Ok(manifest) if manifest.name.as_deref().is_some_and(|n| !n.is_empty()) => {
                Some(manifest)
            }
            Ok(_) => {
                tracing::debug!(path = %path.display(), "manifest without a name");
                None
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "unparseable manifest");
                None
            }
        }
    }
}
