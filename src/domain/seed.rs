//! Bundle seeds
//!
//! A seed is what the package walker knows about a bundle before its
//! resources are classified: where it lives, what it is called, how deep in
//! the dependency tree it sits and which options apply to it.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{PackageManifest, SeedOptions};

/// Minimal identity of a candidate bundle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleSeed {
    /// Absolute, normalized bundle directory; unique within one walk
    pub base_directory: PathBuf,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Number of `node_modules` levels between the root and this bundle
    pub npm_depth: usize,

    /// Options after layering inherited and package-declared values
    pub options: SeedOptions,
}

impl BundleSeed {
    /// Build a seed from a directory, a fallback identity and an optional manifest
    ///
    /// The manifest's `name` and `version` replace the fallbacks. Its `locator`
    /// section is layered over `options` (the inherited options), so values a
    /// package declares itself always win. A `rulesets` location that is not
    /// anchored yet is anchored at `base_directory`.
    pub fn make(
        base_directory: impl Into<PathBuf>,
        name: impl Into<String>,
        version: Option<String>,
        manifest: Option<&PackageManifest>,
        options: Option<&SeedOptions>,
    ) -> Self {
        let base_directory = base_directory.into();
        let inherited = options.cloned().unwrap_or_default();
        let (name, version, mut options) = match manifest {
            Some(manifest) => (
                manifest.name.clone().unwrap_or_else(|| name.into()),
                manifest.version.clone().or(version),
                manifest
                    .locator
                    .as_ref()
                    .map_or_else(|| inherited.clone(), |declared| inherited.merge(declared)),
            ),
            None => (name.into(), version, inherited),
        };
        if options.rulesets.is_some() && options.rulesets_anchor.is_none() {
            options.rulesets_anchor = Some(base_directory.clone());
        }

        Self {
            base_directory,
            name,
            version,
            npm_depth: 0,
            options,
        }
    }

    /// Seed for a directory found by a ruleset's nested-bundle rule
    ///
    /// The bundle is named after its directory unless it carries its own
    /// manifest, and inherits the depth and options of `parent`.
    pub fn nested(dir: &Path, parent: &BundleSeed) -> Self {
        let fallback = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| parent.name.clone());
        let manifest = PackageManifest::read(dir);

        Self::make(
            dir,
            fallback,
            None,
            manifest.as_ref(),
            Some(&parent.options),
        )
        .at_depth(parent.npm_depth)
    }

    /// Same seed at another dependency depth
    #[must_use]
    pub fn at_depth(mut self, npm_depth: usize) -> Self {
        self.npm_depth = npm_depth;
        self
    }
}
