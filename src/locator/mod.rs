//! Bundle location
//!
//! [`BundleLocator::parse_bundle`] walks the package tree below a root,
//! drops duplicate packages, resolves a ruleset per bundle, classifies
//! resources and assembles the result into a [`BundleIndex`].
//!
//! The locator keeps only its configuration and diagnostics sink; every
//! invocation builds its own seeds, ruleset cache and arena, so one locator
//! can serve concurrent callers.

pub mod index;
pub mod ownership;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::classifier::ResourceClassifier;
use crate::common::path_util;
use crate::config::{LocatorConfig, SeedOptions};
use crate::diagnostics::{DiagnosticsSink, TracingSink};
use crate::discovery::{self, PackageWalker};
use crate::domain::{BundleId, BundleSeed};
use crate::error::{Result, bundle as bundle_error};
use crate::ruleset::RulesetResolver;

pub use index::{BundleIndex, BundleView};
use index::IndexBuilder;
pub use ownership::OwnershipIndex;

/// Locates bundles and their resources
#[derive(Clone)]
pub struct BundleLocator {
    config: LocatorConfig,
    sink: Arc<dyn DiagnosticsSink>,
}

impl std::fmt::Debug for BundleLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BundleLocator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl BundleLocator {
    /// Locator reporting events through `tracing`
    pub fn new(config: LocatorConfig) -> Self {
        Self::with_sink(config, Arc::new(TracingSink))
    }

    pub fn with_sink(config: LocatorConfig, sink: Arc<dyn DiagnosticsSink>) -> Self {
        Self { config, sink }
    }

    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// Locate every bundle below `root`
    ///
    /// `options` are layered over the configuration's root options. Fails
    /// only when `root` is not an accessible directory.
    pub fn parse_bundle(&self, root: &Path, options: Option<&SeedOptions>) -> Result<BundleIndex> {
        let root = self.normalize_root(root)?;
        let app_dir = self
            .config
            .application_directory
            .as_deref()
            .map_or_else(|| root.clone(), path_util::normalize);

        let seeds = self.filter_seeds(self.walk(&root, options));
        tracing::debug!(root = %root.display(), bundles = seeds.len(), "located packages");

        let package_roots: HashSet<PathBuf> =
            seeds.iter().map(|s| s.base_directory.clone()).collect();
        let mut build = Build {
            resolver: RulesetResolver::new(app_dir, self.sink.as_ref()),
            classifier: ResourceClassifier::new(&self.config, &package_roots),
            builder: IndexBuilder::new(self.sink.as_ref()),
        };

        for seed in &seeds {
            let parent = build.builder.container_of(&seed.base_directory);
            build.add(seed, parent);
        }

        build.builder.finish().ok_or_else(|| {
            bundle_error::root_inaccessible(root.display().to_string(), "no bundle was located")
        })
    }

    /// Seeds of every package below `root`, duplicates included
    pub fn walk_packages(&self, root: &Path, options: Option<&SeedOptions>) -> Result<Vec<BundleSeed>> {
        let root = self.normalize_root(root)?;
        Ok(self.walk(&root, options))
    }

    /// Drop duplicate packages, reporting each duplicated name once
    pub fn filter_seeds(&self, seeds: Vec<BundleSeed>) -> Vec<BundleSeed> {
        discovery::filter_seeds(seeds, self.sink.as_ref())
    }

    fn walk(&self, root: &Path, options: Option<&SeedOptions>) -> Vec<BundleSeed> {
        let options = match options {
            Some(options) => self.config.seed_options().merge(options),
            None => self.config.seed_options(),
        };
        PackageWalker::new(self.config.max_package_depth).walk(root, &options)
    }

    fn normalize_root(&self, root: &Path) -> Result<PathBuf> {
        path_util::canonical_dir(root)
            .map_err(|e| bundle_error::root_inaccessible(root.display().to_string(), e.to_string()))
    }
}

/// Per-invocation state of `parse_bundle`
struct Build<'a> {
    resolver: RulesetResolver<'a>,
    classifier: ResourceClassifier<'a>,
    builder: IndexBuilder<'a>,
}

impl Build<'_> {
    /// Classify `seed`, register it, then do the same for its nested directory bundles
    fn add(&mut self, seed: &BundleSeed, parent: Option<BundleId>) {
        let ruleset = self.resolver.resolve(seed);
        let classified = ruleset
            .as_ref()
            .map(|ruleset| {
                self.classifier
                    .classify(&seed.base_directory, &seed.name, ruleset)
            })
            .unwrap_or_default();

        let id = self.builder.add(
            seed,
            parent,
            ruleset.map(|r| r.name().to_string()),
            classified.resources,
        );

        for dir in &classified.nested {
            self.add(&BundleSeed::nested(dir, seed), Some(id));
        }
    }
}
