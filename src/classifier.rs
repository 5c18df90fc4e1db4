//! Resource classification for one bundle
//!
//! Walks the files of a bundle directory and files every one its ruleset
//! recognizes into a [`ResourceTree`]. Directories owned by someone else are
//! never entered: excluded names, `node_modules`, other package roots, skipped
//! paths and nested directory bundles (which are reported back instead).

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::config::LocatorConfig;
use crate::domain::{Resource, ResourceTree};
use crate::ruleset::Ruleset;

/// Classified resources of one bundle plus the nested bundles it contains
#[derive(Debug, Default)]
pub struct ClassifiedBundle {
    pub resources: ResourceTree,
    /// Absolute directories of nested directory bundles, in walk order
    pub nested: Vec<PathBuf>,
}

/// Applies rulesets to bundle directories
pub struct ResourceClassifier<'a> {
    config: &'a LocatorConfig,
    package_roots: &'a HashSet<PathBuf>,
}

impl<'a> ResourceClassifier<'a> {
    /// `package_roots` are the base directories of every package bundle
    pub fn new(config: &'a LocatorConfig, package_roots: &'a HashSet<PathBuf>) -> Self {
        Self {
            config,
            package_roots,
        }
    }

    /// Classify every file below `base_directory`
    pub fn classify(
        &self,
        base_directory: &Path,
        bundle_name: &str,
        ruleset: &Ruleset,
    ) -> ClassifiedBundle {
        let mut classified = ClassifiedBundle::default();
        let nested = &mut classified.nested;

        let walker = WalkDir::new(base_directory)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| self.enter(entry, base_directory, ruleset, nested));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!(bundle = bundle_name, error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(base_directory) else {
                continue;
            };
            let Some(classification) = ruleset.classify(relative) else {
                continue;
            };

            classified.resources.insert(Resource {
                bundle_name: bundle_name.to_string(),
                relative_path: relative.to_path_buf(),
                full_path: entry.path().to_path_buf(),
                resource_type: classification.resource_type,
                name: classification.name,
                affinity: classification.affinity,
                selector: classification.selector,
                ext: classification.ext,
                meta: classification.meta,
            });
        }

        classified
    }

    /// Whether the walk may yield or descend into `entry`
    fn enter(
        &self,
        entry: &DirEntry,
        base_directory: &Path,
        ruleset: &Ruleset,
        nested: &mut Vec<PathBuf>,
    ) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }

        let name = entry.file_name().to_string_lossy();
        if self.config.is_excluded(&name) || self.package_roots.contains(entry.path()) {
            return false;
        }

        let Ok(relative) = entry.path().strip_prefix(base_directory) else {
            return false;
        };
        if ruleset.is_skipped(relative) {
            return false;
        }
        if ruleset.is_bundle_root(relative) {
            nested.push(entry.path().to_path_buf());
            return false;
        }
        true
    }
}
