//! Located bundles

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use super::resource::{Resource, ResourceFilter, ResourceTree, TypeIndex};
use super::seed::BundleSeed;
use crate::config::SeedOptions;

/// Position of a bundle in a [`crate::locator::BundleIndex`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct BundleId(pub(crate) usize);

impl BundleId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BundleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A located bundle with its classified resources
///
/// Resources of nested child bundles are never part of the parent's tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Bundle {
    pub name: String,
    pub version: Option<String>,
    pub base_directory: PathBuf,
    pub npm_depth: usize,
    pub options: SeedOptions,

    /// Name of the ruleset that classified this bundle, `None` when unresolved
    pub ruleset: Option<String>,

    pub(crate) id: BundleId,
    pub(crate) parent: Option<BundleId>,
    /// Ordered by name, then base directory
    pub(crate) children: Vec<BundleId>,
    pub(crate) resources: ResourceTree,
}

impl Bundle {
    pub(crate) fn from_seed(
        id: BundleId,
        seed: &BundleSeed,
        ruleset: Option<String>,
        resources: ResourceTree,
    ) -> Self {
        Self {
            name: seed.name.clone(),
            version: seed.version.clone(),
            base_directory: seed.base_directory.clone(),
            npm_depth: seed.npm_depth,
            options: seed.options.clone(),
            ruleset,
            id,
            parent: None,
            children: Vec::new(),
            resources,
        }
    }

    pub fn id(&self) -> BundleId {
        self.id
    }

    pub fn parent_id(&self) -> Option<BundleId> {
        self.parent
    }

    pub fn child_ids(&self) -> &[BundleId] {
        &self.children
    }

    /// Wildcard resources merged with those of `selector`, restricted by `filter`
    pub fn get_resources(&self, filter: &ResourceFilter, selector: Option<&str>) -> TypeIndex {
        self.resources.merged(selector, filter)
    }

    /// Every resource of this bundle, ordered by relative path
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.resources.sorted_resources().into_iter()
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }
}
