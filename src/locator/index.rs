//! The result of one locate operation
//!
//! Bundles live in an arena addressed by [`BundleId`]. The index is fully
//! built by [`IndexBuilder`] and never changes afterwards.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::ownership::OwnershipIndex;
use crate::common::path_util;
use crate::config::SeedOptions;
use crate::diagnostics::{DiagnosticsSink, LocatorEvent};
use crate::domain::{Bundle, BundleId, BundleSeed, Resource, ResourceFilter, ResourceTree};

/// Queryable tree of located bundles
#[derive(Debug, Clone, PartialEq)]
pub struct BundleIndex {
    bundles: Vec<Bundle>,
    root: BundleId,
    by_name: BTreeMap<String, BundleId>,
    ownership: OwnershipIndex,
}

impl BundleIndex {
    pub fn root_bundle(&self) -> &Bundle {
        &self.bundles[self.root.0]
    }

    pub fn bundle(&self, id: BundleId) -> Option<&Bundle> {
        self.bundles.get(id.0)
    }

    /// Bundle registered under `name`; the first one located wins
    pub fn get_bundle(&self, name: &str) -> Option<&Bundle> {
        self.by_name.get(name).and_then(|id| self.bundle(*id))
    }

    /// Direct children of `bundle`, ordered by name
    pub fn children<'a>(&'a self, bundle: &'a Bundle) -> impl Iterator<Item = &'a Bundle> + 'a {
        bundle.children.iter().filter_map(|id| self.bundle(*id))
    }

    pub fn parent(&self, bundle: &Bundle) -> Option<&Bundle> {
        bundle.parent.and_then(|id| self.bundle(id))
    }

    /// Every bundle, root first, children by name
    pub fn bundles(&self) -> Vec<&Bundle> {
        let mut ordered = Vec::with_capacity(self.bundles.len());
        self.preorder(self.root_bundle(), &mut ordered);
        ordered
    }

    fn preorder<'a>(&'a self, bundle: &'a Bundle, out: &mut Vec<&'a Bundle>) {
        out.push(bundle);
        for child in self.children(bundle) {
            self.preorder(child, out);
        }
    }

    /// Registered bundle names, sorted, optionally restricted by `predicate`
    pub fn list_bundle_names(&self, predicate: Option<&dyn Fn(&Bundle) -> bool>) -> Vec<String> {
        self.by_name
            .iter()
            .filter(|(_, id)| {
                self.bundle(**id)
                    .is_some_and(|bundle| predicate.is_none_or(|keep| keep(bundle)))
            })
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Resources of every bundle in tree order, each bundle's sorted by path
    pub fn list_all_resources(&self, filter: &ResourceFilter) -> Vec<&Resource> {
        self.bundles()
            .into_iter()
            .flat_map(Bundle::resources)
            .filter(|resource| filter.matches(resource))
            .collect()
    }

    /// Name of the bundle owning `path`
    ///
    /// Relative paths are taken relative to the root bundle. Paths outside
    /// every bundle belong to the root.
    pub fn bundle_name_by_path(&self, path: &Path) -> &str {
        let root = self.root_bundle();
        let absolute = path_util::normalize(&root.base_directory.join(path));
        self.ownership
            .owner(&absolute)
            .and_then(|id| self.bundle(id))
            .unwrap_or(root)
            .name
            .as_str()
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    /// Serializable view of the tree below `bundle`
    pub fn view<'a>(&'a self, bundle: &'a Bundle) -> BundleView<'a> {
        BundleView {
            name: &bundle.name,
            version: bundle.version.as_deref(),
            base_directory: &bundle.base_directory,
            npm_depth: bundle.npm_depth,
            ruleset: bundle.ruleset.as_deref(),
            options: &bundle.options,
            resources: bundle.resources().collect(),
            children: self.children(bundle).map(|child| self.view(child)).collect(),
        }
    }
}

/// JSON shape of a bundle and its subtree
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleView<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<&'a str>,
    pub base_directory: &'a Path,
    pub npm_depth: usize,
    pub ruleset: Option<&'a str>,
    #[serde(skip_serializing_if = "no_options")]
    pub options: &'a SeedOptions,
    pub resources: Vec<&'a Resource>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BundleView<'a>>,
}

fn no_options(options: &&SeedOptions) -> bool {
    options.is_empty()
}

/// Assembles a [`BundleIndex`] bundle by bundle
pub(crate) struct IndexBuilder<'a> {
    bundles: Vec<Bundle>,
    by_name: BTreeMap<String, BundleId>,
    sink: &'a dyn DiagnosticsSink,
}

impl<'a> IndexBuilder<'a> {
    pub(crate) fn new(sink: &'a dyn DiagnosticsSink) -> Self {
        Self {
            bundles: Vec::new(),
            by_name: BTreeMap::new(),
            sink,
        }
    }

    /// Most specific bundle built so far whose directory contains `dir`
    pub(crate) fn container_of(&self, dir: &Path) -> Option<BundleId> {
        self.bundles
            .iter()
            .filter(|bundle| path_util::is_strictly_within(dir, &bundle.base_directory))
            .max_by_key(|bundle| bundle.base_directory.components().count())
            .map(Bundle::id)
    }

    /// Register a bundle under `parent`
    pub(crate) fn add(
        &mut self,
        seed: &BundleSeed,
        parent: Option<BundleId>,
        ruleset: Option<String>,
        resources: ResourceTree,
    ) -> BundleId {
        let id = BundleId(self.bundles.len());
        let mut bundle = Bundle::from_seed(id, seed, ruleset, resources);
        bundle.parent = parent;

        match self.by_name.get(&seed.name).and_then(|kept| self.bundles.get(kept.0)) {
            Some(kept) => self.sink.record(LocatorEvent::DuplicateBundle {
                name: seed.name.clone(),
                kept: kept.base_directory.clone(),
                ignored: seed.base_directory.clone(),
            }),
            None => {
                self.by_name.insert(seed.name.clone(), id);
            }
        }

        if let Some(parent) = parent.and_then(|p| self.bundles.get_mut(p.0)) {
            parent.children.push(id);
        }
        self.bundles.push(bundle);
        id
    }

    /// Finish the index; the first bundle added is the root
    pub(crate) fn finish(mut self) -> Option<BundleIndex> {
        if self.bundles.is_empty() {
            return None;
        }

        let keys: Vec<(String, PathBuf)> = self
            .bundles
            .iter()
            .map(|b| (b.name.clone(), b.base_directory.clone()))
            .collect();
        for bundle in &mut self.bundles {
            bundle.children.sort_by(|a, b| keys[a.0].cmp(&keys[b.0]));
        }

        let ownership = OwnershipIndex::new(
            self.bundles
                .iter()
                .map(|b| (b.base_directory.clone(), b.id)),
        );

        Some(BundleIndex {
            bundles: self.bundles,
            root: BundleId(0),
            by_name: self.by_name,
            ownership,
        })
    }
}
