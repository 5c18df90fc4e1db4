//! Classified resources and the per-bundle resource tree
//!
//! A **Resource** is one file of a bundle that a ruleset classified. Resources
//! are filed under `selector -> type -> name segments`. Several resources may
//! end at the same node (different affinities, or different extensions of the
//! same name); nodes keep all of them, so merging never overwrites.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::common::path_util;

/// Selector under which resources apply universally
pub const WILDCARD_SELECTOR: &str = "{}";

/// Affinity of resources without an affinity infix
pub const DEFAULT_AFFINITY: &str = "common";

/// A classified file of a bundle
///
/// Identity is (`bundle_name`, `relative_path`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Name of the bundle that owns this resource
    pub bundle_name: String,

    /// Path within the bundle, with platform separators (e.g. `models/rss.common.js`)
    pub relative_path: PathBuf,

    /// Absolute path of the file
    pub full_path: PathBuf,

    /// Classification assigned by the ruleset (e.g. `controllers`, `views`)
    #[serde(rename = "type")]
    pub resource_type: String,

    /// Type path: location under the type root without extension or affinity (e.g. `rss`)
    pub name: String,

    pub affinity: String,

    pub selector: String,

    /// Extension without the dot; empty when the file has none
    pub ext: String,

    /// Extra metadata contributed by the matching rule
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, String>,
}

impl Resource {
    /// Relative path rendered with forward slashes
    pub fn relative_path_str(&self) -> String {
        path_util::to_forward_slashes(&self.relative_path)
    }
}

/// Restricts which resources a query returns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceFilter {
    /// Accepted extensions (`js` or `.js`); empty accepts all
    pub extensions: Vec<String>,

    /// Accepted resource types; empty accepts all
    pub types: Vec<String>,
}

impl ResourceFilter {
    /// Filter accepting everything
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter on a single extension
    pub fn extension(ext: impl Into<String>) -> Self {
        Self {
            extensions: vec![ext.into()],
            types: Vec::new(),
        }
    }

    /// Also accept `ext`
    #[must_use]
    pub fn with_extension(mut self, ext: impl Into<String>) -> Self {
        self.extensions.push(ext.into());
        self
    }

    /// Restrict to resources of type `resource_type`
    #[must_use]
    pub fn with_type(mut self, resource_type: impl Into<String>) -> Self {
        self.types.push(resource_type.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty() && self.types.is_empty()
    }

    pub fn matches(&self, resource: &Resource) -> bool {
        path_util::has_extension(&resource.relative_path, &self.extensions)
            && (self.types.is_empty() || self.types.iter().any(|t| *t == resource.resource_type))
    }
}

/// One node of a type's name hierarchy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResourceNode {
    /// Resources whose name ends here, ordered by affinity then path
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Resource>,

    /// Nested name segments
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub children: BTreeMap<String, ResourceNode>,
}

impl ResourceNode {
    fn insert(&mut self, segments: &[&str], resource: Resource) {
        match segments.split_first() {
            Some((first, rest)) => self
                .children
                .entry((*first).to_string())
                .or_default()
                .insert(rest, resource),
            None => {
                let pos = self.resources.partition_point(|existing| {
                    (existing.affinity.as_str(), existing.relative_path.as_path())
                        <= (resource.affinity.as_str(), resource.relative_path.as_path())
                });
                self.resources.insert(pos, resource);
            }
        }
    }

    /// Node at a slash-separated name path (`""` is this node)
    pub fn get(&self, name: &str) -> Option<&ResourceNode> {
        name.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |node, segment| node.children.get(segment))
    }

    /// Resources ending exactly at `name`
    pub fn resources_at(&self, name: &str) -> &[Resource] {
        self.get(name).map_or(&[], |node| node.resources.as_slice())
    }

    /// Every resource in this subtree, depth first
    pub fn iter(&self) -> Box<dyn Iterator<Item = &Resource> + '_> {
        Box::new(
            self.resources
                .iter()
                .chain(self.children.values().flat_map(ResourceNode::iter)),
        )
    }

    fn merge_from(&mut self, other: &ResourceNode, filter: &ResourceFilter) {
        for resource in other.resources.iter().filter(|r| filter.matches(r)) {
            self.insert(&[], resource.clone());
        }
        for (segment, child) in &other.children {
            let mut merged = self.children.remove(segment).unwrap_or_default();
            merged.merge_from(child, filter);
            if !merged.is_empty() {
                self.children.insert(segment.clone(), merged);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty() && self.children.is_empty()
    }
}

/// Resources of one selector, keyed by type
pub type TypeIndex = BTreeMap<String, ResourceNode>;

/// All resources of a bundle: `selector -> type -> node`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResourceTree {
    selectors: BTreeMap<String, TypeIndex>,
}

impl ResourceTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// File a resource under its selector, type and name segments
    pub fn insert(&mut self, resource: Resource) {
        let node = self
            .selectors
            .entry(resource.selector.clone())
            .or_default()
            .entry(resource.resource_type.clone())
            .or_default();
        let name = resource.name.clone();
        let segments: Vec<&str> = name.split('/').filter(|s| !s.is_empty()).collect();
        node.insert(&segments, resource);
    }

    /// Resources of exactly one selector
    pub fn selector(&self, selector: &str) -> Option<&TypeIndex> {
        self.selectors.get(selector)
    }

    /// Selectors present in this tree
    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.selectors.keys().map(String::as_str)
    }

    /// Wildcard resources merged with those of `selector`, filtered
    ///
    /// Without a selector (or with the wildcard) only wildcard resources are returned.
    pub fn merged(&self, selector: Option<&str>, filter: &ResourceFilter) -> TypeIndex {
        let mut merged = TypeIndex::new();
        let mut wanted = vec![WILDCARD_SELECTOR];
        if let Some(selector) = selector.filter(|s| *s != WILDCARD_SELECTOR) {
            wanted.push(selector);
        }

        for types in wanted.into_iter().filter_map(|s| self.selectors.get(s)) {
            for (resource_type, node) in types {
                let mut target = merged.remove(resource_type).unwrap_or_default();
                target.merge_from(node, filter);
                if !target.is_empty() {
                    merged.insert(resource_type.clone(), target);
                }
            }
        }

        merged
    }

    /// Every resource, ordered by relative path
    pub fn sorted_resources(&self) -> Vec<&Resource> {
        let mut all: Vec<&Resource> = self
            .selectors
            .values()
            .flat_map(|types| types.values().flat_map(ResourceNode::iter))
            .collect();
        all.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        all
    }

    pub fn len(&self) -> usize {
        self.selectors
            .values()
            .flat_map(|types| types.values().map(|node| node.iter().count()))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}
