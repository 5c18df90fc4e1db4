//! Longest-prefix path ownership

use std::path::{Path, PathBuf};

use crate::domain::BundleId;

/// Maps paths to the bundle whose base directory contains them most specifically
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnershipIndex {
    /// Deepest base directories first
    entries: Vec<(PathBuf, BundleId)>,
}

impl OwnershipIndex {
    pub fn new(entries: impl IntoIterator<Item = (PathBuf, BundleId)>) -> Self {
        let mut entries: Vec<_> = entries.into_iter().collect();
        entries.sort_by_key(|(dir, _)| std::cmp::Reverse(dir.components().count()));
        Self { entries }
    }

    /// Owner of `path`, matching whole components only
    pub fn owner(&self, path: &Path) -> Option<BundleId> {
        self.entries
            .iter()
            .find(|(dir, _)| path.starts_with(dir))
            .map(|(_, id)| *id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
