//! Duplicate package filtering
//!
//! When a package is installed more than once only the shallowest copy is
//! used (the first one walked on a tie). Discarded copies take their whole
//! subtree with them. Removing a subtree can change which copy of another
//! name is shallowest, so losers are removed one depth level at a time until
//! no name is duplicated.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::common::path_util;
use crate::diagnostics::{DiagnosticsSink, LocatorEvent};
use crate::domain::BundleSeed;

/// Remove duplicate packages, keeping traversal order
///
/// Records one [`LocatorEvent::DuplicatePackage`] per duplicated name.
/// Filtering an already filtered list changes nothing and records nothing.
pub fn filter_seeds(seeds: Vec<BundleSeed>, sink: &dyn DiagnosticsSink) -> Vec<BundleSeed> {
    let mut survivors = seeds;
    let mut duplicated: Vec<String> = Vec::new();

    loop {
        let losers = losers(&survivors);
        let Some(min_depth) = losers.iter().map(|&i| survivors[i].npm_depth).min() else {
            break;
        };

        let removed: Vec<PathBuf> = losers
            .into_iter()
            .filter(|&i| survivors[i].npm_depth == min_depth)
            .map(|i| {
                let seed = &survivors[i];
                if !duplicated.contains(&seed.name) {
                    duplicated.push(seed.name.clone());
                }
                tracing::debug!(name = %seed.name, path = %seed.base_directory.display(), "discarding duplicate package");
                seed.base_directory.clone()
            })
            .collect();

        survivors.retain(|seed| {
            !removed
                .iter()
                .any(|dir| path_util::is_within(&seed.base_directory, dir))
        });
    }

    for name in duplicated {
        if let Some(kept) = survivors.iter().find(|seed| seed.name == name) {
            sink.record(LocatorEvent::DuplicatePackage {
                name,
                kept: kept.base_directory.clone(),
            });
        }
    }

    survivors
}

/// Indices of seeds that lose to a shallower (or earlier) seed of the same name
fn losers(seeds: &[BundleSeed]) -> Vec<usize> {
    let mut winners: HashMap<&str, usize> = HashMap::new();
    for (i, seed) in seeds.iter().enumerate() {
        winners
            .entry(seed.name.as_str())
            .and_modify(|winner| {
                if seed.npm_depth < seeds[*winner].npm_depth {
                    *winner = i;
                }
            })
            .or_insert(i);
    }

    seeds
        .iter()
        .enumerate()
        .filter(|(i, seed)| winners.get(seed.name.as_str()) != Some(i))
        .map(|(i, _)| i)
        .collect()
}
