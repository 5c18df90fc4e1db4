//! Ruleset resolution for bundle seeds
//!
//! A seed names its ruleset through its options (`ruleset`, default `main`)
//! and may name a rulesets file location (`rulesets`). The location is
//! searched in this order, first hit wins:
//!
//! 1. explicit: the location itself, when absolute
//! 2. local: relative to the directory of the bundle that declared the location
//! 3. app: relative to the application directory
//! 4. dependency: `<bundle>/node_modules/<location>`
//! 5. framework: `<ancestor>/node_modules/<location>` walking up from the bundle
//!
//! Anything that cannot be found falls back to the built-in collection.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{Ruleset, RulesetCollection, builtin};
use crate::common::path_util;
use crate::config::PACKAGES_DIR;
use crate::diagnostics::{DiagnosticsSink, LocatorEvent};
use crate::domain::BundleSeed;

/// Ruleset used when a seed does not name one
pub const DEFAULT_RULESET: &str = "main";

/// File name probed when a location is a directory
const RULESETS_FILE: &str = "rulesets.yaml";

/// Suffixes probed after the bare location
const RULESETS_SUFFIXES: &[&str] = &["yaml", "yml", "json"];

/// Where a rulesets collection came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesetSource {
    Builtin,
    File(PathBuf),
}

/// Resolves and caches rulesets for one locate operation
pub struct RulesetResolver<'a> {
    app_dir: PathBuf,
    sink: &'a dyn DiagnosticsSink,
    builtin: Option<Arc<RulesetCollection>>,
    /// `None` marks a file that failed to load
    files: HashMap<PathBuf, Option<Arc<RulesetCollection>>>,
    files_loaded: usize,
}

impl<'a> RulesetResolver<'a> {
    pub fn new(app_dir: impl Into<PathBuf>, sink: &'a dyn DiagnosticsSink) -> Self {
        Self {
            app_dir: app_dir.into(),
            sink,
            builtin: None,
            files: HashMap::new(),
            files_loaded: 0,
        }
    }

    /// Number of rulesets files read from disk so far
    pub fn files_loaded(&self) -> usize {
        self.files_loaded
    }

    /// Resolve the ruleset that classifies `seed`
    ///
    /// Records [`LocatorEvent::RulesetNotFound`] and returns `None` when the
    /// chosen collection has no ruleset of the requested name.
    pub fn resolve(&mut self, seed: &BundleSeed) -> Option<Arc<Ruleset>> {
        let name = seed.options.ruleset.as_deref().unwrap_or(DEFAULT_RULESET);
        let (source, collection) = self.collection_for(seed);

        tracing::debug!(
            bundle = %seed.name,
            ruleset = name,
            source = ?source,
            "resolving ruleset"
        );

        let ruleset = collection.get(name);
        if ruleset.is_none() {
            self.sink.record(LocatorEvent::RulesetNotFound {
                bundle: seed.name.clone(),
                ruleset: name.to_string(),
            });
        }
        ruleset
    }

    /// The collection a seed's ruleset is looked up in
    ///
    /// A relative location is searched from the bundle that declared it,
    /// which is the seed itself unless the option was inherited.
    pub fn collection_for(&mut self, seed: &BundleSeed) -> (RulesetSource, Arc<RulesetCollection>) {
        let anchor = seed
            .options
            .rulesets_anchor
            .as_deref()
            .unwrap_or(&seed.base_directory);
        let located = seed
            .options
            .rulesets
            .as_deref()
            .and_then(|location| self.locate(location, anchor));

        if let Some(path) = located {
            if let Some(collection) = self.load_file(&path) {
                return (RulesetSource::File(path), collection);
            }
        }
        (RulesetSource::Builtin, self.builtin())
    }

    /// Find the rulesets file for `location` as seen from `base_directory`
    pub fn locate(&self, location: &str, base_directory: &Path) -> Option<PathBuf> {
        let location = Path::new(location);
        if location.is_absolute() {
            return probe(location);
        }

        let mut candidates = vec![
            base_directory.join(location),
            self.app_dir.join(location),
            base_directory.join(PACKAGES_DIR).join(location),
        ];

        let stop_at_app = path_util::is_within(base_directory, &self.app_dir);
        for ancestor in base_directory.ancestors().skip(1) {
            if ancestor.file_name().is_some_and(|n| n == PACKAGES_DIR) {
                continue;
            }
            candidates.push(ancestor.join(PACKAGES_DIR).join(location));
            if stop_at_app && ancestor == self.app_dir {
                break;
            }
        }

        candidates.iter().find_map(|candidate| probe(candidate))
    }

    fn load_file(&mut self, path: &Path) -> Option<Arc<RulesetCollection>> {
        let key = path_util::normalize(path);
        if let Some(cached) = self.files.get(&key) {
            return cached.clone();
        }

        self.files_loaded += 1;
        let loaded = match RulesetCollection::from_file(&key) {
            Ok(collection) => {
                tracing::debug!(path = %key.display(), rulesets = collection.len(), "loaded rulesets file");
                Some(Arc::new(collection))
            }
            Err(e) => {
                self.sink.record(LocatorEvent::RulesetInvalid {
                    path: key.clone(),
                    reason: e.to_string(),
                });
                None
            }
        };
        self.files.insert(key, loaded.clone());
        loaded
    }

    fn builtin(&mut self) -> Arc<RulesetCollection> {
        let sink = self.sink;
        let collection = self.builtin.get_or_insert_with(|| match builtin::collection() {
            Ok(collection) => Arc::new(collection),
            Err(e) => {
                sink.record(LocatorEvent::RulesetInvalid {
                    path: PathBuf::from(builtin::BUILTIN_ORIGIN),
                    reason: e.to_string(),
                });
                Arc::new(RulesetCollection::default())
            }
        });
        Arc::clone(collection)
    }
}

/// First existing file among the spellings of a location
fn probe(location: &Path) -> Option<PathBuf> {
    if location.is_file() {
        return Some(location.to_path_buf());
    }

    RULESETS_SUFFIXES
        .iter()
        .map(|suffix| {
            let mut with_suffix = location.as_os_str().to_os_string();
            with_suffix.push(".");
            with_suffix.push(suffix);
            PathBuf::from(with_suffix)
        })
        .chain(std::iter::once(location.join(RULESETS_FILE)))
        .find(|candidate| candidate.is_file())
}
