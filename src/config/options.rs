//! Layered locator options
//!
//! Options reach a bundle from several places: the caller of
//! [`crate::locator::BundleLocator::parse_bundle`], the parent package in the
//! dependency tree, and the package's own `locator` manifest section. Each
//! source is one [`SeedOptions`] layer and [`SeedOptions::merge`] folds them
//! field by field.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Locator options attached to a bundle seed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedOptions {
    /// Name of the ruleset used to classify the bundle (defaults to `main`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ruleset: Option<String>,

    /// Location of the rulesets file the ruleset is loaded from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rulesets: Option<String>,

    /// Directory of the bundle that set `rulesets`
    ///
    /// A relative location is searched from here, so packages inheriting the
    /// option find the same file as the package that declared it.
    #[serde(skip)]
    pub rulesets_anchor: Option<PathBuf>,

    /// Any other keys of the `locator` section, carried as-is
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl SeedOptions {
    /// Options selecting a ruleset by name
    pub fn with_ruleset(name: impl Into<String>) -> Self {
        Self {
            ruleset: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the rulesets file location
    #[must_use]
    pub fn rulesets(mut self, location: impl Into<String>) -> Self {
        self.rulesets = Some(location.into());
        self
    }

    /// True when no layer has set anything
    pub fn is_empty(&self) -> bool {
        self.ruleset.is_none() && self.rulesets.is_none() && self.extra.is_empty()
    }

    /// Merge `over` on top of `self`; every field `over` sets wins
    #[must_use]
    pub fn merge(&self, over: &SeedOptions) -> SeedOptions {
        let mut extra = self.extra.clone();
        extra.extend(over.extra.iter().map(|(k, v)| (k.clone(), v.clone())));

        // the anchor travels with the layer that set `rulesets`
        let (rulesets, rulesets_anchor) = if over.rulesets.is_some() {
            (over.rulesets.clone(), over.rulesets_anchor.clone())
        } else {
            (self.rulesets.clone(), self.rulesets_anchor.clone())
        };

        SeedOptions {
            ruleset: over.ruleset.clone().or_else(|| self.ruleset.clone()),
            rulesets,
            rulesets_anchor,
            extra,
        }
    }
}
