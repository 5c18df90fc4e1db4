//! Classification rulesets
//!
//! A ruleset turns a path inside a bundle into a resource classification.
//! Rulesets are declared in a rulesets file (YAML or JSON) mapping names to
//! definitions, or come from the built-in collection (see [`builtin`]).
//!
//! Patterns are `wax` globs matched against forward-slash relative paths.

pub mod builtin;
pub mod resolver;

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use wax::{CandidatePath, Glob, Pattern};

use crate::common::path_util;
use crate::domain::{DEFAULT_AFFINITY, WILDCARD_SELECTOR};
use crate::error::{Result, ruleset as ruleset_error};

pub use resolver::{DEFAULT_RULESET, RulesetResolver};

/// Characters that make a pattern segment non-literal
const GLOB_META: &[char] = &['*', '?', '[', ']', '{', '}', '<', '>'];

fn default_affinities() -> Vec<String> {
    vec![
        DEFAULT_AFFINITY.to_string(),
        "client".to_string(),
        "server".to_string(),
    ]
}

/// One ruleset as written in a rulesets file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RulesetDefinition {
    /// Recognized `.<affinity>.` file name infixes
    #[serde(default = "default_affinities")]
    pub affinities: Vec<String>,

    /// Paths never classified or descended into
    #[serde(default)]
    pub skip: Vec<String>,

    /// Directories that form nested bundles of their own
    #[serde(default)]
    pub bundles: Vec<String>,

    /// Resource rules
    #[serde(default)]
    pub rules: Vec<RuleDefinition>,
}

/// One resource rule as written in a rulesets file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleDefinition {
    pub pattern: String,

    #[serde(rename = "type")]
    pub resource_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,

    /// Forces the affinity regardless of the file name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affinity: Option<String>,

    /// Prefix stripped from the path to compute the resource name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, String>,
}

/// Number of literal characters in a pattern
///
/// A rule whose pattern spells out more of the path is more specific.
pub fn specificity(pattern: &str) -> usize {
    pattern.chars().filter(|c| !GLOB_META.contains(c)).count()
}

/// Directory part of a pattern before its first wildcard
fn literal_root(pattern: &str) -> &str {
    let literal = pattern
        .find(GLOB_META)
        .map_or(pattern, |idx| &pattern[..idx]);
    literal.rfind('/').map_or("", |idx| &literal[..idx])
}

/// A glob compiled once and matched many times
struct CompiledGlob {
    pattern: String,
    glob: Glob<'static>,
}

impl CompiledGlob {
    fn new(ruleset: &str, pattern: &str) -> Result<Self> {
        let glob = Glob::new(pattern)
            .map_err(|e| ruleset_error::invalid_pattern(ruleset, pattern, e.to_string()))?
            .into_owned();
        Ok(Self {
            pattern: pattern.to_string(),
            glob,
        })
    }

    fn is_match(&self, relative: &str) -> bool {
        let candidate = CandidatePath::from(relative);
        self.glob.matched(&candidate).is_some()
    }
}

impl fmt::Debug for CompiledGlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CompiledGlob").field(&self.pattern).finish()
    }
}

#[derive(Debug)]
struct Rule {
    definition: RuleDefinition,
    glob: CompiledGlob,
    root: String,
}

/// What a ruleset says about one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub resource_type: String,
    /// Type path under the rule root, without extension or affinity, forward slashes
    pub name: String,
    pub affinity: String,
    pub selector: String,
    pub ext: String,
    pub meta: BTreeMap<String, String>,
}

/// A compiled ruleset
#[derive(Debug)]
pub struct Ruleset {
    name: String,
    affinities: Vec<String>,
    skip: Vec<CompiledGlob>,
    bundles: Vec<CompiledGlob>,
    /// Ordered by specificity, most specific first; declaration order on ties
    rules: Vec<Rule>,
}

impl Ruleset {
    /// Compile a definition, failing on the first invalid pattern
    pub fn compile(name: &str, definition: &RulesetDefinition) -> Result<Self> {
        let skip = definition
            .skip
            .iter()
            .map(|p| CompiledGlob::new(name, p))
            .collect::<Result<Vec<_>>>()?;
        let bundles = definition
            .bundles
            .iter()
            .map(|p| CompiledGlob::new(name, p))
            .collect::<Result<Vec<_>>>()?;

        let mut rules = definition
            .rules
            .iter()
            .map(|rule| -> Result<Rule> {
                let root = rule
                    .root
                    .as_deref()
                    .unwrap_or_else(|| literal_root(&rule.pattern))
                    .trim_matches('/')
                    .to_string();
                Ok(Rule {
                    glob: CompiledGlob::new(name, &rule.pattern)?,
                    definition: rule.clone(),
                    root,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        // Stable: equal specificity keeps declaration order
        rules.sort_by_key(|rule| std::cmp::Reverse(specificity(&rule.definition.pattern)));

        Ok(Self {
            name: name.to_string(),
            affinities: definition.affinities.clone(),
            skip,
            bundles,
            rules,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn affinities(&self) -> &[String] {
        &self.affinities
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Whether a bundle-relative path must be ignored
    pub fn is_skipped(&self, relative: &Path) -> bool {
        let relative = path_util::to_forward_slashes(relative);
        self.skip.iter().any(|glob| glob.is_match(&relative))
    }

    /// Whether a bundle-relative directory is the root of a nested bundle
    pub fn is_bundle_root(&self, relative_dir: &Path) -> bool {
        let relative = path_util::to_forward_slashes(relative_dir);
        self.bundles.iter().any(|glob| glob.is_match(&relative))
    }

    /// Classify a bundle-relative file path
    ///
    /// Returns `None` for skipped files and files no rule matches.
    pub fn classify(&self, relative: &Path) -> Option<Classification> {
        let relative = path_util::to_forward_slashes(relative);
        if self.skip.iter().any(|glob| glob.is_match(&relative)) {
            return None;
        }

        let rule = self.rules.iter().find(|rule| rule.glob.is_match(&relative))?;
        Some(self.describe(rule, &relative))
    }

    fn describe(&self, rule: &Rule, relative: &str) -> Classification {
        let under_root = if rule.root.is_empty() {
            relative
        } else {
            relative
                .strip_prefix(rule.root.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
                .unwrap_or(relative)
        };

        let (dir, file_name) = match under_root.rsplit_once('/') {
            Some((dir, file_name)) => (Some(dir), file_name),
            None => (None, under_root),
        };
        let parts = path_util::split_file_name(file_name, &self.affinities);
        let name = match dir {
            Some(dir) => format!("{dir}/{}", parts.stem),
            None => parts.stem,
        };

        let definition = &rule.definition;
        Classification {
            resource_type: definition.resource_type.clone(),
            name,
            affinity: definition
                .affinity
                .clone()
                .or(parts.affinity)
                .unwrap_or_else(|| DEFAULT_AFFINITY.to_string()),
            selector: definition
                .selector
                .clone()
                .unwrap_or_else(|| WILDCARD_SELECTOR.to_string()),
            ext: parts.ext,
            meta: definition.meta.clone(),
        }
    }
}

/// Registry of compiled rulesets from one rulesets file
#[derive(Debug, Default)]
pub struct RulesetCollection {
    rulesets: BTreeMap<String, Arc<Ruleset>>,
}

impl RulesetCollection {
    /// Compile every definition
    pub fn from_definitions(definitions: &BTreeMap<String, RulesetDefinition>) -> Result<Self> {
        let rulesets = definitions
            .iter()
            .map(|(name, definition)| -> Result<(String, Arc<Ruleset>)> {
                Ok((name.clone(), Arc::new(Ruleset::compile(name, definition)?)))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;
        Ok(Self { rulesets })
    }

    /// Parse a YAML rulesets document; `origin` names it in errors
    pub fn from_yaml(yaml: &str, origin: &str) -> Result<Self> {
        let definitions: BTreeMap<String, RulesetDefinition> = serde_yaml::from_str(yaml)
            .map_err(|e| ruleset_error::parse_failed(origin, e.to_string()))?;
        Self::from_definitions(&definitions)
    }

    /// Parse a JSON rulesets document; `origin` names it in errors
    pub fn from_json(json: &str, origin: &str) -> Result<Self> {
        let definitions: BTreeMap<String, RulesetDefinition> = serde_json::from_str(json)
            .map_err(|e| ruleset_error::parse_failed(origin, e.to_string()))?;
        Self::from_definitions(&definitions)
    }

    /// Load a rulesets file, as JSON when it ends in `.json` and YAML otherwise
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ruleset_error::parse_failed(path.display().to_string(), e.to_string()))?;
        let origin = path.display().to_string();

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&content, &origin)
        } else {
            Self::from_yaml(&content, &origin)
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<Ruleset>> {
        self.rulesets.get(name).cloned()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rulesets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rulesets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rulesets.is_empty()
    }
}
