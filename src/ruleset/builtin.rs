//! Built-in rulesets
//!
//! Used whenever a bundle names no rulesets file or the named file cannot be
//! found. `main` describes the conventional application layout: controllers
//! at the bundle root, typed resources in well-known directories, and nested
//! bundles under `mojits/`.

use super::RulesetCollection;
use crate::error::Result;

/// Origin reported for errors in the built-in collection
pub const BUILTIN_ORIGIN: &str = "<builtin>";

pub const BUILTIN_RULESETS: &str = r#"
main:
  affinities: [common, client, server]
  skip:
    - "**/.*"
    - "tests"
  bundles:
    - "mojits/*"
  rules:
    - pattern: "controller.js"
      type: controllers
    - pattern: "controller.*.js"
      type: controllers
    - pattern: "models/**/*.js"
      type: models
    - pattern: "views/**/*"
      type: views
    - pattern: "middleware/**/*.js"
      type: middleware
    - pattern: "configs/**/*.{json,yaml,yml}"
      type: configs
    - pattern: "lang/**/*.js"
      type: lang
    - pattern: "assets/**/*"
      type: assets
    - pattern: "addons/*/**/*.js"
      type: addons
"#;

/// Compile the built-in collection
pub fn collection() -> Result<RulesetCollection> {
    RulesetCollection::from_yaml(BUILTIN_RULESETS, BUILTIN_ORIGIN)
}
