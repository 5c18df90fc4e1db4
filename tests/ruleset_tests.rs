//! Per-bundle ruleset selection through package manifests and configuration

mod common;

use std::sync::Arc;

use bundle_locator::config::{LocatorConfig, SeedOptions};
use bundle_locator::diagnostics::{LocatorEvent, RecordingSink};
use bundle_locator::domain::ResourceFilter;
use bundle_locator::locator::BundleLocator;

const TOUCH_RULESETS: &str = r#"
touch:
  affinities: [common, client, server, touch]
  rules:
    - pattern: "templates/**/*.html"
      type: views
    - pattern: "templates/**/*.iphone.html"
      type: views
      selector: iphone
    - pattern: "*.js"
      type: scripts
      meta:
        origin: touch
"#;

fn app_with_themed_package() -> common::TestWorkspace {
    let ws = common::TestWorkspace::new();
    ws.write_package(".", "app", "1.0.0");
    ws.touch(&["controller.common.js"]);

    ws.write_file(
        "node_modules/themed/package.json",
        r#"{"name": "themed", "version": "2.0.0", "locator": {"ruleset": "touch", "rulesets": "rules"}}"#,
    );
    ws.write_file("node_modules/themed/rules.yaml", TOUCH_RULESETS);
    ws.touch(&[
        "node_modules/themed/index.touch.js",
        "node_modules/themed/templates/home.html",
        "node_modules/themed/templates/home.iphone.html",
        "node_modules/themed/controller.common.js",
    ]);
    ws
}

#[test]
fn test_package_declared_ruleset() {
    let ws = app_with_themed_package();
    let sink = Arc::new(RecordingSink::new());
    let index = BundleLocator::with_sink(LocatorConfig::default(), sink.clone())
        .parse_bundle(&ws.path, None)
        .expect("Failed to parse bundle");

    let themed = index.get_bundle("themed").expect("themed bundle");
    assert_eq!(themed.ruleset.as_deref(), Some("touch"));
    assert_eq!(themed.options.ruleset.as_deref(), Some("touch"));

    let scripts = themed.get_resources(&ResourceFilter::all().with_type("scripts"), None);
    let script = &scripts["scripts"].resources_at("index")[0];
    assert_eq!(script.affinity, "touch");
    assert_eq!(script.meta.get("origin").map(String::as_str), Some("touch"));

    let common_views = themed.get_resources(&ResourceFilter::all(), None);
    assert_eq!(common_views["views"].iter().count(), 1);
    let iphone_views = themed.get_resources(&ResourceFilter::all(), Some("iphone"));
    assert_eq!(iphone_views["views"].iter().count(), 2);

    // classified with the touch rules, `controller.common.js` is a script
    assert_eq!(
        scripts["scripts"].resources_at("controller")[0].resource_type,
        "scripts"
    );

    let root = index.root_bundle();
    assert_eq!(root.ruleset.as_deref(), Some("main"));
    assert!(sink.events().is_empty());
}

#[test]
fn test_dependency_inherits_declared_rulesets_file() {
    let ws = app_with_themed_package();
    ws.write_package("node_modules/themed/node_modules/child", "child", "1.0.0");
    ws.touch(&["node_modules/themed/node_modules/child/widget.js"]);

    let sink = Arc::new(RecordingSink::new());
    let index = BundleLocator::with_sink(LocatorConfig::default(), sink.clone())
        .parse_bundle(&ws.path, None)
        .expect("Failed to parse bundle");

    let child = index.get_bundle("child").expect("child bundle");
    assert_eq!(child.ruleset.as_deref(), Some("touch"));
    assert_eq!(child.resource_count(), 1);
    let scripts = child.get_resources(&ResourceFilter::all(), None);
    assert_eq!(scripts["scripts"].resources_at("widget")[0].affinity, "common");
    assert!(sink.events().is_empty());
}

#[test]
fn test_unknown_root_ruleset_reported() {
    let ws = app_with_themed_package();
    let sink = Arc::new(RecordingSink::new());
    let index = BundleLocator::with_sink(LocatorConfig::default(), sink.clone())
        .parse_bundle(&ws.path, Some(&SeedOptions::with_ruleset("foo")))
        .expect("Failed to parse bundle");

    assert_eq!(index.root_bundle().ruleset, None);
    assert_eq!(index.root_bundle().resource_count(), 0);
    // the package declares its own ruleset and is unaffected
    assert_eq!(
        index.get_bundle("themed").and_then(|b| b.ruleset.clone()),
        Some("touch".to_string())
    );
    assert_eq!(
        sink.events(),
        vec![LocatorEvent::RulesetNotFound {
            bundle: "app".to_string(),
            ruleset: "foo".to_string(),
        }]
    );
}

#[test]
fn test_app_level_rulesets_from_config() {
    let ws = common::TestWorkspace::new();
    ws.write_package(".", "app", "1.0.0");
    ws.write_file("config/rulesets.yaml", TOUCH_RULESETS);
    ws.touch(&["main.js", "templates/index.html"]);
    ws.write_package("node_modules/dep", "dep", "1.0.0");
    ws.touch(&["node_modules/dep/dep.js"]);

    let config = LocatorConfig {
        ruleset: Some("touch".to_string()),
        rulesets: Some("config".to_string()),
        ..LocatorConfig::default()
    };
    let index = BundleLocator::with_sink(config, Arc::new(RecordingSink::new()))
        .parse_bundle(&ws.path, None)
        .expect("Failed to parse bundle");

    assert_eq!(index.root_bundle().ruleset.as_deref(), Some("touch"));
    assert_eq!(index.root_bundle().resource_count(), 2);

    // inherited options resolve the same file through the app directory
    let dep = index.get_bundle("dep").expect("dep bundle");
    assert_eq!(dep.ruleset.as_deref(), Some("touch"));
    assert_eq!(dep.resource_count(), 1);
}

#[test]
fn test_invalid_rulesets_file_falls_back_to_builtin() {
    let ws = common::TestWorkspace::new();
    ws.write_file(
        "package.json",
        r#"{"name": "app", "locator": {"rulesets": "broken.yaml"}}"#,
    );
    ws.write_file("broken.yaml", "main:\n  rules: [unclosed\n");
    ws.touch(&["controller.common.js"]);

    let sink = Arc::new(RecordingSink::new());
    let index = BundleLocator::with_sink(LocatorConfig::default(), sink.clone())
        .parse_bundle(&ws.path, None)
        .expect("Failed to parse bundle");

    assert_eq!(index.root_bundle().ruleset.as_deref(), Some("main"));
    assert_eq!(index.root_bundle().resource_count(), 1);
    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], LocatorEvent::RulesetInvalid { path, .. } if path.ends_with("broken.yaml")));
}
