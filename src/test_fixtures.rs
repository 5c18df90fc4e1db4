//! Test fixtures and utilities for reducing test setup duplication.
//!
//! Package trees are written into temp directories with a single call. Every
//! fixture keeps its [`TempDir`] alive and exposes the normalized root, so
//! paths compare equal to the ones the locator stores.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{create_temp_dir, write_file, write_package};
//!
//! #[test]
//! fn my_test() {
//!     let temp = create_temp_dir();
//!     write_package(temp.path(), "node_modules/a", "a");
//!     write_file(temp.path(), "node_modules/a/models/x.js", "");
//! }
//! ```

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::common::path_util;

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Write a file below `root`, creating parent directories.
///
/// # Panics
///
/// Panics if a directory or the file cannot be written.
pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    std::fs::write(&path, content).expect("Failed to write file");
}

/// Write a `package.json` declaring `name` into `root/relative`.
pub fn write_package(root: &Path, relative: &str, name: &str) {
    write_file(
        root,
        &format!("{relative}/package.json"),
        &format!(r#"{{"name": "{name}", "version": "1.0.0"}}"#),
    );
}

/// Create an empty directory below `root`.
pub fn create_dir(root: &Path, relative: &str) -> PathBuf {
    let path = root.join(relative);
    std::fs::create_dir_all(&path).expect("Failed to create directory");
    path
}

/// A package tree in a temp directory
pub struct Fixture {
    _temp: TempDir,
    pub root: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let temp = create_temp_dir();
        let root = path_util::normalize(temp.path());
        Self { _temp: temp, root }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }
}

pub type RulesetsFixture = Fixture;
pub type WalkFixture = Fixture;

/// Application with duplicated packages at several depths
///
/// ```text
/// package.json                                          app
/// node_modules/depth-different                          depth 1
/// node_modules/middle                                   depth 1
/// node_modules/middle/node_modules/depth-different      depth 2, duplicate
/// .../depth-different/node_modules/depth-max            depth 3
/// node_modules/skip-a/node_modules/depth-same           depth 2 (skip-a has no manifest)
/// node_modules/skip-b/node_modules/depth-same           depth 2, duplicate
/// ```
pub fn walk_fixture() -> WalkFixture {
    let fixture = Fixture::new();
    let root = fixture.root.as_path();
    write_package(root, ".", "app");
    write_package(root, "node_modules/depth-different", "depth-different");
    write_package(root, "node_modules/middle", "middle");
    write_package(
        root,
        "node_modules/middle/node_modules/depth-different",
        "depth-different",
    );
    write_package(
        root,
        "node_modules/middle/node_modules/depth-different/node_modules/depth-max",
        "depth-max",
    );
    create_dir(root, "node_modules/skip-a");
    write_package(root, "node_modules/skip-a/node_modules/depth-same", "depth-same");
    create_dir(root, "node_modules/skip-b");
    write_package(root, "node_modules/skip-b/node_modules/depth-same", "depth-same");
    fixture
}

/// Rulesets files at every level the resolver searches
pub fn rulesets_fixture() -> RulesetsFixture {
    let fixture = Fixture::new();
    let root = fixture.root.as_path();
    write_package(root, ".", "app");
    write_file(
        root,
        "node_modules/local/rules.yaml",
        "local:\n  rules:\n    - pattern: \"*.js\"\n      type: scripts\n",
    );
    write_file(
        root,
        "app-rules.json",
        r#"{"app": {"rules": [{"pattern": "*.js", "type": "scripts"}]}}"#,
    );
    write_file(root, "node_modules/with-dep/node_modules/dep-rules.yml", "dep: {}\n");
    write_file(root, "node_modules/fw/rulesets.yaml", "fw-a: {}\nfw-b: {}\n");
    create_dir(root, "node_modules/plain/node_modules/deep");
    write_file(root, "broken.yaml", "main: [unclosed\n");
    fixture
}

pub type PrecedenceFixture = Fixture;

/// The same rulesets location `shared` at every level searched for `node_modules/pkg`
///
/// ```text
/// node_modules/pkg/shared.yaml                          local
/// shared.yaml                                           app
/// node_modules/pkg/node_modules/shared.yaml             dependency
/// node_modules/shared.yaml                              framework
/// ```
///
/// Each file classifies `*.js` with a type naming its level.
pub fn precedence_fixture() -> PrecedenceFixture {
    let fixture = Fixture::new();
    let root = fixture.root.as_path();
    write_package(root, ".", "app");
    write_package(root, "node_modules/pkg", "pkg");
    for (file, level) in [
        ("node_modules/pkg/shared.yaml", "local"),
        ("shared.yaml", "app"),
        ("node_modules/pkg/node_modules/shared.yaml", "dependency"),
        ("node_modules/shared.yaml", "framework"),
    ] {
        write_file(
            root,
            file,
            &format!("main:\n  rules:\n    - pattern: \"*.js\"\n      type: {level}\n"),
        );
    }
    fixture
}
