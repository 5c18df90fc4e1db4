//! Common test utilities for bundle-locator integration tests

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A test workspace holding a package tree
#[allow(dead_code)]
pub struct TestWorkspace {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to workspace root, symlinks resolved
    pub path: PathBuf,
}

impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = dunce::canonicalize(temp.path()).expect("Failed to canonicalize temp directory");
        Self { temp, path }
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Write a package manifest into `dir`
    pub fn write_package(&self, dir: &str, name: &str, version: &str) {
        self.write_file(
            &format!("{dir}/package.json"),
            &format!(r#"{{"name": "{name}", "version": "{version}"}}"#),
        );
    }

    /// Write empty files
    pub fn touch(&self, paths: &[&str]) {
        for path in paths {
            self.write_file(path, "");
        }
    }

    /// Absolute path of a workspace entry
    #[allow(dead_code)]
    pub fn join(&self, path: &str) -> PathBuf {
        self.path.join(path)
    }

    #[allow(dead_code)]
    pub fn root(&self) -> &Path {
        &self.path
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of `.js` resources in the newsboxes fixture when `build` is excluded
#[allow(dead_code)]
pub const NEWSBOXES_JS_RESOURCES: usize = 10;

/// Application `modown-newsboxes` with three mojits and two framework packages
///
/// ```text
/// modown-newsboxes                     root
///   mojits/Shelf, mojits/Weather
///   node_modules/modown                framework
///   node_modules/modown-lib-read       author "Not A One"
///     mojits/Read                      directory bundle inside a package
///     node_modules/modown              duplicate of the framework
/// ```
#[allow(dead_code)]
pub fn newsboxes() -> TestWorkspace {
    let ws = TestWorkspace::new();

    ws.write_package(".", "modown-newsboxes", "0.0.1");
    ws.touch(&[
        "README.md",
        "middleware/logger.js",
        "configs/app.json",
        "tests/app.tests.js",
        "mojits/Shelf/controller.common.js",
        "mojits/Shelf/views/index.hb.html",
        "mojits/Weather/controller.common.js",
        "mojits/Weather/controller.server.js",
        "mojits/Weather/.eslintrc",
    ]);

    ws.write_package("node_modules/modown", "modown", "0.5.0");
    ws.touch(&[
        "node_modules/modown/addons/rs/loader.server.js",
        "node_modules/modown/middleware/modown.js",
        "node_modules/modown/lib/index.js",
    ]);

    ws.write_file(
        "node_modules/modown-lib-read/package.json",
        r#"{"name": "modown-lib-read", "version": "0.1.0", "author": "Not A One"}"#,
    );
    ws.touch(&[
        "node_modules/modown-lib-read/models/feed.common.js",
        "node_modules/modown-lib-read/mojits/Read/controller.common.js",
        "node_modules/modown-lib-read/mojits/Read/models/rss.common.js",
        "node_modules/modown-lib-read/mojits/Read/models/build/generated.common.js",
        "node_modules/modown-lib-read/mojits/Read/lang/Read_en.js",
        "node_modules/modown-lib-read/mojits/Read/views/index.hb.html",
        "node_modules/modown-lib-read/mojits/Read/assets/css/read.css",
    ]);

    ws.write_package(
        "node_modules/modown-lib-read/node_modules/modown",
        "modown",
        "0.4.0",
    );
    ws.touch(&["node_modules/modown-lib-read/node_modules/modown/middleware/old.js"]);

    ws
}
