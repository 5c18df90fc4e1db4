//! Package tree walker
//!
//! Enumerates the nested `node_modules` layout below an application root and
//! produces one [`BundleSeed`] per package. Depth counts `node_modules`
//! levels: a directory without a manifest yields no seed, but its own
//! `node_modules` is still walked.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::{PACKAGES_DIR, PackageManifest, SeedOptions};
use crate::domain::BundleSeed;

/// Walks a package tree up to an optional depth
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageWalker {
    max_depth: Option<usize>,
}

impl PackageWalker {
    /// Walker bounded to `max_depth` levels of nested packages, unbounded on `None`
    pub fn new(max_depth: Option<usize>) -> Self {
        Self { max_depth }
    }

    /// Seeds for `root` and every package below it, in traversal order
    ///
    /// `root` must already be normalized. The root always yields a seed,
    /// named after its directory when it has no usable manifest.
    pub fn walk(&self, root: &Path, options: &SeedOptions) -> Vec<BundleSeed> {
        let fallback_name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());
        let manifest = PackageManifest::read(root);
        let root_seed = BundleSeed::make(root, fallback_name, None, manifest.as_ref(), Some(options));

        let mut visited = HashSet::new();
        visited.insert(dunce::canonicalize(root).unwrap_or_else(|_| root.to_path_buf()));

        let mut seeds = Vec::new();
        let inherited = root_seed.options.clone();
        seeds.push(root_seed);
        self.descend(root, 0, &inherited, &mut visited, &mut seeds);
        seeds
    }

    fn descend(
        &self,
        dir: &Path,
        depth: usize,
        inherited: &SeedOptions,
        visited: &mut HashSet<PathBuf>,
        seeds: &mut Vec<BundleSeed>,
    ) {
        let depth = depth + 1;
        if self.max_depth.is_some_and(|max| depth > max) {
            return;
        }

        for candidate in package_dirs(&dir.join(PACKAGES_DIR)) {
            let canonical = match dunce::canonicalize(&candidate) {
                Ok(canonical) => canonical,
                Err(e) => {
                    tracing::debug!(path = %candidate.display(), error = %e, "skipping unresolvable package");
                    continue;
                }
            };
            if !visited.insert(canonical) {
                tracing::debug!(path = %candidate.display(), "package already visited");
                continue;
            }

            let seed = PackageManifest::read(&candidate).map(|manifest| {
                let dir_name = candidate
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                BundleSeed::make(&candidate, dir_name, None, Some(&manifest), Some(inherited))
                    .at_depth(depth)
            });
            let options = seed
                .as_ref()
                .map_or_else(|| inherited.clone(), |seed| seed.options.clone());
            if let Some(seed) = seed {
                seeds.push(seed);
            }

            self.descend(&candidate, depth, &options, visited, seeds);
        }
    }
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Package directories inside a `node_modules` directory, `@scope` expanded
fn package_dirs(modules: &Path) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    for dir in sub_dirs(modules) {
        let scoped = dir
            .file_name()
            .is_some_and(|n| n.to_string_lossy().starts_with('@'));
        if scoped {
            dirs.extend(sub_dirs(&dir));
        } else {
            dirs.push(dir);
        }
    }
    dirs
}

/// Visible subdirectories in file name order, symlinks followed
fn sub_dirs(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }

    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_dir())
        .filter(|entry| !is_hidden(&entry.file_name().to_string_lossy()))
        .map(walkdir::DirEntry::into_path)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{create_dir, walk_fixture, write_file, write_package, Fixture};

    fn relative(fixture: &Fixture, seeds: &[BundleSeed]) -> Vec<(String, usize)> {
        seeds
            .iter()
            .map(|seed| {
                let rel = seed
                    .base_directory
                    .strip_prefix(&fixture.root)
                    .expect("seed below root");
                (crate::common::path_util::to_forward_slashes(rel), seed.npm_depth)
            })
            .collect()
    }

    #[test]
    fn test_walk_bounded_depth() {
        let fixture = walk_fixture();
        let seeds = PackageWalker::new(Some(2)).walk(&fixture.root, &SeedOptions::default());

        assert_eq!(
            relative(&fixture, &seeds),
            vec![
                (String::new(), 0),
                ("node_modules/depth-different".to_string(), 1),
                ("node_modules/middle".to_string(), 1),
                ("node_modules/middle/node_modules/depth-different".to_string(), 2),
                ("node_modules/skip-a/node_modules/depth-same".to_string(), 2),
                ("node_modules/skip-b/node_modules/depth-same".to_string(), 2),
            ]
        );
        assert_eq!(seeds[0].name, "app");
        assert_eq!(seeds[0].version.as_deref(), Some("1.0.0"));
    }

    #[test]
    fn test_walk_unbounded_reaches_deepest() {
        let fixture = walk_fixture();
        let seeds = PackageWalker::new(None).walk(&fixture.root, &SeedOptions::default());
        assert_eq!(seeds.len(), 7);
        let deepest = seeds
            .iter()
            .find(|s| s.name == "depth-max")
            .expect("depth-max seed");
        assert_eq!(deepest.npm_depth, 3);
    }

    #[test]
    fn test_walk_depth_zero_is_root_only() {
        let fixture = walk_fixture();
        let seeds = PackageWalker::new(Some(0)).walk(&fixture.root, &SeedOptions::default());
        assert_eq!(seeds.len(), 1);
        assert_eq!(seeds[0].npm_depth, 0);
    }

    #[test]
    fn test_root_without_manifest_uses_basename() {
        let fixture = crate::test_fixtures::rulesets_fixture();
        let root = create_dir(&fixture.root, "bare-app");
        let seeds = PackageWalker::default().walk(&root, &SeedOptions::default());
        assert_eq!(seeds.len(), 1);
        assert_eq!(seeds[0].name, "bare-app");
        assert_eq!(seeds[0].version, None);
    }

    #[test]
    fn test_scoped_packages_same_depth() {
        let temp = crate::test_fixtures::create_temp_dir();
        let root = crate::common::path_util::normalize(temp.path());
        write_package(&root, ".", "app");
        write_package(&root, "node_modules/@acme/widgets", "@acme/widgets");
        write_file(&root, "node_modules/.bin/tool", "");

        let seeds = PackageWalker::default().walk(&root, &SeedOptions::default());
        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[1].name, "@acme/widgets");
        assert_eq!(seeds[1].npm_depth, 1);
    }

    #[test]
    fn test_options_inherited_and_overridden() {
        let temp = crate::test_fixtures::create_temp_dir();
        let root = crate::common::path_util::normalize(temp.path());
        write_package(&root, ".", "app");
        write_file(
            &root,
            "node_modules/themed/package.json",
            r#"{"name": "themed", "locator": {"ruleset": "theme"}}"#,
        );
        write_package(&root, "node_modules/themed/node_modules/child", "child");
        write_package(&root, "node_modules/plain", "plain");

        let seeds = PackageWalker::default().walk(&root, &SeedOptions::with_ruleset("app"));
        let by_name = |name: &str| {
            seeds
                .iter()
                .find(|s| s.name == name)
                .and_then(|s| s.options.ruleset.clone())
        };
        assert_eq!(by_name("app").as_deref(), Some("app"));
        assert_eq!(by_name("themed").as_deref(), Some("theme"));
        assert_eq!(by_name("child").as_deref(), Some("theme"));
        assert_eq!(by_name("plain").as_deref(), Some("app"));
    }

    #[test]
    fn test_inherited_rulesets_stay_anchored_at_declaring_package() {
        let temp = crate::test_fixtures::create_temp_dir();
        let root = crate::common::path_util::normalize(temp.path());
        write_package(&root, ".", "app");
        write_file(
            &root,
            "node_modules/themed/package.json",
            r#"{"name": "themed", "locator": {"ruleset": "touch", "rulesets": "rules"}}"#,
        );
        write_package(&root, "node_modules/themed/node_modules/child", "child");

        let seeds = PackageWalker::default().walk(&root, &SeedOptions::default());
        let anchor = |name: &str| {
            seeds
                .iter()
                .find(|s| s.name == name)
                .and_then(|s| s.options.rulesets_anchor.clone())
        };
        assert_eq!(anchor("app"), None);
        assert_eq!(anchor("themed"), Some(root.join("node_modules/themed")));
        assert_eq!(anchor("child"), Some(root.join("node_modules/themed")));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_cycles_visited_once() {
        let temp = crate::test_fixtures::create_temp_dir();
        let root = crate::common::path_util::normalize(temp.path());
        write_package(&root, ".", "app");
        write_package(&root, "node_modules/a", "a");
        create_dir(&root, "node_modules/a/node_modules");
        std::os::unix::fs::symlink(
            root.join("node_modules/a"),
            root.join("node_modules/a/node_modules/a-again"),
        )
        .expect("Failed to create symlink");

        let seeds = PackageWalker::default().walk(&root, &SeedOptions::default());
        assert_eq!(seeds.len(), 2);
    }
}
