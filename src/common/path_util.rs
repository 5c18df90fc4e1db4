//! Path helpers shared by the walker, the classifier and the ownership index
//!
//! Every absolute path the locator stores goes through [`normalize`] so that
//! comparisons between bundle base directories and user supplied paths are
//! made on the same representation (symlinks resolved, `/var` vs
//! `/private/var` on macOS, verbatim prefixes stripped on Windows).

use std::path::{Component, Path, PathBuf};

use normpath::PathExt;

/// Normalize a path, resolving symlinks where the path exists
///
/// For non-existent paths, normalizes the longest existing ancestor and appends
/// the remaining components, so that lookups for paths that do not exist yet
/// still compare equal to the normalized bundle directories they live under.
pub fn normalize(path: &Path) -> PathBuf {
    if let Ok(norm) = path.normalize() {
        return dunce::simplified(norm.as_path()).to_path_buf();
    }

    let cleaned = lexical_clean(path);
    let mut current = cleaned.as_path();
    let mut components = Vec::new();

    while !current.exists() {
        let (Some(file_name), Some(parent)) = (current.file_name(), current.parent()) else {
            return cleaned.clone();
        };
        components.push(file_name);
        current = parent;
    }

    let mut result = current
        .normalize()
        .map(|norm| dunce::simplified(norm.as_path()).to_path_buf())
        .unwrap_or_else(|_| current.to_path_buf());

    for component in components.iter().rev() {
        result = result.join(component);
    }

    result
}

/// Canonicalize an existing directory, failing if it is missing or unreadable
pub fn canonical_dir(path: &Path) -> std::io::Result<PathBuf> {
    let canonical = dunce::canonicalize(path)?;
    if !canonical.is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotADirectory,
            format!("{} is not a directory", canonical.display()),
        ));
    }
    std::fs::read_dir(&canonical)?;
    Ok(normalize(&canonical))
}

/// Remove `.` components and fold `..` into their parent without touching the disk
pub fn lexical_clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !cleaned.pop() {
                    cleaned.push(component);
                }
            }
            other => cleaned.push(other),
        }
    }
    cleaned
}

/// Convert a path to its forward-slash string representation
pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Whether `path` is `base` or lies beneath it
///
/// Matching is component-wise, so `mojits/Weather2` is not within `mojits/Weather`.
pub fn is_within(path: &Path, base: &Path) -> bool {
    path.starts_with(base)
}

/// Whether `path` lies beneath `base` without being `base` itself
pub fn is_strictly_within(path: &Path, base: &Path) -> bool {
    path != base && path.starts_with(base)
}

/// Normalize an extension filter entry (`".js"` and `"js"` are the same filter)
pub fn normalize_extension(ext: &str) -> String {
    ext.trim_start_matches('.').to_ascii_lowercase()
}

/// Whether the file extension of `path` is one of `extensions`
///
/// An empty list matches everything. Entries may carry a leading dot.
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return true;
    }
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    extensions.iter().any(|wanted| normalize_extension(wanted) == ext)
}

/// A file name split into its stem, affinity infix and extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNameParts {
    pub stem: String,
    pub affinity: Option<String>,
    pub ext: String,
}

/// Split `controller.common.js` into `controller`, `common` and `js`
///
/// The second-to-last dotted segment is taken as the affinity only when it is
/// one of `affinities`, so `jquery.min.js` keeps `jquery.min` as its stem.
/// Dotfiles keep their leading dot in the stem.
pub fn split_file_name(file_name: &str, affinities: &[String]) -> FileNameParts {
    let (prefix, body) = match file_name.strip_prefix('.') {
        Some(rest) => (".", rest),
        None => ("", file_name),
    };

    let (rest, ext) = match body.rsplit_once('.') {
        Some((rest, ext)) if !rest.is_empty() => (rest, ext),
        _ => {
            return FileNameParts {
                stem: file_name.to_string(),
                affinity: None,
                ext: String::new(),
            };
        }
    };

    if let Some((stem, candidate)) = rest.rsplit_once('.') {
        if !stem.is_empty() && affinities.iter().any(|a| a == candidate) {
            return FileNameParts {
                stem: format!("{prefix}{stem}"),
                affinity: Some(candidate.to_string()),
                ext: ext.to_string(),
            };
        }
    }

    FileNameParts {
        stem: format!("{prefix}{rest}"),
        affinity: None,
        ext: ext.to_string(),
    }
}
