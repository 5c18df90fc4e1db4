//! Command helper utilities

use std::path::{Path, PathBuf};

use bundle_locator::config::LocatorConfig;
use bundle_locator::error::{Result, fs as fs_error};
use bundle_locator::locator::{BundleIndex, BundleLocator};

use crate::cli::LocateArgs;

/// Configuration file picked up from the root when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "locator.yaml";

/// Resolve root path from optional argument
///
/// If a root path is provided, use it. Otherwise,
/// resolve to the current directory.
pub fn resolve_root_path(root: Option<&Path>) -> Result<PathBuf> {
    match root {
        Some(path) => Ok(path.to_path_buf()),
        None => std::env::current_dir()
            .map_err(|e| fs_error::io_error(format!("Failed to get current directory: {e}"))),
    }
}

/// Load the locator configuration and apply command line overrides
pub fn load_config(args: &LocateArgs, root: &Path) -> Result<LocatorConfig> {
    let mut config = match &args.config {
        Some(path) => LocatorConfig::from_file(path)?,
        None => {
            let default = root.join(DEFAULT_CONFIG_FILE);
            if default.is_file() {
                LocatorConfig::from_file(&default)?
            } else {
                LocatorConfig::default()
            }
        }
    };

    config.exclude.extend(args.exclude.iter().cloned());
    if args.max_depth.is_some() {
        config.max_package_depth = args.max_depth;
    }
    if args.ruleset.is_some() {
        config.ruleset.clone_from(&args.ruleset);
    }
    if args.rulesets.is_some() {
        config.rulesets.clone_from(&args.rulesets);
    }
    if args.app_dir.is_some() {
        config.application_directory.clone_from(&args.app_dir);
    }

    config.validate()?;
    tracing::debug!(?config, "effective locator configuration");
    Ok(config)
}

/// Locate every bundle below the selected root
pub fn locate(args: &LocateArgs) -> Result<BundleIndex> {
    let root = resolve_root_path(args.root.as_deref())?;
    let config = load_config(args, &root)?;
    BundleLocator::new(config).parse_bundle(&root, None)
}

/// Print a value as pretty JSON
pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
