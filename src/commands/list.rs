//! List command implementation
//!
//! This command prints the located bundle tree, or the names of the bundles
//! matching a prefix.

use console::Style;

use bundle_locator::domain::Bundle;
use bundle_locator::error::Result;
use bundle_locator::locator::BundleIndex;

use super::helpers;
use crate::cli::{ListArgs, LocateArgs};

/// Run list command
pub fn run(locate: &LocateArgs, args: ListArgs) -> Result<()> {
    let index = helpers::locate(locate)?;

    if let Some(prefix) = args.prefix.as_deref() {
        let matches_prefix = |bundle: &Bundle| bundle.name.starts_with(prefix);
        let names = index.list_bundle_names(Some(&matches_prefix));
        if args.json {
            return helpers::print_json(&names);
        }
        for name in names {
            println!("{name}");
        }
        return Ok(());
    }

    if args.json {
        return helpers::print_json(&index.view(index.root_bundle()));
    }

    println!("Located bundles ({}):", index.len());
    println!();
    display_tree(&index, index.root_bundle(), 1);
    Ok(())
}

fn display_tree(index: &BundleIndex, bundle: &Bundle, level: usize) {
    let indent = "  ".repeat(level);
    let version = bundle
        .version
        .as_deref()
        .map(|v| format!(" {}", Style::new().dim().apply_to(format!("v{v}"))))
        .unwrap_or_default();
    println!(
        "{indent}{}{version} {}",
        Style::new().bold().yellow().apply_to(&bundle.name),
        Style::new()
            .dim()
            .apply_to(format!("({} resources)", bundle.resource_count()))
    );

    for child in index.children(bundle) {
        display_tree(index, child, level + 1);
    }
}
