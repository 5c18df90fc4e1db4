//! Resources command implementation
//!
//! Prints the flattened resource listing of every bundle, in bundle tree order.

use console::Style;

use bundle_locator::domain::ResourceFilter;
use bundle_locator::error::Result;

use super::helpers;
use crate::cli::{LocateArgs, ResourcesArgs};

pub fn run(locate: &LocateArgs, args: ResourcesArgs) -> Result<()> {
    let index = helpers::locate(locate)?;
    let filter = ResourceFilter {
        extensions: args.extensions,
        types: args.types,
    };
    let resources = index.list_all_resources(&filter);

    if args.json {
        return helpers::print_json(&resources);
    }

    if resources.is_empty() {
        println!("No resources found.");
        return Ok(());
    }

    for resource in resources {
        println!(
            "{} {} {} {}",
            Style::new().bold().yellow().apply_to(&resource.bundle_name),
            Style::new().cyan().apply_to(&resource.resource_type),
            resource.name,
            Style::new().dim().apply_to(resource.relative_path_str())
        );
    }
    Ok(())
}
