//! Show command implementation

use console::Style;
use serde::Serialize;

use bundle_locator::domain::{ResourceFilter, ResourceNode, TypeIndex};
use bundle_locator::error::{Result, bundle as bundle_error};

use super::helpers;
use crate::cli::{LocateArgs, ShowArgs};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ShowOutput<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'a str>,
    base_directory: &'a std::path::Path,
    ruleset: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    selector: Option<&'a str>,
    resources: &'a TypeIndex,
}

pub fn run(locate: &LocateArgs, args: ShowArgs) -> Result<()> {
    let index = helpers::locate(locate)?;
    let bundle = index
        .get_bundle(&args.name)
        .ok_or_else(|| bundle_error::not_found(&args.name))?;
    let resources = bundle.get_resources(&ResourceFilter::all(), args.selector.as_deref());

    if args.json {
        return helpers::print_json(&ShowOutput {
            name: &bundle.name,
            version: bundle.version.as_deref(),
            base_directory: &bundle.base_directory,
            ruleset: bundle.ruleset.as_deref(),
            selector: args.selector.as_deref(),
            resources: &resources,
        });
    }

    println!("{}", Style::new().bold().yellow().apply_to(&bundle.name));
    if let Some(version) = &bundle.version {
        println!("  {} {}", Style::new().bold().apply_to("Version:"), version);
    }
    println!(
        "  {} {}",
        Style::new().bold().apply_to("Directory:"),
        bundle.base_directory.display()
    );
    println!(
        "  {} {}",
        Style::new().bold().apply_to("Ruleset:"),
        bundle.ruleset.as_deref().unwrap_or("(none)")
    );
    if let Some(parent) = index.parent(bundle) {
        println!("  {} {}", Style::new().bold().apply_to("Parent:"), parent.name);
    }

    if resources.is_empty() {
        println!("  No resources.");
        return Ok(());
    }

    for (resource_type, node) in &resources {
        println!("  {}", Style::new().bold().cyan().apply_to(resource_type));
        display_node(node);
    }

    Ok(())
}

fn display_node(node: &ResourceNode) {
    for resource in node.iter() {
        println!(
            "    {} {} {}",
            resource.name,
            Style::new()
                .dim()
                .apply_to(format!("[{} {}]", resource.affinity, resource.selector)),
            resource.relative_path_str()
        );
    }
}
