//! bundle-locator - locate bundles and classify their resources
//!
//! Command line front end to the `bundle_locator` library: prints the bundle
//! tree of an application, the resources of a bundle, the flattened resource
//! listing and path ownership.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::List(args) => commands::list::run(&cli.locate, args),
        Commands::Show(args) => commands::show::run(&cli.locate, args),
        Commands::Resources(args) => commands::resources::run(&cli.locate, args),
        Commands::Owner(args) => commands::owner::run(&cli.locate, &args),
        Commands::Completions(args) => commands::completions::run(&args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
