//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Bundle locator - find bundles and their classified resources
#[derive(Parser, Debug)]
#[command(
    name = "bundle-locator",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Locate bundles and classify their resources",
    long_about = "Walks an application directory and its installed packages, resolves the \
                  ruleset of every bundle and classifies bundle files into typed resources \
                  (controllers, models, views, ...).",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  bundle-locator list\n    \
                  bundle-locator -r ./app show Weather --selector iphone\n    \
                  bundle-locator resources --ext js --type models\n    \
                  bundle-locator owner mojits/Weather/views/index.html"
)]
pub struct Cli {
    #[command(flatten)]
    pub locate: LocateArgs,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options controlling how bundles are located
#[derive(Args, Debug, Default, Clone)]
pub struct LocateArgs {
    /// Application root directory (defaults to current directory)
    #[arg(long, short = 'r', global = true)]
    pub root: Option<PathBuf>,

    /// Locator configuration file (defaults to <root>/locator.yaml when present)
    #[arg(long, global = true, env = "BUNDLE_LOCATOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory name to skip while classifying (repeatable)
    #[arg(long, value_name = "NAME", global = true)]
    pub exclude: Vec<String>,

    /// Deepest node_modules nesting level to walk
    #[arg(long, value_name = "DEPTH", global = true, env = "BUNDLE_LOCATOR_MAX_DEPTH")]
    pub max_depth: Option<usize>,

    /// Ruleset applied to the root bundle
    #[arg(long, global = true)]
    pub ruleset: Option<String>,

    /// Rulesets file applied to the root bundle
    #[arg(long, value_name = "LOCATION", global = true)]
    pub rulesets: Option<String>,

    /// Application directory for app-level ruleset lookups
    #[arg(long, global = true)]
    pub app_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List located bundles
    List(ListArgs),

    /// Show a bundle and its resources
    Show(ShowArgs),

    /// List classified resources of every bundle
    Resources(ResourcesArgs),

    /// Print the bundle owning a path
    Owner(OwnerArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the list command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show the bundle tree:\n    bundle-locator list\n\n\
                  List bundle names with a prefix:\n    bundle-locator list --prefix modown-\n\n\
                  Machine readable output:\n    bundle-locator list --json")]
pub struct ListArgs {
    /// Only list bundle names starting with this prefix
    #[arg(long)]
    pub prefix: Option<String>,

    /// Print JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the show command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show bundle resources:\n    bundle-locator show Weather\n\n\
                  Include resources of a selector:\n    bundle-locator show Weather --selector iphone")]
pub struct ShowArgs {
    /// Bundle name to show
    pub name: String,

    /// Merge the resources of this selector over the common ones
    #[arg(long)]
    pub selector: Option<String>,

    /// Print JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the resources command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  All JavaScript resources:\n    bundle-locator resources --ext js\n\n\
                  Views and models:\n    bundle-locator resources --type views --type models")]
pub struct ResourcesArgs {
    /// Only resources with this extension (repeatable)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Only resources of this type (repeatable)
    #[arg(long = "type", value_name = "TYPE")]
    pub types: Vec<String>,

    /// Print JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the owner command
#[derive(Parser, Debug)]
pub struct OwnerArgs {
    /// File or directory path, relative to the root or absolute
    pub path: PathBuf,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    bundle-locator completions bash > ~/.bash_completion.d/bundle-locator\n\n\
                  Generate zsh completions:\n    bundle-locator completions zsh > ~/.zfunc/_bundle-locator")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
