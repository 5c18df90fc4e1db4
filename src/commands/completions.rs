//! Shell completions command

use clap::CommandFactory;

use bundle_locator::error::{Result, config as config_error};

use crate::cli::CompletionsArgs;

/// Generate shell completions
pub fn run(args: &CompletionsArgs) -> Result<()> {
    let shell_name = args.shell.to_lowercase();
    let shell = match shell_name.as_str() {
        "bash" => clap_complete::Shell::Bash,
        "elvish" => clap_complete::Shell::Elvish,
        "fish" => clap_complete::Shell::Fish,
        "powershell" | "pwsh" => clap_complete::Shell::PowerShell,
        "zsh" => clap_complete::Shell::Zsh,
        _ => {
            return Err(config_error::invalid(format!(
                "unknown shell '{}', supported shells: bash, elvish, fish, powershell, zsh",
                args.shell
            )));
        }
    };

    let mut cmd = <crate::cli::Cli as CommandFactory>::command();
    clap_complete::generate(
        shell,
        &mut cmd,
        "bundle-locator",
        &mut std::io::stdout().lock(),
    );

    Ok(())
}
