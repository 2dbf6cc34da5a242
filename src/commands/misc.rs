//! Miscellaneous commands: config, completions

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;

use pagechat::cli::{Cli, CompletionShell};
use pagechat::config::Config;
use pagechat::error::{PageChatError, Result};

/// Print the effective configuration as TOML
pub fn cmd_config_show() -> Result<()> {
    let config = Config::load()?;
    let path = Config::config_path()?;
    let origin = if path.exists() {
        path.display().to_string()
    } else {
        "built-in defaults".to_string()
    };
    println!("{}", format!("# {}", origin).dimmed());
    print!("{}", config.to_toml()?);
    Ok(())
}

pub fn cmd_config_path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}

/// Write the default configuration file
pub fn cmd_config_init(force: bool) -> Result<()> {
    let path = Config::config_path()?;
    if path.exists() && !force {
        return Err(PageChatError::ConfigError(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    Config::default().save()?;
    println!("{} Wrote {}", "✓".green(), path.display());
    println!("  Add the pages to index under {}", "pages = [...]".cyan());
    Ok(())
}

/// Generate shell completions
pub fn cmd_completions(shell: CompletionShell) -> Result<()> {
    let mut cmd = Cli::command();
    let shell = match shell {
        CompletionShell::Bash => Shell::Bash,
        CompletionShell::Zsh => Shell::Zsh,
        CompletionShell::Fish => Shell::Fish,
        CompletionShell::Powershell => Shell::PowerShell,
    };
    generate(shell, &mut cmd, "pagechat", &mut io::stdout());
    Ok(())
}
