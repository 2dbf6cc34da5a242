//! pagechat - ask questions about a web page's own content

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pagechat::cli::{Cli, Commands, ConfigCommands};
use pagechat::error::Result;

mod commands;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        if let Some(hint) = e.hint() {
            eprintln!("\n{}", hint);
        }
        std::process::exit(1);
    }
}

/// Log to stderr; RUST_LOG wins over the --verbose default
fn init_logging(verbose: bool) {
    let default = if verbose { "pagechat=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Ask { query, source, json } => commands::cmd_ask(&query, source, json),
        Commands::Chat { source } => commands::cmd_chat(source),
        Commands::Sentences { source, json } => commands::cmd_sentences(source, json),
        Commands::Rank { query, source, json } => commands::cmd_rank(&query, source, json),
        Commands::Contact { source, json } => commands::cmd_contact(source, json),

        Commands::Config(ConfigCommands::Show) => commands::cmd_config_show(),
        Commands::Config(ConfigCommands::Path) => commands::cmd_config_path(),
        Commands::Config(ConfigCommands::Init { force }) => commands::cmd_config_init(force),

        Commands::Completions { shell } => commands::cmd_completions(shell),
    }
}
