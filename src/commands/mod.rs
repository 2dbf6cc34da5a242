//! Command implementations for pagechat CLI

mod ask;
mod chat;
mod misc;

pub use ask::*;
pub use chat::*;
pub use misc::*;

use colored::Colorize;

use pagechat::cli::SourceArgs;
use pagechat::config::Config;
use pagechat::error::Result;
use pagechat::fetch::SourceRetriever;
use pagechat::{BuildReport, PageChat};

/// Everything a command needs once the sources are known
pub(crate) struct Session {
    pub config: Config,
    pub sources: Vec<String>,
    pub engine: PageChat,
}

impl Session {
    /// Load config, apply command-line overrides and resolve the sources
    pub fn prepare(args: SourceArgs) -> Result<Self> {
        let config = Config::load()?.with_overrides(args.selector, args.max_sentences)?;
        let sources = config.resolve_sources(args.sources)?;
        let engine = PageChat::from_config(&config);
        Ok(Self {
            config,
            sources,
            engine,
        })
    }

    /// Build the corpus synchronously
    pub fn build(&self) -> Result<BuildReport> {
        let retriever = SourceRetriever::from_config(&self.config);
        self.engine
            .build(&self.sources, &self.config.selector, &retriever)
    }
}

/// One-line summary of a committed build, for human output
pub(crate) fn describe_build(report: &BuildReport) -> String {
    format!(
        "{} Indexed {} sentence{} from {} source{}",
        "✓".green(),
        report.sentences,
        if report.sentences == 1 { "" } else { "s" },
        report.sources,
        if report.sources == 1 { "" } else { "s" },
    )
}
