use clap::{Args, Parser, Subcommand, ValueEnum};

/// Shell types for completion generation
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

#[derive(Parser)]
#[command(name = "pagechat")]
#[command(author, version, about = "Ask questions about a web page's own content", long_about = None)]
#[command(after_help = r#"Examples:
  pagechat ask "what is your experience?" https://example.com/about
  pagechat chat ./resume.html                       Interactive Q&A
  pagechat chat https://example.com/about https://example.com/cv
  pagechat contact https://example.com/about        Phone, email, profile link
  pagechat sentences ./resume.html --json           Inspect the corpus

Quick Start:
  1. pagechat config init
  2. Add your pages to `pages = [...]` in the file shown by `pagechat config path`
  3. pagechat chat
"#)]
pub struct Cli {
    /// Log extraction and build details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the corpus comes from and how to read it
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// URLs or files to index (defaults to `pages` from the config file)
    #[arg(value_name = "SOURCE")]
    pub sources: Vec<String>,

    /// CSS selector for the main content (default: "main")
    #[arg(long, short = 's')]
    pub selector: Option<String>,

    /// Maximum sentences per answer (default: 2)
    #[arg(long, short = 'n')]
    pub max_sentences: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Answer a single question
    #[command(after_help = r##"Examples:
  pagechat ask "backend experience" https://example.com/about
  pagechat ask "education" ./cv.html --selector "#resume"
  pagechat ask "skills" ./cv.html -n 3
"##)]
    Ask {
        /// The question
        #[arg(value_name = "QUESTION")]
        query: String,

        #[command(flatten)]
        source: SourceArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive question and answer session on stdin
    #[command(after_help = r#"Examples:
  pagechat chat https://example.com/about
  echo "what languages do you know?" | pagechat chat ./cv.html

Type `quit` or `exit` (or press Ctrl+D) to leave.
"#)]
    Chat {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Show the sentence corpus built from the sources
    Sentences {
        #[command(flatten)]
        source: SourceArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show every sentence that matches a question, with its score
    Rank {
        /// The question
        #[arg(value_name = "QUESTION")]
        query: String,

        #[command(flatten)]
        source: SourceArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show contact details found on the pages
    Contact {
        #[command(flatten)]
        source: SourceArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Configuration file management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    #[command(after_help = r#"Examples:
  pagechat completions bash > ~/.local/share/bash-completion/completions/pagechat
  pagechat completions zsh > ~/.zfunc/_pagechat
  pagechat completions fish > ~/.config/fish/completions/pagechat.fish
"#)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
