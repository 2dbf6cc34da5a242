use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{PageChatError, Result};

/// Default CSS selector for the page's main content
pub const DEFAULT_SELECTOR: &str = "main";

/// Default number of sentences in an answer
pub const DEFAULT_MAX_SENTENCES: usize = 2;

/// Global pagechat configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Sources indexed when none are given on the command line
    #[serde(default)]
    pub pages: Vec<String>,

    /// CSS selector isolating the content to index
    #[serde(default = "default_selector")]
    pub selector: String,

    /// Maximum number of sentences returned per answer
    #[serde(default = "default_max_sentences")]
    pub max_sentences: usize,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User-Agent sent when fetching pages
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Chat header title
    #[serde(default = "default_title")]
    pub title: String,

    /// Chat header subtitle
    #[serde(default = "default_subtitle")]
    pub subtitle: String,

    /// First message shown when a chat starts
    #[serde(default = "default_welcome")]
    pub welcome: String,

    /// Shown instead of an empty answer when nothing on the page matched
    #[serde(default = "default_no_match")]
    pub no_match: String,
}

fn default_selector() -> String {
    DEFAULT_SELECTOR.to_string()
}

fn default_max_sentences() -> usize {
    DEFAULT_MAX_SENTENCES
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("Mozilla/5.0 (compatible; pagechat/{})", env!("CARGO_PKG_VERSION"))
}

fn default_title() -> String {
    "Ask about this profile".to_string()
}

fn default_subtitle() -> String {
    "AI HTML Assistant".to_string()
}

fn default_welcome() -> String {
    "Hi! Ask me anything about this Page.".to_string()
}

fn default_no_match() -> String {
    "I couldn't find anything about that on this page.".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pages: Vec::new(),
            selector: default_selector(),
            max_sentences: default_max_sentences(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
            title: default_title(),
            subtitle: default_subtitle(),
            welcome: default_welcome(),
            no_match: default_no_match(),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate configuration text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = self.to_toml()?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| PageChatError::ConfigError(e.to_string()))
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.selector.trim().is_empty() {
            return Err(PageChatError::ConfigError("selector must not be empty".into()));
        }
        if self.max_sentences == 0 {
            return Err(PageChatError::ConfigError(
                "max_sentences must be at least 1".into(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(PageChatError::ConfigError(
                "timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Apply command-line overrides on top of file values
    pub fn with_overrides(mut self, selector: Option<String>, max_sentences: Option<usize>) -> Result<Self> {
        if let Some(selector) = selector {
            self.selector = selector;
        }
        if let Some(max) = max_sentences {
            self.max_sentences = max;
        }
        self.validate()?;
        Ok(self)
    }

    /// Sources to index: the given ones, else the configured `pages`
    pub fn resolve_sources(&self, given: Vec<String>) -> Result<Vec<String>> {
        let sources = if given.is_empty() { self.pages.clone() } else { given };
        if sources.is_empty() {
            return Err(PageChatError::NoSources);
        }
        Ok(sources)
    }

    /// Get the config file path
    ///
    /// Supports PAGECHAT_CONFIG environment variable for test isolation
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("PAGECHAT_CONFIG") {
            return Ok(PathBuf::from(path));
        }
        let dirs = ProjectDirs::from("", "", "pagechat")
            .ok_or_else(|| PageChatError::ConfigError("Could not determine config directory".into()))?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}
