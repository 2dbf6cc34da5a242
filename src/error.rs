use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageChatError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] ureq::Error),

    #[error("Failed to load {source_name}: {reason}")]
    Retrieval { source_name: String, reason: String },

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("No content sources given")]
    NoSources,
}

impl PageChatError {
    /// Build a retrieval error for a source that could not be loaded
    pub fn retrieval(source: impl Into<String>, reason: impl Into<String>) -> Self {
        PageChatError::Retrieval {
            source_name: source.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error aborted a build because a source could not be loaded
    pub fn is_retrieval(&self) -> bool {
        matches!(
            self,
            PageChatError::Retrieval { .. } | PageChatError::HttpError(_) | PageChatError::IoError(_)
        )
    }

    /// Get an actionable hint for how to resolve this error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            PageChatError::HttpError(_) => Some(
                "Check your internet connection, or point at a saved copy:\n  pagechat ask \"<question>\" ./page.html"
            ),
            PageChatError::Retrieval { .. } => Some(
                "Every source must load for the corpus to be built.\nCheck the URL or path, then retry."
            ),
            PageChatError::TomlError(_) | PageChatError::ConfigError(_) => Some(
                "Inspect your configuration with `pagechat config show`\nOr start over with `pagechat config init --force`"
            ),
            PageChatError::NoSources => Some(
                "Pass at least one URL or file: pagechat chat https://example.com/about"
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PageChatError>;
