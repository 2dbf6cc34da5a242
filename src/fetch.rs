//! Source retrieval
//!
//! The corpus builder never loads content itself; it is handed a
//! [`Retriever`]. Any error returned here aborts the whole build.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::error::{PageChatError, Result};

/// Loads the raw markup for one source
pub trait Retriever: Send + Sync {
    fn retrieve(&self, source: &str) -> Result<String>;
}

impl<F> Retriever for F
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    fn retrieve(&self, source: &str) -> Result<String> {
        self(source)
    }
}

/// Fetch pages over HTTP(S) using ureq
pub struct HttpRetriever {
    agent: ureq::Agent,
    user_agent: String,
}

impl HttpRetriever {
    pub fn new(timeout: Duration, user_agent: impl Into<String>) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self {
            agent,
            user_agent: user_agent.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Duration::from_secs(config.timeout_secs), config.user_agent.clone())
    }
}

impl Retriever for HttpRetriever {
    fn retrieve(&self, source: &str) -> Result<String> {
        debug!(url = source, "Fetching page");
        let response = self
            .agent
            .get(source)
            .header("User-Agent", self.user_agent.as_str())
            .call()
            .map_err(|e| match e {
                ureq::Error::StatusCode(code) => {
                    PageChatError::retrieval(source, format!("HTTP status {}", code))
                }
                other => PageChatError::HttpError(other),
            })?;

        let html = response.into_body().read_to_string()?;
        Ok(html)
    }
}

/// Read pages from the local filesystem; a `file://` URL is accepted too
#[derive(Debug, Default, Clone, Copy)]
pub struct FileRetriever;

impl FileRetriever {
    fn resolve(source: &str) -> Result<PathBuf> {
        if source.starts_with("file:") {
            let url = Url::parse(source)?;
            return url
                .to_file_path()
                .map_err(|_| PageChatError::retrieval(source, "not a local file URL"));
        }
        Ok(Path::new(source).to_path_buf())
    }
}

impl Retriever for FileRetriever {
    fn retrieve(&self, source: &str) -> Result<String> {
        let path = Self::resolve(source)?;
        debug!(path = %path.display(), "Reading page");
        std::fs::read_to_string(&path).map_err(|e| PageChatError::retrieval(source, e.to_string()))
    }
}

/// Pick HTTP or file retrieval per source
pub struct SourceRetriever {
    http: HttpRetriever,
    file: FileRetriever,
}

impl SourceRetriever {
    pub fn from_config(config: &Config) -> Self {
        Self {
            http: HttpRetriever::from_config(config),
            file: FileRetriever,
        }
    }
}

impl Retriever for SourceRetriever {
    fn retrieve(&self, source: &str) -> Result<String> {
        if is_http_url(source) {
            self.http.retrieve(source)
        } else {
            self.file.retrieve(source)
        }
    }
}

/// Whether a source names an http:// or https:// URL
pub fn is_http_url(source: &str) -> bool {
    Url::parse(source)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}
