//! Page fetcher collaborator
//!
//! `fetch(url) -> {title, raw_html}`. The default impl is a blocking
//! HTTP GET with a `<title>` scrape; hosts that drive a full rendering
//! browser supply their own impl. Absent or failed fetches flow into the
//! extractors as missing content, which triggers the fail-closed markup
//! defaults.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::FETCH_TIMEOUT_SECS;

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("title pattern"));

/// A fetched, possibly rendered page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchedPage {
    pub title: String,
    pub raw_html: String,
}

/// Fetch failure (transport, status, timeout).
#[derive(Debug, Clone)]
pub struct FetchError(pub String);

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FetchError: {}", self.0)
    }
}

impl std::error::Error for FetchError {}

/// Page fetcher collaborator interface.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// Plain HTTP fetcher. No script execution; the title comes from a
/// markup scrape.
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
                .build(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let resp = self
            .agent
            .get(url)
            .call()
            .map_err(|e| FetchError(e.to_string()))?;
        let raw_html = resp
            .into_string()
            .map_err(|e| FetchError(e.to_string()))?;
        let title = scrape_title(&raw_html);
        Ok(FetchedPage { title, raw_html })
    }
}

fn scrape_title(raw_html: &str) -> String {
    TITLE_RE
        .captures(raw_html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrape_title() {
        assert_eq!(scrape_title("<html><title>Login Page</title></html>"), "Login Page");
        assert_eq!(scrape_title("<TITLE lang=\"en\"> Spaced </TITLE>"), "Spaced");
        assert_eq!(scrape_title("<html><body>no title</body></html>"), "");
    }

    #[test]
    fn test_http_fetcher_error_on_dead_host() {
        let fetcher = HttpFetcher::new();
        assert!(fetcher.fetch("http://host.invalid/").is_err());
    }
}
