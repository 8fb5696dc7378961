//! Detection context - explicit dependency container
//!
//! Built once at process start and passed by reference into every
//! classification call. Holds the loaded classifiers (read-only for the
//! process lifetime) and the optional collaborators. No globals, no
//! hidden singletons.

use super::features::{BrowserProbe, DomainIntel};
use super::fetch::PageFetcher;
use super::model::Classifier;
use super::store::ResultSink;

pub struct DetectionContext {
    pub url_classifier: Box<dyn Classifier>,
    pub email_classifier: Box<dyn Classifier>,
    pub fetcher: Option<Box<dyn PageFetcher>>,
    pub browser: Option<Box<dyn BrowserProbe>>,
    pub domain_intel: DomainIntel,
    pub sink: Option<Box<dyn ResultSink>>,
}

impl DetectionContext {
    /// Minimal context: classifiers only. Probe-backed features fall
    /// back to their documented defaults until collaborators are added.
    pub fn new(url_classifier: Box<dyn Classifier>, email_classifier: Box<dyn Classifier>) -> Self {
        Self {
            url_classifier,
            email_classifier,
            fetcher: None,
            browser: None,
            domain_intel: DomainIntel::new(),
            sink: None,
        }
    }

    pub fn with_fetcher(mut self, fetcher: Box<dyn PageFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn with_browser(mut self, browser: Box<dyn BrowserProbe>) -> Self {
        self.browser = Some(browser);
        self
    }

    pub fn with_domain_intel(mut self, domain_intel: DomainIntel) -> Self {
        self.domain_intel = domain_intel;
        self
    }

    pub fn with_sink(mut self, sink: Box<dyn ResultSink>) -> Self {
        self.sink = Some(sink);
        self
    }
}
