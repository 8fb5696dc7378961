//! Browser-automation features
//!
//! The probe itself is a consumed interface: some host drives a real
//! headless browser. The two features here work over any impl and map
//! every automation failure, including an absent probe, to their
//! documented 0 default.

use std::time::Duration;

use crate::constants::POPUP_WAIT_SECS;

use super::signal::{DefaultReason, Signal};
use super::url::host;

/// Automation failure (driver crash, window closed, navigation error).
#[derive(Debug, Clone)]
pub struct BrowserError(pub String);

impl std::fmt::Display for BrowserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BrowserError: {}", self.0)
    }
}

impl std::error::Error for BrowserError {}

/// Headless-browser collaborator.
pub trait BrowserProbe {
    fn navigate(&self, url: &str) -> Result<(), BrowserError>;
    /// Wait up to `timeout` for a native dialog. `Ok(false)` means the
    /// wait elapsed without a dialog.
    fn wait_for_dialog(&self, timeout: Duration) -> Result<bool, BrowserError>;
    fn list_anchor_hrefs(&self) -> Result<Vec<String>, BrowserError>;
}

/// 1 if a native dialog appears within 5 seconds of navigation, 0 on
/// quiet timeout; 0 default on any automation failure.
pub fn popup_present(probe: Option<&dyn BrowserProbe>, url: &str) -> Signal {
    let probe = match probe {
        Some(p) => p,
        None => return Signal::defaulted(0.0, DefaultReason::NoAutomation),
    };
    if let Err(e) = probe.navigate(url) {
        log::debug!("popup probe navigation failed for {}: {}", url, e);
        return Signal::defaulted(0.0, DefaultReason::NoAutomation);
    }
    match probe.wait_for_dialog(Duration::from_secs(POPUP_WAIT_SECS)) {
        Ok(true) => Signal::measured(1.0),
        Ok(false) => Signal::measured(0.0),
        Err(e) => {
            log::debug!("popup probe failed for {}: {}", url, e);
            Signal::defaulted(0.0, DefaultReason::NoAutomation)
        }
    }
}

/// 1 if any anchor on the rendered page points at a host other than the
/// origin host; 0 default on any automation failure.
pub fn third_party_links(probe: Option<&dyn BrowserProbe>, url: &str) -> Signal {
    let probe = match probe {
        Some(p) => p,
        None => return Signal::defaulted(0.0, DefaultReason::NoAutomation),
    };
    if let Err(e) = probe.navigate(url) {
        log::debug!("link probe navigation failed for {}: {}", url, e);
        return Signal::defaulted(0.0, DefaultReason::NoAutomation);
    }
    let hrefs = match probe.list_anchor_hrefs() {
        Ok(hrefs) => hrefs,
        Err(e) => {
            log::debug!("link probe failed for {}: {}", url, e);
            return Signal::defaulted(0.0, DefaultReason::NoAutomation);
        }
    };

    let origin = host(url);
    let foreign = hrefs.iter().any(|href| {
        let h = host(href);
        !h.is_empty() && h != origin
    });
    if foreign {
        Signal::measured(1.0)
    } else {
        Signal::measured(0.0)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct StubProbe {
        dialog: Result<bool, ()>,
        hrefs: Vec<String>,
        fail_navigation: bool,
    }

    impl BrowserProbe for StubProbe {
        fn navigate(&self, _url: &str) -> Result<(), BrowserError> {
            if self.fail_navigation {
                Err(BrowserError("driver crashed".into()))
            } else {
                Ok(())
            }
        }

        fn wait_for_dialog(&self, _timeout: Duration) -> Result<bool, BrowserError> {
            self.dialog.map_err(|_| BrowserError("window closed".into()))
        }

        fn list_anchor_hrefs(&self) -> Result<Vec<String>, BrowserError> {
            Ok(self.hrefs.clone())
        }
    }

    fn probe(dialog: Result<bool, ()>, hrefs: &[&str]) -> StubProbe {
        StubProbe {
            dialog,
            hrefs: hrefs.iter().map(|s| s.to_string()).collect(),
            fail_navigation: false,
        }
    }

    #[test]
    fn test_popup_observed() {
        let p = probe(Ok(true), &[]);
        assert_eq!(popup_present(Some(&p), "http://example.com").value(), 1.0);
    }

    #[test]
    fn test_popup_quiet_timeout_is_measured_zero() {
        let p = probe(Ok(false), &[]);
        let s = popup_present(Some(&p), "http://example.com");
        assert_eq!(s.value(), 0.0);
        assert!(!s.is_defaulted());
    }

    #[test]
    fn test_popup_without_probe_defaults() {
        let s = popup_present(None, "http://example.com");
        assert_eq!(s.value(), 0.0);
        assert_eq!(s.reason(), Some(DefaultReason::NoAutomation));
    }

    #[test]
    fn test_popup_automation_failure_defaults() {
        let p = probe(Err(()), &[]);
        let s = popup_present(Some(&p), "http://example.com");
        assert_eq!(s.reason(), Some(DefaultReason::NoAutomation));
    }

    #[test]
    fn test_navigation_failure_defaults() {
        let mut p = probe(Ok(true), &[]);
        p.fail_navigation = true;
        assert!(popup_present(Some(&p), "http://example.com").is_defaulted());
        assert!(third_party_links(Some(&p), "http://example.com").is_defaulted());
    }

    #[test]
    fn test_third_party_links() {
        let p = probe(Ok(false), &["http://example.com/about", "http://evil.example.net/"]);
        assert_eq!(third_party_links(Some(&p), "http://example.com/").value(), 1.0);

        let p = probe(Ok(false), &["http://example.com/a", "/relative"]);
        assert_eq!(third_party_links(Some(&p), "http://example.com/").value(), 0.0);
    }
}
