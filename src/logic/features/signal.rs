//! Signal - a feature value that knows whether it was measured or defaulted
//!
//! Every network- or browser-dependent heuristic can fail independently.
//! Instead of exceptions-as-control-flow, a failed probe yields its
//! documented default together with the reason, so callers (and tests)
//! can distinguish "measured 0" from "defaulted to 0 because the fetch
//! timed out".

use serde::{Deserialize, Serialize};

/// Why a feature fell back to its documented default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefaultReason {
    /// Transport-level failure (connect refused, DNS, TLS, bad status).
    NetworkError,
    /// The probe's own deadline elapsed.
    Timeout,
    /// No page content was available to inspect.
    MissingContent,
    /// Registry (RDAP) lookup failed or returned no usable date.
    LookupFailed,
    /// No browser automation handle was provided, or it crashed.
    NoAutomation,
}

impl DefaultReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DefaultReason::NetworkError => "network_error",
            DefaultReason::Timeout => "timeout",
            DefaultReason::MissingContent => "missing_content",
            DefaultReason::LookupFailed => "lookup_failed",
            DefaultReason::NoAutomation => "no_automation",
        }
    }
}

/// A single feature value plus its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub value: f32,
    pub defaulted: Option<DefaultReason>,
}

impl Signal {
    /// A value actually computed from the input.
    pub fn measured(value: f32) -> Self {
        Self { value, defaulted: None }
    }

    /// The documented default, with the reason it was chosen.
    pub fn defaulted(value: f32, reason: DefaultReason) -> Self {
        Self { value, defaulted: Some(reason) }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_defaulted(&self) -> bool {
        self.defaulted.is_some()
    }

    pub fn reason(&self) -> Option<DefaultReason> {
        self.defaulted
    }
}

impl From<f32> for Signal {
    fn from(value: f32) -> Self {
        Signal::measured(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measured_signal() {
        let s = Signal::measured(1.0);
        assert_eq!(s.value(), 1.0);
        assert!(!s.is_defaulted());
        assert_eq!(s.reason(), None);
    }

    #[test]
    fn test_defaulted_signal_keeps_reason() {
        let s = Signal::defaulted(0.0, DefaultReason::Timeout);
        assert_eq!(s.value(), 0.0);
        assert!(s.is_defaulted());
        assert_eq!(s.reason(), Some(DefaultReason::Timeout));
    }
}
