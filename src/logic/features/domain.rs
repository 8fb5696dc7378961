//! Domain registry intel (RDAP)
//!
//! Registration age and expiry window for a URL's host, looked up over
//! RDAP and cached per process. The two features carry opposite failure
//! polarities, preserved from the trained model's behavior:
//! - age: unknown on failure (missing value, NaN)
//! - expiry: "not expiring soon" (1) on failure, fail-open

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde_json::Value;

use crate::constants::{EXPIRY_SOON_MONTHS, FETCH_TIMEOUT_SECS};

use super::signal::{DefaultReason, Signal};
use super::url::host;

const DEFAULT_RDAP_ENDPOINT: &str = "https://rdap.org/domain";

/// Registration and expiration dates for one domain.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomainDates {
    pub registered: Option<DateTime<Utc>>,
    pub expires: Option<DateTime<Utc>>,
}

/// RDAP client with a per-process cache.
pub struct DomainIntel {
    endpoint: String,
    agent: ureq::Agent,
    cache: RwLock<HashMap<String, DomainDates>>,
}

impl DomainIntel {
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_RDAP_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            agent: ureq::AgentBuilder::new()
                .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
                .build(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Look up a domain, hitting the cache first. `None` on any failure.
    fn lookup(&self, domain: &str) -> Option<DomainDates> {
        if domain.is_empty() {
            return None;
        }
        if let Some(dates) = self.cache.read().get(domain) {
            return Some(*dates);
        }

        let url = format!("{}/{}", self.endpoint, domain);
        let body: Value = match self.agent.get(&url).call() {
            Ok(resp) => match resp.into_json() {
                Ok(v) => v,
                Err(e) => {
                    log::debug!("rdap parse failed for {}: {}", domain, e);
                    return None;
                }
            },
            Err(e) => {
                log::debug!("rdap lookup failed for {}: {}", domain, e);
                return None;
            }
        };

        let dates = parse_events(&body);
        self.cache.write().insert(domain.to_string(), dates);
        Some(dates)
    }

    /// Days since registration; missing (NaN) when the lookup fails or
    /// the registry reports no registration event.
    pub fn domain_age_days(&self, url: &str) -> Signal {
        match self.lookup(host(url)).and_then(|d| d.registered) {
            Some(registered) => {
                let days = (Utc::now() - registered).num_days();
                Signal::measured(days as f32)
            }
            None => Signal::defaulted(f32::NAN, DefaultReason::LookupFailed),
        }
    }

    /// 0 if the domain expires within six months, else 1.
    /// Lookup failure and a missing expiry date both default to 1.
    pub fn domain_not_expiring(&self, url: &str) -> Signal {
        match self.lookup(host(url)) {
            Some(DomainDates { expires: Some(expires), .. }) => {
                let days_until = (expires - Utc::now()).num_days();
                if (days_until as f64 / 30.0) < EXPIRY_SOON_MONTHS as f64 {
                    Signal::measured(0.0)
                } else {
                    Signal::measured(1.0)
                }
            }
            _ => Signal::defaulted(1.0, DefaultReason::LookupFailed),
        }
    }
}

impl Default for DomainIntel {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull registration/expiration out of an RDAP `events` array.
fn parse_events(body: &Value) -> DomainDates {
    let mut dates = DomainDates::default();
    let events = match body.get("events").and_then(Value::as_array) {
        Some(events) => events,
        None => return dates,
    };
    for event in events {
        let action = event.get("eventAction").and_then(Value::as_str).unwrap_or("");
        let date = event
            .get("eventDate")
            .and_then(Value::as_str)
            .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
            .map(|d| d.with_timezone(&Utc));
        match action {
            "registration" => dates.registered = date.or(dates.registered),
            "expiration" => dates.expires = date.or(dates.expires),
            _ => {}
        }
    }
    dates
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_events() {
        let body = json!({
            "events": [
                {"eventAction": "registration", "eventDate": "2015-03-01T00:00:00Z"},
                {"eventAction": "expiration", "eventDate": "2030-03-01T00:00:00Z"},
                {"eventAction": "last changed", "eventDate": "2024-01-01T00:00:00Z"}
            ]
        });
        let dates = parse_events(&body);
        assert!(dates.registered.is_some());
        assert!(dates.expires.is_some());
        assert_eq!(dates.registered.unwrap().format("%Y").to_string(), "2015");
    }

    #[test]
    fn test_parse_events_missing_section() {
        let dates = parse_events(&json!({"handle": "EXAMPLE"}));
        assert!(dates.registered.is_none());
        assert!(dates.expires.is_none());
    }

    #[test]
    fn test_lookup_failure_defaults() {
        // .invalid endpoint guarantees a fast, hermetic failure.
        let intel = DomainIntel::with_endpoint("http://rdap.host.invalid");

        let age = intel.domain_age_days("http://example.com/");
        assert!(age.value().is_nan());
        assert_eq!(age.reason(), Some(DefaultReason::LookupFailed));

        let expiry = intel.domain_not_expiring("http://example.com/");
        assert_eq!(expiry.value(), 1.0);
        assert_eq!(expiry.reason(), Some(DefaultReason::LookupFailed));
    }
}
