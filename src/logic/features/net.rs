//! Live-fetch features
//!
//! Blocking HTTP probes with explicit timeouts. Each probe swallows its
//! own failures and yields the documented fail-safe default (0); a dead
//! host never aborts extraction of the remaining features.

use std::time::{Duration, Instant};

use crate::constants::{FETCH_TIMEOUT_SECS, REDIRECT_HOP_LIMIT, SLOW_RESPONSE_SECS};

use super::signal::{DefaultReason, Signal};

/// Upper bound on manually followed hops. Anything past the flag limit
/// is already conclusive.
const MAX_FOLLOWED_HOPS: usize = 10;

fn probe_agent(follow_redirects: bool) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .redirects(if follow_redirects { 10 } else { 0 })
        .build()
}

/// 1 if the observed redirect chain exceeds 3 hops, else 0.
/// Network failure defaults to 0 (fail-safe-to-negative).
pub fn redirect_hop_flag(url: &str) -> Signal {
    let agent = probe_agent(false);
    let mut current = url.to_string();
    let mut hops = 0usize;

    loop {
        match agent.get(&current).call() {
            Ok(resp) if (300..400).contains(&resp.status()) => {
                let location = match resp.header("location") {
                    Some(loc) => loc.to_string(),
                    None => break,
                };
                hops += 1;
                if hops > MAX_FOLLOWED_HOPS {
                    break;
                }
                // Relative Location ends the chain; the hop still counted.
                if !location.starts_with("http") {
                    break;
                }
                current = location;
            }
            Ok(_) => break,
            // 4xx/5xx terminates the chain but the fetch itself worked.
            Err(ureq::Error::Status(_, _)) => break,
            Err(_) => {
                if hops == 0 {
                    return Signal::defaulted(0.0, DefaultReason::NetworkError);
                }
                break;
            }
        }
    }

    if hops > REDIRECT_HOP_LIMIT {
        Signal::measured(1.0)
    } else {
        Signal::measured(0.0)
    }
}

/// 1 if a full fetch (10s timeout) takes more than 3 seconds end-to-end.
/// Errors default to 0.
pub fn slow_response(url: &str) -> Signal {
    let agent = probe_agent(true);
    let start = Instant::now();

    match agent.get(url).call() {
        Ok(resp) => {
            // Drain the body so the elapsed time covers the transfer.
            let _ = resp.into_string();
            if start.elapsed().as_secs_f64() > SLOW_RESPONSE_SECS {
                Signal::measured(1.0)
            } else {
                Signal::measured(0.0)
            }
        }
        Err(ureq::Error::Status(_, _)) => {
            if start.elapsed().as_secs_f64() > SLOW_RESPONSE_SECS {
                Signal::measured(1.0)
            } else {
                Signal::measured(0.0)
            }
        }
        Err(_) => {
            let reason = if start.elapsed() >= Duration::from_secs(FETCH_TIMEOUT_SECS) {
                DefaultReason::Timeout
            } else {
                DefaultReason::NetworkError
            };
            Signal::defaulted(0.0, reason)
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // .invalid is guaranteed NXDOMAIN (RFC 2606); fails fast offline too.
    const DEAD_URL: &str = "http://host.invalid/";

    #[test]
    fn test_redirect_hop_flag_defaults_on_network_error() {
        let s = redirect_hop_flag(DEAD_URL);
        assert_eq!(s.value(), 0.0);
        assert_eq!(s.reason(), Some(DefaultReason::NetworkError));
    }

    #[test]
    fn test_slow_response_defaults_on_network_error() {
        let s = slow_response(DEAD_URL);
        assert_eq!(s.value(), 0.0);
        assert!(s.is_defaulted());
    }
}
