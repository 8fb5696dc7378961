//! Page markup features
//!
//! Regex presence checks over raw fetched HTML. When no markup is
//! available all four flags default to the suspicious value (1): an
//! unfetchable page gets no benefit of the doubt. This is deliberately
//! the opposite polarity of the registry lookups in `domain.rs`.

use once_cell::sync::Lazy;
use regex::Regex;

use super::signal::{DefaultReason, Signal};

static IFRAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<iframe>|<frameBorder>").expect("iframe pattern"));
static MOUSE_OVER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<script>.+onmouseover.+</script>").expect("mouseover pattern"));
static RIGHT_CLICK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"event.button ?== ?2").expect("right-click pattern"));

/// 0 if iframe markup is present, 1 otherwise; 1 when markup is missing.
pub fn iframe_flag(raw_html: &str) -> Signal {
    if raw_html.is_empty() {
        return Signal::defaulted(1.0, DefaultReason::MissingContent);
    }
    if IFRAME_RE.is_match(raw_html) {
        Signal::measured(0.0)
    } else {
        Signal::measured(1.0)
    }
}

/// 1 if an inline script reacts to onmouseover, 0 otherwise; 1 when
/// markup is missing.
pub fn mouse_over_flag(raw_html: &str) -> Signal {
    if raw_html.is_empty() {
        return Signal::defaulted(1.0, DefaultReason::MissingContent);
    }
    if MOUSE_OVER_RE.is_match(raw_html) {
        Signal::measured(1.0)
    } else {
        Signal::measured(0.0)
    }
}

/// 0 if the page suppresses right-click (`event.button == 2`), 1
/// otherwise; 1 when markup is missing.
pub fn right_click_flag(raw_html: &str) -> Signal {
    if raw_html.is_empty() {
        return Signal::defaulted(1.0, DefaultReason::MissingContent);
    }
    if RIGHT_CLICK_RE.is_match(raw_html) {
        Signal::measured(0.0)
    } else {
        Signal::measured(1.0)
    }
}

/// Near-empty-page redirector heuristic: 0 only when markup is present
/// and two characters or fewer; 1 otherwise (including missing markup).
pub fn forwarding_flag(raw_html: &str) -> Signal {
    if raw_html.is_empty() {
        return Signal::defaulted(1.0, DefaultReason::MissingContent);
    }
    if raw_html.len() <= 2 {
        Signal::measured(0.0)
    } else {
        Signal::measured(1.0)
    }
}

/// Title length; 0 when no title was fetched.
pub fn title_length(title: Option<&str>) -> f32 {
    title.map(|t| t.len() as f32).unwrap_or(0.0)
}

/// Raw markup length; 0 when no page was fetched.
pub fn content_length(raw_html: Option<&str>) -> f32 {
    raw_html.map(|h| h.len() as f32).unwrap_or(0.0)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_markup_defaults_to_suspicious() {
        for f in [iframe_flag, mouse_over_flag, right_click_flag, forwarding_flag] {
            let s = f("");
            assert_eq!(s.value(), 1.0);
            assert_eq!(s.reason(), Some(DefaultReason::MissingContent));
        }
    }

    #[test]
    fn test_iframe_present_clears_flag() {
        assert_eq!(iframe_flag("<html><iframe></iframe></html>").value(), 0.0);
        assert_eq!(iframe_flag("<html><p>hello</p></html>").value(), 1.0);
    }

    #[test]
    fn test_mouse_over_detection() {
        let html = "<script>document.onmouseover = steal;</script>";
        assert_eq!(mouse_over_flag(html).value(), 1.0);
        assert_eq!(mouse_over_flag("<p>plain</p>").value(), 0.0);
    }

    #[test]
    fn test_right_click_suppression() {
        assert_eq!(right_click_flag("if (event.button == 2) return false;").value(), 0.0);
        assert_eq!(right_click_flag("if (event.button ==2) x();").value(), 0.0);
        assert_eq!(right_click_flag("<p>plain</p>").value(), 1.0);
    }

    #[test]
    fn test_forwarding_flag() {
        assert_eq!(forwarding_flag("ok").value(), 0.0);
        assert_eq!(forwarding_flag("<html>full page</html>").value(), 1.0);
    }

    #[test]
    fn test_lengths() {
        assert_eq!(title_length(Some("Login")), 5.0);
        assert_eq!(title_length(None), 0.0);
        assert_eq!(content_length(Some("<html></html>")), 13.0);
        assert_eq!(content_length(None), 0.0);
    }
}
