//! URL string features
//!
//! Pure functions over the raw URL text. No network access here; the
//! live probes live in `net.rs` / `browser.rs`.

use std::net::IpAddr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{LONG_URL_THRESHOLD, SHORTENER_PATTERN};

static SHORTENER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(SHORTENER_PATTERN).expect("shortener pattern"));

/// Network-location portion of a URL: everything between the scheme
/// separator and the first `/`, `?` or `#`. Without a scheme the leading
/// run up to the first separator is treated as the netloc.
pub fn netloc(url: &str) -> &str {
    let rest = match url.find("://") {
        Some(pos) => &url[pos + 3..],
        None => url,
    };
    let end = rest
        .find(|c| c == '/' || c == '?' || c == '#')
        .unwrap_or(rest.len());
    &rest[..end]
}

/// Host component of the netloc: userinfo and port stripped, IPv6
/// brackets removed.
pub fn host(url: &str) -> &str {
    let netloc = netloc(url);
    let after_user = match netloc.rfind('@') {
        Some(pos) => &netloc[pos + 1..],
        None => netloc,
    };
    if let Some(stripped) = after_user.strip_prefix('[') {
        return stripped.split(']').next().unwrap_or(stripped);
    }
    match after_user.rfind(':') {
        Some(pos) => &after_user[..pos],
        None => after_user,
    }
}

/// Path portion of the URL (after the netloc, before query/fragment).
fn path(url: &str) -> &str {
    let rest = match url.find("://") {
        Some(pos) => &url[pos + 3..],
        None => url,
    };
    let rest = match rest.find('/') {
        Some(pos) => &rest[pos..],
        None => return "",
    };
    let end = rest.find(|c| c == '?' || c == '#').unwrap_or(rest.len());
    &rest[..end]
}

/// 1 if the host is a syntactically valid IPv4/IPv6 literal.
pub fn has_ip(url: &str) -> f32 {
    if host(url).parse::<IpAddr>().is_ok() {
        1.0
    } else {
        0.0
    }
}

/// 1 if `@` appears anywhere in the URL string.
pub fn has_at_symbol(url: &str) -> f32 {
    if url.contains('@') {
        1.0
    } else {
        0.0
    }
}

/// Raw character count.
pub fn url_length(url: &str) -> f32 {
    url.chars().count() as f32
}

/// 0 for URLs shorter than the threshold, 1 otherwise.
pub fn long_url_flag(url: &str) -> f32 {
    if url.chars().count() < LONG_URL_THRESHOLD {
        0.0
    } else {
        1.0
    }
}

/// Count of non-empty path segments.
pub fn url_depth(url: &str) -> f32 {
    path(url).split('/').filter(|s| !s.is_empty()).count() as f32
}

/// Length of the first `/`-delimited piece after the last `//`.
pub fn domain_length(url: &str) -> f32 {
    let after = url.rsplit("//").next().unwrap_or(url);
    after.split('/').next().unwrap_or("").len() as f32
}

/// `/`-separated segment count after the last `//`, minus one.
pub fn path_length(url: &str) -> f32 {
    let after = url.rsplit("//").next().unwrap_or(url);
    (after.split('/').count() as f32) - 1.0
}

/// Dots in the whole URL minus one.
pub fn subdomain_count(url: &str) -> f32 {
    (url.matches('.').count() as f32) - 1.0
}

/// Count of `//` occurrences after the first `://`; 0 without a scheme.
pub fn embedded_slash_count(url: &str) -> f32 {
    match url.find("://") {
        Some(pos) => url[pos + 3..].matches("//").count() as f32,
        None => 0.0,
    }
}

/// 1 if the literal substring "https" occurs inside the netloc.
///
/// A lexical bait check (e.g. `https-secure-login.example.com`), not a
/// protocol check.
pub fn https_in_domain(url: &str) -> f32 {
    if netloc(url).contains("https") {
        1.0
    } else {
        0.0
    }
}

/// 1 if the netloc matches the shortening-service denylist.
pub fn url_shortener(url: &str) -> f32 {
    if SHORTENER_RE.is_match(netloc(url)) {
        1.0
    } else {
        0.0
    }
}

/// 1 if `-` appears in the netloc.
pub fn hyphen_in_domain(url: &str) -> f32 {
    if netloc(url).contains('-') {
        1.0
    } else {
        0.0
    }
}

// ============================================================================
// TESTS
// ============================================================================
