//! Feature Layout - Centralized Column Schemas
//!
//! **CRITICAL: these tables control the model input schemas**
//!
//! ## Rules (NEVER break these):
//! 1. Add column    -> increment the layout version
//! 2. Change order  -> increment the layout version
//! 3. Remove column -> increment the layout version
//!
//! The fitted scaler and ensemble were trained against these exact
//! columns in this exact order. The extractors fill vectors in this
//! order and the scaler re-checks it at inference time.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// URL SCHEMA
// ============================================================================

/// Current URL feature layout version.
pub const URL_FEATURE_VERSION: u8 = 1;

/// URL feature names in the exact order the URL bundle was fit on.
pub const URL_FEATURE_LAYOUT: &[&str] = &[
    "has_ip",               // 0: host is a literal IPv4/IPv6 address
    "has_at_symbol",        // 1: '@' anywhere in the URL
    "url_length",           // 2: raw character count
    "long_url_flag",        // 3: 1 iff url_length >= 54
    "url_depth",            // 4: non-empty path segments
    "domain_length",        // 5: netloc character count
    "path_length",          // 6: '/'-separated segments after netloc
    "subdomain_count",      // 7: dots in the URL minus one
    "title_length",         // 8: fetched page title length (0 if absent)
    "content_length",       // 9: fetched raw markup length (0 if absent)
    "embedded_slash_count", // 10: '//' occurrences after the scheme
    "redirect_hop_flag",    // 11: live redirect chain exceeded 3 hops
    "https_in_domain",      // 12: literal "https" inside the netloc
    "url_shortener",        // 13: host matches the shortener denylist
    "hyphen_in_domain",     // 14: '-' inside the netloc
    "domain_age_days",      // 15: RDAP registration age (NaN when unknown)
    "domain_not_expiring",  // 16: 0 if expiring within 6 months, else 1
    "iframe_flag",          // 17: 0 if iframe markup present, else 1
    "mouse_over_flag",      // 18: 1 if onmouseover script present, else 0
    "right_click_flag",     // 19: 0 if right-click suppression present, else 1
    "forwarding_flag",      // 20: 0 only for a near-empty redirector page
    "popup_present",        // 21: native dialog observed within 5s
    "slow_response",        // 22: fetch took over 3s end-to-end
    "third_party_links",    // 23: any anchor host differs from origin
];

/// Total URL feature count. Must match `URL_FEATURE_LAYOUT.len()`.
pub const URL_FEATURE_COUNT: usize = 24;

// ============================================================================
// EMAIL SCHEMA
// ============================================================================

/// Current email feature layout version.
pub const EMAIL_FEATURE_VERSION: u8 = 1;

/// Email feature names in the exact order the email bundle was fit on.
///
/// The four reserved columns are always zero: the downstream model was
/// trained on a wider schema and the transformer expects their slots.
pub const EMAIL_FEATURE_LAYOUT: &[&str] = &[
    "has_caps",                  // 0
    "exclamation_count",         // 1
    "has_urls",                  // 2
    "has_excessive_punctuation", // 3
    "is_all_caps",               // 4
    "has_urgency_phrases",       // 5
    "has_misspelled_words",      // 6
    "has_specific_keywords",     // 7
    "has_attachments",           // 8
    "has_suspicious_attachment", // 9
    "reserved_0",                // 10: schema-compatibility shim
    "reserved_1",                // 11
    "reserved_2",                // 12
    "reserved_3",                // 13
];

/// Total email feature count. Must match `EMAIL_FEATURE_LAYOUT.len()`.
pub const EMAIL_FEATURE_COUNT: usize = 14;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 over a version byte plus the ordered column names.
///
/// Stored in every vector and record so schema drift is detectable at
/// runtime instead of silently feeding misaligned columns to the model.
pub fn layout_hash(version: u8, layout: &[&str]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[version]);
    for name in layout {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // separator
    }
    hasher.finalize()
}

pub fn url_layout_hash() -> u32 {
    layout_hash(URL_FEATURE_VERSION, URL_FEATURE_LAYOUT)
}

pub fn email_layout_hash() -> u32 {
    layout_hash(EMAIL_FEATURE_VERSION, EMAIL_FEATURE_LAYOUT)
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout description for logging and stored records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn url() -> Self {
        Self {
            version: URL_FEATURE_VERSION,
            hash: url_layout_hash(),
            feature_count: URL_FEATURE_COUNT,
            feature_names: URL_FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn email() -> Self {
        Self {
            version: EMAIL_FEATURE_VERSION,
            hash: email_layout_hash(),
            feature_count: EMAIL_FEATURE_COUNT,
            feature_names: EMAIL_FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Error when a vector's layout does not match the current schema.
#[derive(Debug, Clone)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

impl std::fmt::Display for LayoutMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "feature layout mismatch: expected v{} (hash {:08x}), got v{} (hash {:08x})",
            self.expected_version, self.expected_hash, self.actual_version, self.actual_hash
        )
    }
}

impl std::error::Error for LayoutMismatchError {}

/// Validate an incoming vector's version + hash against a schema.
pub fn validate_layout(
    expected_version: u8,
    expected_hash: u32,
    incoming_version: u8,
    incoming_hash: u32,
) -> Result<(), LayoutMismatchError> {
    if incoming_version != expected_version || incoming_hash != expected_hash {
        return Err(LayoutMismatchError {
            expected_version,
            expected_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }
    Ok(())
}

/// Index of a column in a layout (layouts are small, linear scan is fine).
pub fn feature_index(layout: &[&str], name: &str) -> Option<usize> {
    layout.iter().position(|&n| n == name)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_counts() {
        assert_eq!(URL_FEATURE_LAYOUT.len(), URL_FEATURE_COUNT);
        assert_eq!(EMAIL_FEATURE_LAYOUT.len(), EMAIL_FEATURE_COUNT);
    }

    #[test]
    fn test_layout_hashes_are_stable_and_distinct() {
        assert_eq!(url_layout_hash(), url_layout_hash());
        assert_ne!(url_layout_hash(), 0);
        assert_ne!(url_layout_hash(), email_layout_hash());
    }

    #[test]
    fn test_validate_layout_success() {
        let result = validate_layout(
            URL_FEATURE_VERSION,
            url_layout_hash(),
            URL_FEATURE_VERSION,
            url_layout_hash(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_layout_version_mismatch() {
        let result = validate_layout(
            URL_FEATURE_VERSION,
            url_layout_hash(),
            URL_FEATURE_VERSION + 1,
            url_layout_hash(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_layout_hash_mismatch() {
        let result = validate_layout(
            EMAIL_FEATURE_VERSION,
            email_layout_hash(),
            EMAIL_FEATURE_VERSION,
            email_layout_hash() ^ 1,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_feature_index() {
        assert_eq!(feature_index(URL_FEATURE_LAYOUT, "has_ip"), Some(0));
        assert_eq!(feature_index(URL_FEATURE_LAYOUT, "third_party_links"), Some(23));
        assert_eq!(feature_index(EMAIL_FEATURE_LAYOUT, "reserved_3"), Some(13));
        assert_eq!(feature_index(URL_FEATURE_LAYOUT, "nonexistent"), None);
    }

    #[test]
    fn test_reserved_columns_trail_the_email_layout() {
        for (i, name) in EMAIL_FEATURE_LAYOUT.iter().enumerate().skip(10) {
            assert!(name.starts_with("reserved_"), "column {} is {}", i, name);
        }
    }
}
