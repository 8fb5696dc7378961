//! Feature vectors - statically ordered model inputs
//!
//! One struct per domain, fields in the exact order of the layout
//! constants. `to_row()` is the only place a struct is flattened into
//! model columns; tests pin the row against the layout so a drifted
//! field order cannot reach the scaler unnoticed.

use serde::{Deserialize, Serialize};

use super::layout::{
    email_layout_hash, url_layout_hash, EMAIL_FEATURE_COUNT, EMAIL_FEATURE_VERSION,
    URL_FEATURE_COUNT, URL_FEATURE_VERSION,
};
use super::signal::{DefaultReason, Signal};

// ============================================================================
// URL VECTOR
// ============================================================================

/// All URL heuristics for one input. Pure string features are plain
/// values; probe-backed features carry their default provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlFeatureVector {
    pub has_ip: f32,
    pub has_at_symbol: f32,
    pub url_length: f32,
    pub long_url_flag: f32,
    pub url_depth: f32,
    pub domain_length: f32,
    pub path_length: f32,
    pub subdomain_count: f32,
    pub title_length: f32,
    pub content_length: f32,
    pub embedded_slash_count: f32,
    pub redirect_hop_flag: Signal,
    pub https_in_domain: f32,
    pub url_shortener: f32,
    pub hyphen_in_domain: f32,
    pub domain_age_days: Signal,
    pub domain_not_expiring: Signal,
    pub iframe_flag: Signal,
    pub mouse_over_flag: Signal,
    pub right_click_flag: Signal,
    pub forwarding_flag: Signal,
    pub popup_present: Signal,
    pub slow_response: Signal,
    pub third_party_links: Signal,
}

impl UrlFeatureVector {
    pub fn version(&self) -> u8 {
        URL_FEATURE_VERSION
    }

    pub fn layout_hash(&self) -> u32 {
        url_layout_hash()
    }

    /// Flatten into model columns, in `URL_FEATURE_LAYOUT` order.
    pub fn to_row(&self) -> Vec<f32> {
        let row = vec![
            self.has_ip,
            self.has_at_symbol,
            self.url_length,
            self.long_url_flag,
            self.url_depth,
            self.domain_length,
            self.path_length,
            self.subdomain_count,
            self.title_length,
            self.content_length,
            self.embedded_slash_count,
            self.redirect_hop_flag.value(),
            self.https_in_domain,
            self.url_shortener,
            self.hyphen_in_domain,
            self.domain_age_days.value(),
            self.domain_not_expiring.value(),
            self.iframe_flag.value(),
            self.mouse_over_flag.value(),
            self.right_click_flag.value(),
            self.forwarding_flag.value(),
            self.popup_present.value(),
            self.slow_response.value(),
            self.third_party_links.value(),
        ];
        debug_assert_eq!(row.len(), URL_FEATURE_COUNT);
        row
    }

    /// Which probe-backed features fell back to defaults, and why.
    pub fn defaulted_features(&self) -> Vec<(&'static str, DefaultReason)> {
        let probes: [(&'static str, &Signal); 10] = [
            ("redirect_hop_flag", &self.redirect_hop_flag),
            ("domain_age_days", &self.domain_age_days),
            ("domain_not_expiring", &self.domain_not_expiring),
            ("iframe_flag", &self.iframe_flag),
            ("mouse_over_flag", &self.mouse_over_flag),
            ("right_click_flag", &self.right_click_flag),
            ("forwarding_flag", &self.forwarding_flag),
            ("popup_present", &self.popup_present),
            ("slow_response", &self.slow_response),
            ("third_party_links", &self.third_party_links),
        ];
        probes
            .iter()
            .filter_map(|(name, s)| s.reason().map(|r| (*name, r)))
            .collect()
    }
}

// ============================================================================
// EMAIL VECTOR
// ============================================================================

/// Content + attachment heuristics for one email. The four reserved
/// schema columns only exist in `to_row()`; they are always zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailFeatureVector {
    pub has_caps: bool,
    pub exclamation_count: u32,
    pub has_urls: bool,
    pub has_excessive_punctuation: bool,
    pub is_all_caps: bool,
    pub has_urgency_phrases: bool,
    pub has_misspelled_words: bool,
    pub has_specific_keywords: bool,
    pub has_attachments: bool,
    pub has_suspicious_attachment: bool,
}

impl EmailFeatureVector {
    pub fn version(&self) -> u8 {
        EMAIL_FEATURE_VERSION
    }

    pub fn layout_hash(&self) -> u32 {
        email_layout_hash()
    }

    /// Flatten into model columns, in `EMAIL_FEATURE_LAYOUT` order,
    /// reserved zero columns appended.
    pub fn to_row(&self) -> Vec<f32> {
        let b = |v: bool| if v { 1.0 } else { 0.0 };
        let row = vec![
            b(self.has_caps),
            self.exclamation_count as f32,
            b(self.has_urls),
            b(self.has_excessive_punctuation),
            b(self.is_all_caps),
            b(self.has_urgency_phrases),
            b(self.has_misspelled_words),
            b(self.has_specific_keywords),
            b(self.has_attachments),
            b(self.has_suspicious_attachment),
            0.0, // reserved_0
            0.0, // reserved_1
            0.0, // reserved_2
            0.0, // reserved_3
        ];
        debug_assert_eq!(row.len(), EMAIL_FEATURE_COUNT);
        row
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::layout::{EMAIL_FEATURE_LAYOUT, URL_FEATURE_LAYOUT};

    pub(crate) fn zeroed_url_vector() -> UrlFeatureVector {
        UrlFeatureVector {
            has_ip: 0.0,
            has_at_symbol: 0.0,
            url_length: 0.0,
            long_url_flag: 0.0,
            url_depth: 0.0,
            domain_length: 0.0,
            path_length: 0.0,
            subdomain_count: 0.0,
            title_length: 0.0,
            content_length: 0.0,
            embedded_slash_count: 0.0,
            redirect_hop_flag: Signal::measured(0.0),
            https_in_domain: 0.0,
            url_shortener: 0.0,
            hyphen_in_domain: 0.0,
            domain_age_days: Signal::measured(0.0),
            domain_not_expiring: Signal::measured(1.0),
            iframe_flag: Signal::measured(1.0),
            mouse_over_flag: Signal::measured(0.0),
            right_click_flag: Signal::measured(1.0),
            forwarding_flag: Signal::measured(1.0),
            popup_present: Signal::measured(0.0),
            slow_response: Signal::measured(0.0),
            third_party_links: Signal::measured(0.0),
        }
    }

    #[test]
    fn test_url_row_matches_layout_width() {
        let row = zeroed_url_vector().to_row();
        assert_eq!(row.len(), URL_FEATURE_LAYOUT.len());
    }

    #[test]
    fn test_url_row_field_positions() {
        let mut vector = zeroed_url_vector();
        vector.has_ip = 1.0;
        vector.third_party_links = Signal::measured(1.0);
        let row = vector.to_row();
        assert_eq!(row[0], 1.0); // has_ip is column 0
        assert_eq!(row[23], 1.0); // third_party_links is the last column
    }

    #[test]
    fn test_defaulted_features_reporting() {
        let mut vector = zeroed_url_vector();
        vector.popup_present = Signal::defaulted(0.0, DefaultReason::NoAutomation);
        vector.iframe_flag = Signal::defaulted(1.0, DefaultReason::MissingContent);
        let defaults = vector.defaulted_features();
        assert_eq!(defaults.len(), 2);
        assert!(defaults.contains(&("popup_present", DefaultReason::NoAutomation)));
        assert!(defaults.contains(&("iframe_flag", DefaultReason::MissingContent)));
    }

    #[test]
    fn test_email_row_reserved_columns_are_zero() {
        let vector = EmailFeatureVector {
            has_caps: false,
            exclamation_count: 5,
            has_urls: true,
            has_excessive_punctuation: true,
            is_all_caps: false,
            has_urgency_phrases: true,
            has_misspelled_words: false,
            has_specific_keywords: true,
            has_attachments: true,
            has_suspicious_attachment: false,
        };
        let row = vector.to_row();
        assert_eq!(row.len(), EMAIL_FEATURE_LAYOUT.len());
        assert_eq!(row[1], 5.0);
        assert_eq!(&row[10..], &[0.0, 0.0, 0.0, 0.0]);
    }
}
