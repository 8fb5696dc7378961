//! Verdict and report types
//!
//! A report is the immutable record a classification request produces:
//! the input identifier, every extracted feature, the binary verdict and
//! its human label. Stored records use the display-name mapping the
//! result store has always used, so existing dashboards keep working.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::logic::features::{EmailFeatureVector, UrlFeatureVector};

// ============================================================================
// VERDICT
// ============================================================================

/// Classification outcome. `Unknown` means extraction or inference
/// failed and the input deserves manual inspection; it is never a crash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Phished,
    Legitimate,
    Spam,
    NotSpam,
    Unknown,
}

impl Verdict {
    pub fn from_url_class(class: i64) -> Self {
        if class == 1 {
            Verdict::Phished
        } else {
            Verdict::Legitimate
        }
    }

    pub fn from_email_class(class: i64) -> Self {
        if class == 1 {
            Verdict::Spam
        } else {
            Verdict::NotSpam
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Phished => "Phished",
            Verdict::Legitimate => "Legitimate",
            Verdict::Spam => "Spam",
            Verdict::NotSpam => "Not Spam",
            Verdict::Unknown => "Unknown",
        }
    }

    /// Binary value stored alongside the label. Unknown is forced to 0.
    pub fn binary(&self) -> u8 {
        match self {
            Verdict::Phished | Verdict::Spam => 1,
            _ => 0,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// DISPLAY-NAME MAPPING
// ============================================================================

/// Stored-record column names for the URL features, index-aligned with
/// `URL_FEATURE_LAYOUT`.
pub const URL_DISPLAY_NAMES: &[&str] = &[
    "Have_IP",
    "Have_AT",
    "URL_Length",
    "Span_Url",
    "Url_Depth",
    "Dom_Extent",
    "Path_Measure",
    "Subdomains",
    "Title_Size",
    "Content_Size",
    "Num_Redirects",
    "Redirection",
    "HTTPS_Domain",
    "Tiny_URL",
    "Prefix_Suffix",
    "Domain_Age",
    "Domain_End",
    "Iframe",
    "Mouse_Over",
    "Right_Click",
    "Forwarding",
    "Num_Popups",
    "Flag_Illegitimate_Time",
    "Num_Third_Party_Clicks",
];

// ============================================================================
// URL REPORT
// ============================================================================

/// Immutable result record for one URL classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlReport {
    pub id: Uuid,
    pub url: String,
    pub feature_version: u8,
    pub layout_hash: u32,
    pub features: UrlFeatureVector,
    /// Sequence-model scalar; absent when inference failed.
    pub aux_score: Option<f32>,
    pub verdict_value: u8,
    pub verdict: Verdict,
    pub created_at: DateTime<Utc>,
}

impl UrlReport {
    pub fn new(url: &str, features: UrlFeatureVector, verdict: Verdict, aux_score: Option<f32>) -> Self {
        Self {
            id: Uuid::new_v4(),
            url: url.to_string(),
            feature_version: features.version(),
            layout_hash: features.layout_hash(),
            features,
            aux_score,
            verdict_value: verdict.binary(),
            verdict,
            created_at: Utc::now(),
        }
    }

    /// Flat record with display column names, the shape the result store
    /// and UI consume. NaN (missing) values become null.
    pub fn to_display_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("URL".to_string(), json!(self.url));
        for (name, value) in URL_DISPLAY_NAMES.iter().zip(self.features.to_row()) {
            map.insert(name.to_string(), number_or_null(value));
        }
        map.insert("Final_Val".to_string(), json!(self.verdict_value));
        map.insert("Result".to_string(), json!(self.verdict.as_str()));
        map
    }
}

fn number_or_null(value: f32) -> Value {
    if value.is_finite() {
        json!(value)
    } else {
        Value::Null
    }
}

// ============================================================================
// EMAIL REPORT
// ============================================================================

/// Immutable result record for one email classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailReport {
    pub id: Uuid,
    pub email_address: String,
    pub email_body: String,
    pub attachments: Vec<String>,
    pub feature_version: u8,
    pub layout_hash: u32,
    pub features: EmailFeatureVector,
    pub aux_score: Option<f32>,
    pub verdict_value: u8,
    pub verdict: Verdict,
    pub created_at: DateTime<Utc>,
}

impl EmailReport {
    pub fn new(
        email_address: &str,
        email_body: &str,
        attachments: &[String],
        features: EmailFeatureVector,
        verdict: Verdict,
        aux_score: Option<f32>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email_address: email_address.to_string(),
            email_body: email_body.to_string(),
            attachments: attachments.to_vec(),
            feature_version: features.version(),
            layout_hash: features.layout_hash(),
            features,
            aux_score,
            verdict_value: verdict.binary(),
            verdict,
            created_at: Utc::now(),
        }
    }

    /// Flat record for the result store: identifier, body, joined
    /// attachment list, verdict, and every feature by name.
    pub fn to_display_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("email_address".to_string(), json!(self.email_address));
        map.insert("email_body".to_string(), json!(self.email_body));
        map.insert("attachments".to_string(), json!(self.attachments.join(", ")));
        map.insert("Val".to_string(), json!(self.verdict_value));
        map.insert("Label".to_string(), json!(self.verdict.as_str()));
        map.insert("has_caps".to_string(), json!(self.features.has_caps));
        map.insert("num_exclamation".to_string(), json!(self.features.exclamation_count));
        map.insert("has_urls".to_string(), json!(self.features.has_urls));
        map.insert(
            "has_excessive_punctuation".to_string(),
            json!(self.features.has_excessive_punctuation),
        );
        map.insert("has_all_caps_usage".to_string(), json!(self.features.is_all_caps));
        map.insert("has_urgency_phrases".to_string(), json!(self.features.has_urgency_phrases));
        map.insert("has_misspelled_words".to_string(), json!(self.features.has_misspelled_words));
        map.insert("has_specific_keywords".to_string(), json!(self.features.has_specific_keywords));
        map.insert("has_attachments".to_string(), json!(self.features.has_attachments));
        map.insert(
            "has_suspicious_attachment".to_string(),
            json!(self.features.has_suspicious_attachment),
        );
        map
    }
}

// ============================================================================
// TESTS
// ============================================================================
