//! Email content + attachment features
//!
//! Everything here is pure over `(body, attachment_filenames)`. The
//! checks read the raw body except `has_caps`, which goes through the
//! normalization pipeline first.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{
    MISSPELLED_WORDS, PUNCTUATION_THRESHOLD, SPAM_KEYWORDS, SUSPICIOUS_EXTENSIONS,
    URGENCY_PHRASES,
};

use super::text::{normalize, tokenize_lower};
use super::vector::EmailFeatureVector;

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(http|ftp|https)://\S+").expect("url pattern"));
static PUNCT_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[!?.]{3,}").expect("punctuation pattern"));

/// True if any token of the normalized body is fully upper-case.
///
/// The normalization pipeline lowercases its output, so this can never
/// trip on real input. Kept for behavioral parity with the model's
/// training features; see DESIGN.md before changing it.
pub fn has_caps(body: &str) -> bool {
    normalize(body).split_whitespace().any(is_upper)
}

fn is_upper(word: &str) -> bool {
    let mut cased = word.chars().filter(|c| c.is_alphabetic());
    let has_cased = cased.next().is_some();
    has_cased
        && word
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(|c| c.is_uppercase())
}

/// Literal count of `!` in the raw body.
pub fn exclamation_count(body: &str) -> u32 {
    body.matches('!').count() as u32
}

/// True if the raw body contains an http/https/ftp link.
pub fn has_urls(body: &str) -> bool {
    URL_RE.is_match(body)
}

/// True if 3+ character runs of `!?.` occur at least `threshold` times.
pub fn has_excessive_punctuation(body: &str, threshold: usize) -> bool {
    PUNCT_RUN_RE.find_iter(body).count() >= threshold
}

/// True if every cased character of the raw body is upper-case.
pub fn is_all_caps(body: &str) -> bool {
    is_upper(body)
}

/// True if any urgency bait phrase occurs (case-insensitive substring).
pub fn has_urgency_phrases(body: &str) -> bool {
    let lower = body.to_lowercase();
    URGENCY_PHRASES.iter().any(|phrase| lower.contains(phrase))
}

/// True if any lowercased token is a known bait misspelling.
pub fn has_misspelled_words(body: &str) -> bool {
    tokenize_lower(body)
        .iter()
        .any(|w| MISSPELLED_WORDS.contains(&w.as_str()))
}

/// True if any lowercased token is a known spam-bait keyword.
pub fn has_specific_keywords(body: &str) -> bool {
    tokenize_lower(body)
        .iter()
        .any(|w| SPAM_KEYWORDS.contains(&w.as_str()))
}

/// True if the attachment list is non-empty.
pub fn has_attachments(attachments: &[String]) -> bool {
    !attachments.is_empty()
}

/// True if any filename's final extension is on the payload denylist.
pub fn has_suspicious_attachment(attachments: &[String]) -> bool {
    attachments.iter().any(|name| {
        let ext = name.rsplit('.').next().unwrap_or(name);
        SUSPICIOUS_EXTENSIONS.contains(&ext)
    })
}

/// Build the full email vector from a body and attachment list.
pub fn extract(body: &str, attachments: &[String]) -> EmailFeatureVector {
    extract_with_threshold(body, attachments, PUNCTUATION_THRESHOLD)
}

pub fn extract_with_threshold(
    body: &str,
    attachments: &[String],
    punctuation_threshold: usize,
) -> EmailFeatureVector {
    EmailFeatureVector {
        has_caps: has_caps(body),
        exclamation_count: exclamation_count(body),
        has_urls: has_urls(body),
        has_excessive_punctuation: has_excessive_punctuation(body, punctuation_threshold),
        is_all_caps: is_all_caps(body),
        has_urgency_phrases: has_urgency_phrases(body),
        has_misspelled_words: has_misspelled_words(body),
        has_specific_keywords: has_specific_keywords(body),
        has_attachments: has_attachments(attachments),
        has_suspicious_attachment: has_suspicious_attachment(attachments),
    }
}

// ============================================================================
// TESTS
// ============================================================================
