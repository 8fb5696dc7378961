//! Text normalization pipeline
//!
//! Strip HTML tags, strip non-alphabetic characters, lowercase,
//! tokenize, drop stop words, stem. Only `has_caps` consumes the
//! normalized form; the other email checks read the raw body.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};

use crate::constants::STOP_WORDS;

static HTML_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<.*?>").expect("html tag pattern"));
static NON_ALPHA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z]").expect("non-alpha pattern"));
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z0-9']+").expect("word pattern"));

static STEMMER: Lazy<Stemmer> = Lazy::new(|| Stemmer::create(Algorithm::English));

/// Full normalization: tag-stripped, alphabetic-only, lowercased,
/// stop-word-filtered, stemmed tokens rejoined with single spaces.
pub fn normalize(text: &str) -> String {
    let stripped = HTML_TAG_RE.replace_all(text, "");
    let alpha = NON_ALPHA_RE.replace_all(&stripped, " ").to_lowercase();
    alpha
        .split_whitespace()
        .filter(|w| !STOP_WORDS.contains(w))
        .map(|w| STEMMER.stem(w).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercased word tokens for dictionary membership checks.
pub fn tokenize_lower(text: &str) -> Vec<String> {
    WORD_RE
        .find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}
