//! Features Module - Heuristic Extraction Engine
//!
//! - `url` / `page`  - pure string and markup heuristics
//! - `net` / `domain` / `browser` - probe-backed heuristics with
//!   per-feature fail-safe defaults
//! - `email` / `text` - email content pipeline
//! - `layout` / `vector` / `signal` - schema plumbing

pub mod browser;
pub mod domain;
pub mod email;
pub mod layout;
pub mod net;
pub mod page;
pub mod signal;
pub mod text;
pub mod url;
pub mod vector;


pub use browser::{BrowserError, BrowserProbe};
pub use domain::DomainIntel;
pub use layout::{
    EMAIL_FEATURE_COUNT, EMAIL_FEATURE_LAYOUT, URL_FEATURE_COUNT, URL_FEATURE_LAYOUT,
};
pub use signal::{DefaultReason, Signal};
pub use vector::{EmailFeatureVector, UrlFeatureVector};
