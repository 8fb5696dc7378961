//! PhishGuard Core - Heuristic Detection Engine
//!
//! Converts raw URLs and emails into fixed-schema feature vectors and runs
//! them through a two-stage stacked classifier (sequence model feeding a
//! tree ensemble) to produce a phishing / spam verdict.

pub mod constants;
pub mod logic;
