//! Detect Module - Verdicts & Orchestration
//!
//! - `types` - Verdict, report records, display-name mapping
//! - `url`   - detect_phishing pipeline
//! - `email` - classify_email pipeline

pub mod email;
pub mod types;
pub mod url;

pub use email::{classify_email, classify_emails, EmailInput};
pub use types::{EmailReport, UrlReport, Verdict};
pub use url::detect_phishing;

// ============================================================================
// TEST SUPPORT
// ============================================================================

#[cfg(test)]
pub(crate) mod testutil {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::logic::context::DetectionContext;
    use crate::logic::detect::types::{EmailReport, UrlReport};
    use crate::logic::features::DomainIntel;
    use crate::logic::model::{Classifier, Inference, InferenceError};
    use crate::logic::store::{ResultSink, StoreError};

    /// Classifier stub with a fixed class and auxiliary score.
    pub struct FixedClassifier {
        class: i64,
        aux_score: f32,
    }

    impl FixedClassifier {
        pub fn new(class: i64, aux_score: f32) -> Self {
            Self { class, aux_score }
        }
    }

    impl Classifier for FixedClassifier {
        fn predict(&self, layout: &[&str], row: &[f32]) -> Result<Inference, InferenceError> {
            if layout.len() != row.len() {
                return Err(InferenceError::SchemaMismatch {
                    expected: layout.len(),
                    actual: row.len(),
                });
            }
            Ok(Inference {
                class: self.class,
                aux_score: self.aux_score,
                inference_time_us: 0,
            })
        }
    }

    /// Classifier stub simulating a missing model artifact.
    pub struct FailingClassifier;

    impl Classifier for FailingClassifier {
        fn predict(&self, _layout: &[&str], _row: &[f32]) -> Result<Inference, InferenceError> {
            Err(InferenceError::Model("model not loaded".to_string()))
        }
    }

    /// Sink stub that counts attempts and optionally fails each store.
    pub struct RecordingSink {
        fail: bool,
        url_attempts: AtomicUsize,
        email_attempts: AtomicUsize,
    }

    impl RecordingSink {
        pub fn new(fail: bool) -> Self {
            Self {
                fail,
                url_attempts: AtomicUsize::new(0),
                email_attempts: AtomicUsize::new(0),
            }
        }

        pub fn url_attempts(&self) -> usize {
            self.url_attempts.load(Ordering::Relaxed)
        }

        pub fn email_attempts(&self) -> usize {
            self.email_attempts.load(Ordering::Relaxed)
        }

        fn outcome(&self) -> Result<(), StoreError> {
            if self.fail {
                Err(StoreError("sink unavailable".to_string()))
            } else {
                Ok(())
            }
        }
    }

    impl ResultSink for Arc<RecordingSink> {
        fn store_url(&self, _report: &UrlReport) -> Result<(), StoreError> {
            self.url_attempts.fetch_add(1, Ordering::Relaxed);
            self.outcome()
        }

        fn store_email(&self, _report: &EmailReport) -> Result<(), StoreError> {
            self.email_attempts.fetch_add(1, Ordering::Relaxed);
            self.outcome()
        }
    }

    /// Context with stub classifiers and a dead registry endpoint so no
    /// test ever leaves the host.
    pub fn context(
        url_classifier: impl Classifier + 'static,
        email_classifier: impl Classifier + 'static,
    ) -> DetectionContext {
        DetectionContext::new(Box::new(url_classifier), Box::new(email_classifier))
            .with_domain_intel(DomainIntel::with_endpoint("http://rdap.host.invalid"))
    }
}
