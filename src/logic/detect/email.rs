//! Email pipeline
//!
//! extract -> two-stage inference -> report -> store. Same boundary
//! semantics as the URL pipeline: failures degrade to Unknown.

use serde::{Deserialize, Serialize};

use crate::logic::context::DetectionContext;
use crate::logic::features::{email, EMAIL_FEATURE_LAYOUT};

use super::types::{EmailReport, Verdict};

/// One email to classify.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailInput {
    pub email_address: String,
    pub email_body: String,
    pub attachments: Vec<String>,
}

/// Classify one email end to end and hand the record to the sink.
pub fn classify_email(
    ctx: &DetectionContext,
    email_address: &str,
    email_body: &str,
    attachments: &[String],
) -> EmailReport {
    let features = email::extract(email_body, attachments);

    let row = features.to_row();
    let (verdict, aux_score) = match ctx.email_classifier.predict(EMAIL_FEATURE_LAYOUT, &row) {
        Ok(inference) => (
            Verdict::from_email_class(inference.class),
            Some(inference.aux_score),
        ),
        Err(e) => {
            log::error!("email inference failed for {}: {}", email_address, e);
            (Verdict::Unknown, None)
        }
    };

    let report = EmailReport::new(email_address, email_body, attachments, features, verdict, aux_score);
    log::info!(
        "{} -> {} ({})",
        email_address,
        report.verdict.as_str(),
        report.verdict_value
    );

    if let Some(sink) = &ctx.sink {
        if let Err(e) = sink.store_email(&report) {
            log::warn!("result store failed for {}: {}", email_address, e);
        }
    }

    report
}

/// Classify a batch, one report per input, in order.
pub fn classify_emails(ctx: &DetectionContext, inputs: &[EmailInput]) -> Vec<EmailReport> {
    inputs
        .iter()
        .map(|input| {
            classify_email(
                ctx,
                &input.email_address,
                &input.email_body,
                &input.attachments,
            )
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
