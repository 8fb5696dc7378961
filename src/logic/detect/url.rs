//! URL pipeline
//!
//! fetch (optional) -> extract -> two-stage inference -> report ->
//! store. Inference failures degrade to Verdict::Unknown at this
//! boundary; nothing past extraction can panic the caller.

use crate::logic::context::DetectionContext;
use crate::logic::features::{browser, net, page, url, URL_FEATURE_LAYOUT};
use crate::logic::features::UrlFeatureVector;
use crate::logic::fetch::FetchedPage;

use super::types::{UrlReport, Verdict};

/// Extract the full URL vector. Each probe-backed feature isolates its
/// own failure; one dead collaborator never aborts the rest.
pub fn extract_features(
    ctx: &DetectionContext,
    target: &str,
    fetched: Option<&FetchedPage>,
) -> UrlFeatureVector {
    let title = fetched.map(|p| p.title.as_str());
    let raw_html = fetched.map(|p| p.raw_html.as_str());
    let markup = raw_html.unwrap_or("");
    let probe = ctx.browser.as_deref();

    UrlFeatureVector {
        has_ip: url::has_ip(target),
        has_at_symbol: url::has_at_symbol(target),
        url_length: url::url_length(target),
        long_url_flag: url::long_url_flag(target),
        url_depth: url::url_depth(target),
        domain_length: url::domain_length(target),
        path_length: url::path_length(target),
        subdomain_count: url::subdomain_count(target),
        title_length: page::title_length(title),
        content_length: page::content_length(raw_html),
        embedded_slash_count: url::embedded_slash_count(target),
        redirect_hop_flag: net::redirect_hop_flag(target),
        https_in_domain: url::https_in_domain(target),
        url_shortener: url::url_shortener(target),
        hyphen_in_domain: url::hyphen_in_domain(target),
        domain_age_days: ctx.domain_intel.domain_age_days(target),
        domain_not_expiring: ctx.domain_intel.domain_not_expiring(target),
        iframe_flag: page::iframe_flag(markup),
        mouse_over_flag: page::mouse_over_flag(markup),
        right_click_flag: page::right_click_flag(markup),
        forwarding_flag: page::forwarding_flag(markup),
        popup_present: browser::popup_present(probe, target),
        slow_response: net::slow_response(target),
        third_party_links: browser::third_party_links(probe, target),
    }
}

/// Classify one URL end to end and hand the record to the sink.
pub fn detect_phishing(ctx: &DetectionContext, target: &str) -> UrlReport {
    let fetched = ctx.fetcher.as_ref().and_then(|f| match f.fetch(target) {
        Ok(p) => Some(p),
        Err(e) => {
            log::warn!("page fetch failed for {}: {}", target, e);
            None
        }
    });

    let features = extract_features(ctx, target, fetched.as_ref());
    for (name, reason) in features.defaulted_features() {
        log::debug!("{}: {} defaulted ({})", target, name, reason.as_str());
    }

    let row = features.to_row();
    let (verdict, aux_score) = match ctx.url_classifier.predict(URL_FEATURE_LAYOUT, &row) {
        Ok(inference) => (
            Verdict::from_url_class(inference.class),
            Some(inference.aux_score),
        ),
        Err(e) => {
            log::error!("url inference failed for {}: {}", target, e);
            (Verdict::Unknown, None)
        }
    };

    let report = UrlReport::new(target, features, verdict, aux_score);
    log::info!("{} -> {} ({})", target, report.verdict.as_str(), report.verdict_value);

    if let Some(sink) = &ctx.sink {
        if let Err(e) = sink.store_url(&report) {
            log::warn!("result store failed for {}: {}", target, e);
        }
    }

    report
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::detect::testutil::{context, FailingClassifier, FixedClassifier};
    use crate::logic::features::DefaultReason;
    use crate::logic::fetch::{FetchError, PageFetcher};

    // .invalid hosts keep the live probes hermetic: every network
    // feature fails fast and takes its documented default.
    const TARGET: &str = "http://phish.host.invalid/login/verify";

    #[test]
    fn test_detect_phishing_positive_class() {
        let ctx = context(FixedClassifier::new(1, 0.8), FixedClassifier::new(0, 0.0));
        let report = detect_phishing(&ctx, TARGET);
        assert_eq!(report.verdict, Verdict::Phished);
        assert_eq!(report.verdict_value, 1);
        assert_eq!(report.aux_score, Some(0.8));
    }

    #[test]
    fn test_detect_phishing_negative_class() {
        let ctx = context(FixedClassifier::new(0, 0.1), FixedClassifier::new(0, 0.0));
        let report = detect_phishing(&ctx, TARGET);
        assert_eq!(report.verdict, Verdict::Legitimate);
        assert_eq!(report.verdict_value, 0);
    }

    #[test]
    fn test_inference_failure_degrades_to_unknown() {
        let ctx = context(FailingClassifier, FixedClassifier::new(0, 0.0));
        let report = detect_phishing(&ctx, TARGET);
        assert_eq!(report.verdict, Verdict::Unknown);
        assert_eq!(report.verdict_value, 0);
        assert_eq!(report.aux_score, None);
    }

    #[test]
    fn test_missing_page_forces_fail_closed_markup_flags() {
        let ctx = context(FixedClassifier::new(0, 0.0), FixedClassifier::new(0, 0.0));
        let features = extract_features(&ctx, TARGET, None);
        assert_eq!(features.iframe_flag.value(), 1.0);
        assert_eq!(features.mouse_over_flag.value(), 1.0);
        assert_eq!(features.right_click_flag.value(), 1.0);
        assert_eq!(features.forwarding_flag.value(), 1.0);
        assert_eq!(features.iframe_flag.reason(), Some(DefaultReason::MissingContent));
        assert_eq!(features.title_length, 0.0);
        assert_eq!(features.content_length, 0.0);
    }

    #[test]
    fn test_fetched_page_feeds_markup_features() {
        let ctx = context(FixedClassifier::new(0, 0.0), FixedClassifier::new(0, 0.0));
        let fetched = FetchedPage {
            title: "Sign in".to_string(),
            raw_html: "<html><iframe></iframe>event.button == 2</html>".to_string(),
        };
        let features = extract_features(&ctx, TARGET, Some(&fetched));
        assert_eq!(features.title_length, 7.0);
        assert_eq!(features.iframe_flag.value(), 0.0);
        assert_eq!(features.right_click_flag.value(), 0.0);
        assert!(!features.iframe_flag.is_defaulted());
    }

    struct StubFetcher {
        fail: bool,
    }

    impl PageFetcher for StubFetcher {
        fn fetch(&self, _url: &str) -> Result<FetchedPage, FetchError> {
            if self.fail {
                return Err(FetchError("connection reset".to_string()));
            }
            Ok(FetchedPage {
                title: "Sign in".to_string(),
                raw_html: "<html><iframe></iframe></html>".to_string(),
            })
        }
    }

    #[test]
    fn test_injected_fetcher_feeds_the_pipeline() {
        let ctx = context(FixedClassifier::new(0, 0.0), FixedClassifier::new(0, 0.0))
            .with_fetcher(Box::new(StubFetcher { fail: false }));
        let report = detect_phishing(&ctx, TARGET);
        assert_eq!(report.features.title_length, 7.0);
        assert_eq!(report.features.iframe_flag.value(), 0.0);
    }

    #[test]
    fn test_fetch_failure_degrades_to_missing_content() {
        let ctx = context(FixedClassifier::new(0, 0.0), FixedClassifier::new(0, 0.0))
            .with_fetcher(Box::new(StubFetcher { fail: true }));
        let report = detect_phishing(&ctx, TARGET);
        assert_eq!(report.features.iframe_flag.reason(), Some(DefaultReason::MissingContent));
        assert_eq!(report.verdict, Verdict::Legitimate);
    }

    #[test]
    fn test_probe_defaults_without_collaborators() {
        let ctx = context(FixedClassifier::new(0, 0.0), FixedClassifier::new(0, 0.0));
        let features = extract_features(&ctx, TARGET, None);
        // No browser handle, dead host, dead registry endpoint.
        assert_eq!(features.popup_present.reason(), Some(DefaultReason::NoAutomation));
        assert_eq!(features.third_party_links.reason(), Some(DefaultReason::NoAutomation));
        assert_eq!(features.redirect_hop_flag.reason(), Some(DefaultReason::NetworkError));
        assert_eq!(features.domain_not_expiring.value(), 1.0);
        assert!(features.domain_age_days.value().is_nan());
    }
}
