//! End-to-end core flow: verify origin, build record, render document.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use amprelay_core::document::ConfigTemplate;
use amprelay_core::identity::{IdentityToken, RandomTokenGenerator, TokenGenerator};
use amprelay_core::origin::{reported_origin, OriginPolicy, OriginSignals};
use amprelay_core::record::AnalyticsRecord;

#[test]
fn cache_request_renders_with_fresh_identity() {
    let policy = OriginPolicy::default();
    let template = ConfigTemplate::new(policy.publisher_origin());

    let signals = OriginSignals {
        origin: Some("https://demo-ymotongpoo-com.cdn.ampproject.org"),
        amp_same_origin: None,
        source_origin: Some("https://cdn.ampproject.org"),
    };
    let decision = policy.verify(&signals);
    assert_eq!(decision.matched_origin(), "https://cdn.ampproject.org");

    let token = RandomTokenGenerator.generate();
    let record = AnalyticsRecord::new(
        token.clone(),
        "/config.json?__amp_source_origin=https%3A%2F%2Fcdn.ampproject.org",
        reported_origin(signals.origin, None),
    );
    let body: serde_json::Value = serde_json::from_str(&template.render(&record).unwrap()).unwrap();

    assert_eq!(body["vars"]["uuid"], token.as_str());
    assert_eq!(body["vars"]["origin"], "https://demo-ymotongpoo-com.cdn.ampproject.org");
}

#[test]
fn same_origin_request_reports_referrer() {
    let policy = OriginPolicy::default();
    let template = ConfigTemplate::new(policy.publisher_origin());

    let signals = OriginSignals {
        amp_same_origin: Some("true"),
        ..Default::default()
    };
    assert!(policy.verify(&signals).is_authorized());

    let record = AnalyticsRecord::new(
        IdentityToken::from_client("returningViewer01"),
        "/config.json",
        reported_origin(None, Some("https://demo.ymotongpoo.com/articles/1.amp.html")),
    );
    let body: serde_json::Value = serde_json::from_str(&template.render(&record).unwrap()).unwrap();
    assert_eq!(body["vars"]["uuid"], "returningViewer01");
    assert_eq!(body["vars"]["host"], "/config.json");
    assert_eq!(body["vars"]["origin"], "https://demo.ymotongpoo.com/articles/1.amp.html");
}
