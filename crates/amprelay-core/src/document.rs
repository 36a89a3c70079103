//! `amp-analytics` remote config document.
//!
//! The `requests` and `triggers` sections are fixed per deployment and built
//! once at startup; only `vars` changes per request. AMP substitutes
//! `${uuid}`, `${host}` and `${origin}` in the request template from `vars`.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{AmpRelayError, Result};
use crate::record::AnalyticsRecord;

/// Name of the pageview request and of the trigger that fires it.
pub const PAGEVIEW_REQUEST: &str = "pageview";
const PAGEVIEW_TRIGGER: &str = "trackPageview";

/// Path of the pageview sink on the publisher origin.
pub const ANALYTICS_PATH: &str = "/analytics";

#[derive(Debug, Clone, Serialize)]
struct Trigger {
    on: &'static str,
    request: &'static str,
}

/// Immutable document template, shared read-only by all requests.
#[derive(Debug, Clone)]
pub struct ConfigTemplate {
    requests: BTreeMap<String, String>,
    triggers: BTreeMap<String, Trigger>,
}

#[derive(Serialize)]
struct Vars<'a> {
    uuid: &'a str,
    host: &'a str,
    origin: &'a str,
}

#[derive(Serialize)]
struct Document<'a> {
    requests: &'a BTreeMap<String, String>,
    vars: Vars<'a>,
    triggers: &'a BTreeMap<String, Trigger>,
}

impl ConfigTemplate {
    /// Build the template for pageviews reported to `publisher_origin`.
    pub fn new(publisher_origin: &str) -> Self {
        let pageview = format!(
            "{publisher_origin}{ANALYTICS_PATH}?uuid=${{uuid}}&url=${{host}}&origin=${{origin}}"
        );

        let mut requests = BTreeMap::new();
        requests.insert(PAGEVIEW_REQUEST.to_string(), pageview);

        let mut triggers = BTreeMap::new();
        triggers.insert(
            PAGEVIEW_TRIGGER.to_string(),
            Trigger { on: "visible", request: PAGEVIEW_REQUEST },
        );

        Self { requests, triggers }
    }

    /// Render the JSON document for one record.
    pub fn render(&self, record: &AnalyticsRecord) -> Result<String> {
        let doc = Document {
            requests: &self.requests,
            vars: Vars {
                uuid: record.identity.as_str(),
                host: &record.requested_url,
                origin: &record.origin,
            },
            triggers: &self.triggers,
        };
        serde_json::to_string_pretty(&doc)
            .map_err(|e| AmpRelayError::Internal(format!("render config failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::identity::IdentityToken;

    fn render(record: &AnalyticsRecord) -> Value {
        let s = ConfigTemplate::new("https://demo.ymotongpoo.com")
            .render(record)
            .unwrap_or_default();
        serde_json::from_str(&s).unwrap_or(Value::Null)
    }

    #[test]
    fn document_has_three_sections() {
        let rec = AnalyticsRecord::new(
            IdentityToken::from_client("AbCdEfGh12345678"),
            "/config.json?__amp_source_origin=https%3A%2F%2Fdemo.ymotongpoo.com",
            "https://demo.ymotongpoo.com",
        );
        let v = render(&rec);

        assert_eq!(
            v["requests"]["pageview"],
            "https://demo.ymotongpoo.com/analytics?uuid=${uuid}&url=${host}&origin=${origin}"
        );
        assert_eq!(v["vars"]["uuid"], "AbCdEfGh12345678");
        assert_eq!(
            v["vars"]["host"],
            "/config.json?__amp_source_origin=https%3A%2F%2Fdemo.ymotongpoo.com"
        );
        assert_eq!(v["vars"]["origin"], "https://demo.ymotongpoo.com");
        assert_eq!(v["triggers"]["trackPageview"]["on"], "visible");
        assert_eq!(v["triggers"]["trackPageview"]["request"], "pageview");
    }

    #[test]
    fn values_are_json_escaped() {
        let rec = AnalyticsRecord::new(
            IdentityToken::from_client("a\"b"),
            "/config.json?x=\\",
            "https://ref.example/\"quoted\"",
        );
        let v = render(&rec);
        assert_eq!(v["vars"]["uuid"], "a\"b");
        assert_eq!(v["vars"]["host"], "/config.json?x=\\");
        assert_eq!(v["vars"]["origin"], "https://ref.example/\"quoted\"");
    }

    #[test]
    fn pageview_request_targets_publisher() {
        let rec = AnalyticsRecord::new(IdentityToken::fallback(), "/config.json", "");
        let s = ConfigTemplate::new("https://news.example.org")
            .render(&rec)
            .unwrap_or_default();
        let v: Value = serde_json::from_str(&s).unwrap_or(Value::Null);
        assert_eq!(v["requests"].as_object().map(|m| m.len()), Some(1));
        assert_eq!(
            v["requests"][PAGEVIEW_REQUEST],
            "https://news.example.org/analytics?uuid=${uuid}&url=${host}&origin=${origin}"
        );
    }
}
