//! AMP CORS origin verification.
//!
//! AMP pages fetch remote JSON either from the publisher's own page (the
//! browser then sends `AMP-Same-Origin: true` instead of `Origin`) or from an
//! AMP cache/viewer, which sends `Origin` and appends `__amp_source_origin`
//! to the request URL. Only the source origin parameter is trusted, and only
//! when it names one of the three allowed literals.

/// Publisher domain served by default.
pub const DEFAULT_PUBLISHER_DOMAIN: &str = "demo.ymotongpoo.com";
/// AMP cache domain trusted by default.
pub const DEFAULT_AMP_CACHE_DOMAIN: &str = "cdn.ampproject.org";

/// Query parameter appended by AMP runtimes to cross-origin requests.
pub const SOURCE_ORIGIN_PARAM: &str = "__amp_source_origin";
/// Header sent instead of `Origin` on same-origin AMP requests.
pub const AMP_SAME_ORIGIN_HEADER: &str = "amp-same-origin";

/// Outcome of verifying one request. Produced per request, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginDecision {
    Authorized { matched_origin: String },
    Unauthorized,
}

impl OriginDecision {
    pub fn is_authorized(&self) -> bool {
        matches!(self, OriginDecision::Authorized { .. })
    }

    /// Verified origin; empty when unauthorized.
    pub fn matched_origin(&self) -> &str {
        match self {
            OriginDecision::Authorized { matched_origin } => matched_origin,
            OriginDecision::Unauthorized => "",
        }
    }
}

/// The request signals origin verification looks at.
///
/// Empty header values are treated as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct OriginSignals<'a> {
    pub origin: Option<&'a str>,
    pub amp_same_origin: Option<&'a str>,
    pub source_origin: Option<&'a str>,
}

/// Allowed origins, compiled once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    publisher_origin: String,
    publisher_origin_non_ssl: String,
    amp_cache_origin: String,
}

impl Default for OriginPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_PUBLISHER_DOMAIN, DEFAULT_AMP_CACHE_DOMAIN)
    }
}

impl OriginPolicy {
    pub fn new(publisher_domain: &str, amp_cache_domain: &str) -> Self {
        Self {
            publisher_origin: format!("https://{publisher_domain}"),
            // Google's AMP viewer may load publisher pages over plain http.
            publisher_origin_non_ssl: format!("http://{publisher_domain}"),
            amp_cache_origin: format!("https://{amp_cache_domain}"),
        }
    }

    pub fn publisher_origin(&self) -> &str {
        &self.publisher_origin
    }

    pub fn amp_cache_origin(&self) -> &str {
        &self.amp_cache_origin
    }

    /// Decide whether the request comes from an authorized AMP context.
    pub fn verify(&self, signals: &OriginSignals<'_>) -> OriginDecision {
        if let Some(origin) = signals.origin.filter(|o| !o.is_empty()) {
            let source = signals.source_origin.unwrap_or_default();
            tracing::debug!(%origin, source_origin = %source, "cross-origin AMP request");

            let allowed = [
                &self.publisher_origin,
                &self.publisher_origin_non_ssl,
                &self.amp_cache_origin,
            ];
            return match allowed.into_iter().find(|a| a.as_str() == source) {
                Some(m) => OriginDecision::Authorized { matched_origin: m.clone() },
                None => OriginDecision::Unauthorized,
            };
        }

        if signals.amp_same_origin == Some("true") {
            return OriginDecision::Authorized {
                matched_origin: self.publisher_origin.clone(),
            };
        }

        OriginDecision::Unauthorized
    }
}

/// Origin reported back to the analytics endpoint: the `Origin` header when
/// non-empty, otherwise the referrer (empty when both are missing).
pub fn reported_origin(origin: Option<&str>, referer: Option<&str>) -> String {
    match origin {
        Some(o) if !o.is_empty() => o.to_string(),
        _ => referer.unwrap_or_default().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cross(source: &str) -> OriginSignals<'_> {
        OriginSignals {
            origin: Some("https://demo-ymotongpoo-com.cdn.ampproject.org"),
            amp_same_origin: None,
            source_origin: Some(source),
        }
    }

    #[test]
    fn allowed_source_origins_match_exactly() {
        let p = OriginPolicy::default();
        for s in [
            "https://demo.ymotongpoo.com",
            "http://demo.ymotongpoo.com",
            "https://cdn.ampproject.org",
        ] {
            let d = p.verify(&cross(s));
            assert!(d.is_authorized(), "{s} should be allowed");
            assert_eq!(d.matched_origin(), s);
        }
    }

    #[test]
    fn near_miss_source_origins_are_rejected() {
        let p = OriginPolicy::default();
        for s in [
            "https://evil.example",
            "https://demo.ymotongpoo.com/",
            "HTTPS://demo.ymotongpoo.com",
            "https://demo.ymotongpoo.com.evil.example",
            "",
        ] {
            let d = p.verify(&cross(s));
            assert_eq!(d, OriginDecision::Unauthorized, "{s:?} should be rejected");
            assert_eq!(d.matched_origin(), "");
        }
    }

    #[test]
    fn origin_without_source_param_is_rejected() {
        let p = OriginPolicy::default();
        let s = OriginSignals {
            origin: Some("https://demo.ymotongpoo.com"),
            amp_same_origin: Some("true"),
            source_origin: None,
        };
        // Origin present means the same-origin header is never consulted.
        assert!(!p.verify(&s).is_authorized());
    }

    #[test]
    fn same_origin_header_maps_to_publisher() {
        let p = OriginPolicy::default();
        let s = OriginSignals {
            amp_same_origin: Some("true"),
            ..Default::default()
        };
        let d = p.verify(&s);
        assert!(d.is_authorized());
        assert_eq!(d.matched_origin(), "https://demo.ymotongpoo.com");
    }

    #[test]
    fn empty_origin_header_falls_through_to_same_origin() {
        let p = OriginPolicy::default();
        let s = OriginSignals {
            origin: Some(""),
            amp_same_origin: Some("true"),
            source_origin: Some("https://evil.example"),
        };
        assert_eq!(p.verify(&s).matched_origin(), "https://demo.ymotongpoo.com");
    }

    #[test]
    fn no_signals_is_unauthorized() {
        let p = OriginPolicy::default();
        assert!(!p.verify(&OriginSignals::default()).is_authorized());

        let s = OriginSignals {
            amp_same_origin: Some("TRUE"),
            ..Default::default()
        };
        assert!(!p.verify(&s).is_authorized());
    }

    #[test]
    fn custom_domains() {
        let p = OriginPolicy::new("news.example.org", "amp.cache.test");
        assert_eq!(p.publisher_origin(), "https://news.example.org");
        assert!(p.verify(&cross("http://news.example.org")).is_authorized());
        assert_eq!(p.amp_cache_origin(), "https://amp.cache.test");
        assert!(!p.verify(&cross("https://demo.ymotongpoo.com")).is_authorized());
    }

    #[test]
    fn reported_origin_prefers_header() {
        assert_eq!(reported_origin(Some("https://a"), Some("https://b/page")), "https://a");
        assert_eq!(reported_origin(Some(""), Some("https://b/page")), "https://b/page");
        assert_eq!(reported_origin(None, None), "");
    }
}
